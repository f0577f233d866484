//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Script Context: 规则脚本
//! - Playback Context: 播放状态机

pub mod playback;
pub mod script;
