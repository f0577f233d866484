//! Rulecast - 游戏规则语音播报
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Script Context: 规则文本
//! - Playback Context: 播放状态机
//!
//! 应用层 (application/):
//! - Ports: 端口定义（SpeechSynthesizer, AudioDecoder, AudioOutput, PlaybackEvents）
//! - PlaybackController: 播放/停止编排与输出会话管理
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: 控制页面 + RESTful API + WebSocket
//! - Adapters: Gemini TTS Client, PCM Decoder, Rodio / Simulated Output, Script Loader
//! - Events: WebSocket 事件发布

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
