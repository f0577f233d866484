//! Playback Context - 播放状态上下文
//!
//! 状态机: Idle → Requesting → Decoding → Playing → Idle
//! 停止或出错时直接回到 Idle

mod aggregate;
mod errors;
mod value_objects;

pub use aggregate::PlaybackMachine;
pub use errors::TransitionError;
pub use value_objects::{PlaybackPhase, PlaybackSnapshot};
