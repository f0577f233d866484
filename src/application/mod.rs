//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SpeechSynthesizer、AudioDecoder、AudioOutput、PlaybackEvents）
//! - playback_controller: 播放状态机与输出会话管理
//! - error: 应用层错误定义

pub mod error;
pub mod playback_controller;
pub mod ports;

pub use error::PlaybackError;
pub use playback_controller::PlaybackController;

pub use ports::{
    // Audio decoder
    AudioDecoderPort,
    DecodeError,
    DecodedAudio,
    // Audio output
    AudioOutputPort,
    CompletionCallback,
    OutputError,
    OutputSession,
    // Events
    PlaybackEventPort,
    // Speech synthesizer
    SpeechSynthesizerPort,
    SynthesisError,
    SynthesisResult,
};
