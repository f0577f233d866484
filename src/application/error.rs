//! 应用层错误定义
//!
//! 播放周期中所有失败最终归结为 PlaybackError，并转换为面向用户的提示

use thiserror::Error;

use crate::application::ports::{DecodeError, OutputError, SynthesisError};
use crate::domain::playback::TransitionError;

pub const MSG_CONFIGURATION: &str = "API key is not configured.";
pub const MSG_SYNTHESIS_FAILED: &str = "Failed to generate audio from text.";
pub const MSG_NO_AUDIO_DATA: &str = "لم يتم استقبال بيانات صوتية.";
pub const MSG_DECODE_FAILED: &str = "Failed to decode audio data.";
pub const MSG_OUTPUT_FAILED: &str = "Failed to start audio playback.";
pub const MSG_EMPTY_SCRIPT: &str = "لا يوجد نص للقراءة.";
pub const MSG_BUSY: &str = "جارٍ تحميل الصوت، يرجى الانتظار.";
pub const MSG_UNEXPECTED: &str = "حدث خطأ غير متوقع.";

/// 播放错误
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// 请求进行中，拒绝重入
    #[error("A playback request is already in progress")]
    Busy,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Script text is empty")]
    EmptyScript,

    #[error("Speech synthesis failed")]
    SynthesisFailed,

    #[error("No audio data received")]
    NoAudioData,

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("Playback state error: {0}")]
    State(#[from] TransitionError),
}

impl PlaybackError {
    /// 显示在错误横幅中的文本
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Busy => MSG_BUSY,
            Self::Configuration(_) => MSG_CONFIGURATION,
            Self::EmptyScript => MSG_EMPTY_SCRIPT,
            Self::SynthesisFailed => MSG_SYNTHESIS_FAILED,
            Self::NoAudioData => MSG_NO_AUDIO_DATA,
            Self::Decode(_) => MSG_DECODE_FAILED,
            Self::Output(_) => MSG_OUTPUT_FAILED,
            Self::State(_) => MSG_UNEXPECTED,
        }
    }
}

impl From<SynthesisError> for PlaybackError {
    fn from(err: SynthesisError) -> Self {
        match err {
            SynthesisError::EmptyText => Self::EmptyScript,
            SynthesisError::Configuration(msg) => Self::Configuration(msg),
            SynthesisError::Failed => Self::SynthesisFailed,
            SynthesisError::NoAudioData => Self::NoAudioData,
        }
    }
}
