//! Speech Synthesizer Port - 语音合成抽象
//!
//! 定义文本转语音的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// 合成错误
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("Text to synthesize is empty")]
    EmptyText,

    /// 缺少凭证等配置问题，不会发起网络请求
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// 网络或服务端失败，原始原因只记录在日志中
    #[error("Speech synthesis failed")]
    Failed,

    #[error("Provider response contained no audio data")]
    NoAudioData,
}

/// 合成结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisResult {
    /// base64 编码的音频负载
    pub audio_base64: String,
    /// 服务端声明的 MIME 类型，例如 `audio/L16;codec=pcm;rate=24000`
    pub mime_type: Option<String>,
}

/// Speech Synthesizer Port
///
/// 每次调用只发送一个请求：不重试、不取消
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<SynthesisResult, SynthesisError>;
}
