//! Gemini TTS Client - 调用 Gemini generateContent 语音合成接口
//!
//! 实现 SpeechSynthesizerPort trait
//!
//! 外部 API:
//! POST {base_url}/v1beta/models/{model}:generateContent
//! Header: x-goog-api-key
//! Request: contents + generationConfig（responseModalities = AUDIO，预置音色）
//! Response: candidates[].content.parts[].inlineData.data（base64 PCM）

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{SpeechSynthesizerPort, SynthesisError, SynthesisResult};
use crate::config::TtsConfig;

// ============================================================================
// 请求体
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_modalities: [&'static str; 1],
    speech_config: SpeechConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig<'a> {
    voice_config: VoiceConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig<'a> {
    prebuilt_voice_config: PrebuiltVoiceConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig<'a> {
    voice_name: &'a str,
}

// ============================================================================
// 响应体（只解析需要的字段）
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: Option<String>,
    #[serde(default)]
    data: Option<String>,
}

impl GenerateContentResponse {
    /// 按 candidates → parts 顺序取第一个非空的内联音频
    fn into_first_audio(self) -> Option<SynthesisResult> {
        self.candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.inline_data)
            .find_map(|inline| match inline.data {
                Some(data) if !data.is_empty() => Some(SynthesisResult {
                    audio_base64: data,
                    mime_type: inline.mime_type,
                }),
                _ => None,
            })
    }
}

// ============================================================================
// Client
// ============================================================================

/// Gemini TTS 客户端配置
#[derive(Debug, Clone)]
pub struct GeminiTtsClientConfig {
    pub base_url: String,
    pub model: String,
    pub voice: String,
    /// 拼接在文本前的语气提示
    pub style_prompt: String,
    pub api_key: Option<String>,
    /// 0 表示不设超时
    pub timeout_secs: u64,
}

impl Default for GeminiTtsClientConfig {
    fn default() -> Self {
        Self::from(&TtsConfig::default())
    }
}

impl From<&TtsConfig> for GeminiTtsClientConfig {
    fn from(config: &TtsConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            voice: config.voice.clone(),
            style_prompt: config.style_prompt.clone(),
            api_key: config.api_key.clone(),
            timeout_secs: config.timeout_secs,
        }
    }
}

impl GeminiTtsClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Gemini TTS 客户端
///
/// 每次合成只发送一个请求，不重试
pub struct GeminiTtsClient {
    client: Client,
    config: GeminiTtsClientConfig,
}

impl GeminiTtsClient {
    pub fn new(config: GeminiTtsClientConfig) -> Result<Self, SynthesisError> {
        let mut builder = Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| SynthesisError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// 获取合成 URL
    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn api_key(&self) -> Result<&str, SynthesisError> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| SynthesisError::Configuration("API key is not configured".to_string()))
    }

    fn build_request(&self, text: &str) -> GenerateContentRequest<'_> {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![TextPart {
                    text: format!("{}{}", self.config.style_prompt, text),
                }],
            }],
            generation_config: GenerationConfig {
                response_modalities: ["AUDIO"],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: &self.config.voice,
                        },
                    },
                },
            },
        }
    }
}

#[async_trait]
impl SpeechSynthesizerPort for GeminiTtsClient {
    async fn synthesize(&self, text: &str) -> Result<SynthesisResult, SynthesisError> {
        if text.trim().is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        // 缺少凭证时不发起任何网络请求
        let api_key = self.api_key()?;

        let url = self.generate_url();
        let body = self.build_request(text);

        tracing::debug!(
            url = %url,
            model = %self.config.model,
            voice = %self.config.voice,
            text_len = text.len(),
            "Sending speech synthesis request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::error!(error = %e, "Speech synthesis request timed out");
                } else if e.is_connect() {
                    tracing::error!(error = %e, "Cannot connect to speech synthesis service");
                } else {
                    tracing::error!(error = %e, "Speech synthesis request failed");
                }
                SynthesisError::Failed
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %error_text,
                "Speech synthesis service returned an error"
            );
            return Err(SynthesisError::Failed);
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse speech synthesis response");
            SynthesisError::Failed
        })?;

        let result = parsed.into_first_audio().ok_or_else(|| {
            tracing::warn!("Speech synthesis response contained no inline audio");
            SynthesisError::NoAudioData
        })?;

        tracing::info!(
            payload_len = result.audio_base64.len(),
            mime_type = ?result.mime_type,
            "Speech synthesis completed"
        );

        Ok(result)
    }
}
