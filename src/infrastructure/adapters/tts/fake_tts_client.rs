//! Fake TTS Client - 离线 / 测试用的合成客户端
//!
//! 不调用任何外部服务，始终返回配置好的音频负载

use async_trait::async_trait;
use std::time::Duration;

use crate::application::ports::{SpeechSynthesizerPort, SynthesisError, SynthesisResult};
use crate::infrastructure::adapters::decoder::encode_pcm16;

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 固定返回的 base64 PCM 负载
    pub audio_base64: String,
    /// 模拟合成延迟（毫秒）
    pub delay_ms: u64,
}

impl FakeTtsClientConfig {
    /// 生成正弦提示音，按声道交错
    pub fn tone(frequency_hz: f32, duration_ms: u64, sample_rate: u32, channels: u16) -> Self {
        let frames = (sample_rate as u64 * duration_ms / 1000) as usize;
        let samples: Vec<f32> = (0..frames)
            .flat_map(|i| {
                let t = i as f32 / sample_rate as f32;
                let value = 0.2 * (2.0 * std::f32::consts::PI * frequency_hz * t).sin();
                std::iter::repeat(value).take(channels.max(1) as usize)
            })
            .collect();
        Self {
            audio_base64: encode_pcm16(&samples),
            delay_ms: 200,
        }
    }
}

impl Default for FakeTtsClientConfig {
    /// 1 秒 440Hz，24kHz 单声道
    fn default() -> Self {
        Self::tone(440.0, 1000, 24000, 1)
    }
}

/// Fake TTS Client
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
}

impl FakeTtsClient {
    pub fn new(config: FakeTtsClientConfig) -> Self {
        tracing::info!(
            payload_len = config.audio_base64.len(),
            delay_ms = config.delay_ms,
            "FakeTtsClient initialized"
        );
        Self { config }
    }

    /// 按输出格式生成 1 秒 440Hz 提示音
    pub fn for_format(sample_rate: u32, channels: u16) -> Self {
        Self::new(FakeTtsClientConfig::tone(440.0, 1000, sample_rate, channels))
    }
}

#[async_trait]
impl SpeechSynthesizerPort for FakeTtsClient {
    async fn synthesize(&self, text: &str) -> Result<SynthesisResult, SynthesisError> {
        if text.trim().is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        tracing::debug!(text_len = text.len(), "FakeTtsClient: returning fixed audio");

        if self.config.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.delay_ms)).await;
        }

        if self.config.audio_base64.is_empty() {
            return Err(SynthesisError::NoAudioData);
        }

        Ok(SynthesisResult {
            audio_base64: self.config.audio_base64.clone(),
            mime_type: Some("audio/L16;codec=pcm;rate=24000".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::AudioDecoderPort;
    use crate::infrastructure::adapters::decoder::PcmDecoder;

    #[tokio::test]
    async fn test_default_tone_decodes_to_one_second() {
        let mut config = FakeTtsClientConfig::default();
        config.delay_ms = 0;
        let client = FakeTtsClient::new(config);

        let result = client.synthesize("hello").await.unwrap();
        let audio = PcmDecoder::default().decode(&result.audio_base64).unwrap();

        assert_eq!(audio.frames(), 24000);
        assert!(audio.samples.iter().all(|s| s.abs() <= 0.21));
    }

    #[tokio::test]
    async fn test_tone_follows_configured_format() {
        let mut client = FakeTtsClient::for_format(48000, 2);
        client.config.delay_ms = 0;

        let result = client.synthesize("hello").await.unwrap();
        let audio = PcmDecoder::new(48000, 2).decode(&result.audio_base64).unwrap();

        assert_eq!(audio.samples.len(), 96000);
        assert_eq!(audio.frames(), 48000);
        assert_eq!(audio.duration().as_millis(), 1000);
        // 两个声道内容相同
        assert_eq!(audio.samples[200], audio.samples[201]);
    }

    #[tokio::test]
    async fn test_empty_payload_is_no_audio() {
        let client = FakeTtsClient::new(FakeTtsClientConfig {
            audio_base64: String::new(),
            delay_ms: 0,
        });
        assert_eq!(
            client.synthesize("hello").await,
            Err(SynthesisError::NoAudioData)
        );
    }

    #[tokio::test]
    async fn test_empty_text_rejected() {
        let client = FakeTtsClient::new(FakeTtsClientConfig {
            audio_base64: "QUJD".to_string(),
            delay_ms: 0,
        });
        assert_eq!(client.synthesize(" ").await, Err(SynthesisError::EmptyText));
    }
}
