//! Audio Decoder Port - 音频负载解码抽象

use std::time::Duration;
use thiserror::Error;

/// 解码错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Invalid payload encoding: {0}")]
    InvalidEncoding(String),

    #[error("Decoded audio contains no samples")]
    Empty,
}

/// 解码后的音频，样本归一化到 [-1.0, 1.0]，多声道时交错存放
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl DecodedAudio {
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }
}

/// Audio Decoder Port
///
/// 将传输编码（base64）的负载转换为可播放的音频缓冲
pub trait AudioDecoderPort: Send + Sync {
    fn decode(&self, payload: &str) -> Result<DecodedAudio, DecodeError>;
}
