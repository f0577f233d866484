//! PCM Decoder - base64 编码的 16-bit PCM 解码器
//!
//! Gemini TTS 返回 `audio/L16;codec=pcm;rate=24000`：
//! 有符号 16 位小端序、24kHz、单声道，无容器头

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::application::ports::{AudioDecoderPort, DecodeError, DecodedAudio};

/// PCM 解码器
pub struct PcmDecoder {
    sample_rate: u32,
    channels: u16,
}

impl PcmDecoder {
    pub fn new(sample_rate: u32, channels: u16) -> Self {
        Self {
            sample_rate,
            channels,
        }
    }
}

impl Default for PcmDecoder {
    /// 24kHz 单声道
    fn default() -> Self {
        Self::new(24000, 1)
    }
}

impl AudioDecoderPort for PcmDecoder {
    fn decode(&self, payload: &str) -> Result<DecodedAudio, DecodeError> {
        let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = STANDARD
            .decode(cleaned.as_bytes())
            .map_err(|e| DecodeError::InvalidEncoding(e.to_string()))?;

        if bytes.len() % 2 != 0 {
            tracing::warn!(
                byte_len = bytes.len(),
                "PCM payload has an odd byte count, dropping trailing byte"
            );
        }

        let mut samples: Vec<f32> = bytes
            .chunks_exact(2)
            .map(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]) as f32 / 32768.0)
            .collect();

        // 只保留完整的帧
        let channels = self.channels.max(1) as usize;
        let whole = samples.len() - samples.len() % channels;
        samples.truncate(whole);

        if samples.is_empty() {
            return Err(DecodeError::Empty);
        }

        Ok(DecodedAudio {
            samples,
            sample_rate: self.sample_rate,
            channels: self.channels,
        })
    }
}

/// 将 [-1.0, 1.0] 样本编码为 base64 的 16-bit 小端 PCM
pub fn encode_pcm16(samples: &[f32]) -> String {
    let bytes: Vec<u8> = samples
        .iter()
        .flat_map(|s| {
            let clamped = s.clamp(-1.0, 1.0);
            ((clamped * i16::MAX as f32) as i16).to_le_bytes()
        })
        .collect();
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_samples() {
        // 0x0000, 0x4000 (16384), 0x8000 (-32768), 0x7fff (32767)
        let payload = STANDARD.encode([0x00, 0x00, 0x00, 0x40, 0x00, 0x80, 0xff, 0x7f]);
        let audio = PcmDecoder::default().decode(&payload).unwrap();

        assert_eq!(audio.sample_rate, 24000);
        assert_eq!(audio.channels, 1);
        assert_eq!(audio.samples.len(), 4);
        assert_eq!(audio.samples[0], 0.0);
        assert_eq!(audio.samples[1], 0.5);
        assert_eq!(audio.samples[2], -1.0);
        assert!((audio.samples[3] - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_decode_odd_length_drops_trailing_byte() {
        // "QUJD" = b"ABC" → 一个样本 0x4241
        let audio = PcmDecoder::default().decode("QUJD").unwrap();
        assert_eq!(audio.samples.len(), 1);
        assert_eq!(audio.samples[0], 0x4241 as f32 / 32768.0);
    }

    #[test]
    fn test_decode_one_second_buffer() {
        let payload = encode_pcm16(&[0.25; 24000]);
        let audio = PcmDecoder::default().decode(&payload).unwrap();

        assert_eq!(audio.frames(), 24000);
        assert_eq!(audio.duration().as_millis(), 1000);
    }

    #[test]
    fn test_decode_ignores_whitespace() {
        let audio = PcmDecoder::default().decode("AAAA\nAAAA\n").unwrap();
        assert_eq!(audio.samples.len(), 3);
    }

    #[test]
    fn test_decode_invalid_base64() {
        let result = PcmDecoder::default().decode("not base64!");
        assert!(matches!(result, Err(DecodeError::InvalidEncoding(_))));
    }

    #[test]
    fn test_decode_empty_payload() {
        assert_eq!(PcmDecoder::default().decode(""), Err(DecodeError::Empty));
        // 单字节不足一个样本
        assert_eq!(PcmDecoder::default().decode("QQ=="), Err(DecodeError::Empty));
    }

    #[test]
    fn test_decode_stereo_drops_partial_frame() {
        let payload = encode_pcm16(&[0.1, 0.2, 0.3]);
        let audio = PcmDecoder::new(24000, 2).decode(&payload).unwrap();
        assert_eq!(audio.samples.len(), 2);
        assert_eq!(audio.frames(), 1);
    }

    #[test]
    fn test_encode_clamps() {
        let payload = encode_pcm16(&[2.0, -2.0]);
        let audio = PcmDecoder::default().decode(&payload).unwrap();
        assert!((audio.samples[0] - 1.0).abs() < 1e-4);
        assert!((audio.samples[1] + 1.0).abs() < 1e-3);
    }
}
