//! Decoder Adapter - 音频负载解码实现

mod pcm_decoder;

pub use pcm_decoder::{encode_pcm16, PcmDecoder};
