//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_decoder;
mod audio_output;
mod playback_events;
mod speech_synthesizer;

pub use audio_decoder::{AudioDecoderPort, DecodeError, DecodedAudio};
pub use audio_output::{AudioOutputPort, CompletionCallback, OutputError, OutputSession};
pub use playback_events::PlaybackEventPort;
pub use speech_synthesizer::{SpeechSynthesizerPort, SynthesisError, SynthesisResult};
