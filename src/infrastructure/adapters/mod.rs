//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod decoder;
pub mod output;
pub mod script;
pub mod tts;

pub use decoder::PcmDecoder;
pub use output::{RodioAudioOutput, SimulatedAudioOutput};
pub use script::load_script;
pub use tts::*;
