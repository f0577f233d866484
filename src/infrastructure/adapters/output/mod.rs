//! Output Adapter - 音频输出实现
//!
//! - RodioAudioOutput: 系统默认输出设备
//! - SimulatedAudioOutput: 无声模拟，按音频时长计时

mod rodio_output;
mod session;
mod simulated_output;

pub use rodio_output::RodioAudioOutput;
pub use session::ThreadedSession;
pub use simulated_output::SimulatedAudioOutput;
