//! Audio Output Port - 音频输出抽象
//!
//! 每个播放周期创建一个新的输出会话；会话由 PlaybackController 独占持有

use thiserror::Error;

use super::DecodedAudio;

/// 输出错误
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Audio output device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Audio playback error: {0}")]
    Playback(String),
}

/// 自然播放结束时调用；显式停止时不会调用
pub type CompletionCallback = Box<dyn FnOnce() + Send + 'static>;

/// 一个正在播放的输出会话
pub trait OutputSession: Send {
    /// 停止播放并释放输出设备，重复调用无副作用
    ///
    /// 不得阻塞等待完成回调
    fn stop(&mut self);

    fn is_active(&self) -> bool;
}

/// Audio Output Port
pub trait AudioOutputPort: Send + Sync {
    /// 打开新的输出会话并立即开始播放
    fn open(
        &self,
        audio: DecodedAudio,
        on_finished: CompletionCallback,
    ) -> Result<Box<dyn OutputSession>, OutputError>;
}
