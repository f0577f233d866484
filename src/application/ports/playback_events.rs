//! Playback Events Port - 状态变更通知

use crate::domain::playback::PlaybackSnapshot;

/// 每次状态变更后由 PlaybackController 调用
pub trait PlaybackEventPort: Send + Sync {
    fn state_changed(&self, snapshot: &PlaybackSnapshot);
}
