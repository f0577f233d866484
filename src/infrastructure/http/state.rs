//! Application State

use std::sync::Arc;

use crate::application::PlaybackController;
use crate::domain::script::Script;
use crate::infrastructure::events::EventPublisher;

/// 应用状态
pub struct AppState {
    pub controller: Arc<PlaybackController>,
    pub script: Script,
    pub event_publisher: Arc<EventPublisher>,
}

impl AppState {
    pub fn new(
        controller: Arc<PlaybackController>,
        script: Script,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            controller,
            script,
            event_publisher,
        }
    }
}
