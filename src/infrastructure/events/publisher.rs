//! Event Publisher Implementation
//!
//! 播放状态变更的广播推送，实现 PlaybackEventPort

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::application::ports::PlaybackEventPort;
use crate::domain::playback::{PlaybackPhase, PlaybackSnapshot};

/// 广播通道容量
const CHANNEL_CAPACITY: usize = 100;

/// WebSocket 事件类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum WsEvent {
    /// 播放状态变更
    PlaybackStateChanged {
        phase: PlaybackPhase,
        is_loading: bool,
        is_playing: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
        at: DateTime<Utc>,
    },
}

impl WsEvent {
    pub fn state_changed(snapshot: &PlaybackSnapshot) -> Self {
        Self::PlaybackStateChanged {
            phase: snapshot.phase,
            is_loading: snapshot.is_loading,
            is_playing: snapshot.is_playing,
            error: snapshot.error.clone(),
            at: Utc::now(),
        }
    }
}

/// 事件发布器
pub struct EventPublisher {
    channel: broadcast::Sender<WsEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { channel: tx }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 订阅所有播放事件
    pub fn subscribe(&self) -> broadcast::Receiver<WsEvent> {
        self.channel.subscribe()
    }

    pub fn publish(&self, event: WsEvent) {
        if let Err(e) = self.channel.send(event) {
            tracing::debug!(error = %e, "Failed to publish event (no receivers)");
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackEventPort for EventPublisher {
    fn state_changed(&self, snapshot: &PlaybackSnapshot) {
        tracing::debug!(
            phase = %snapshot.phase,
            error = ?snapshot.error,
            "Publishing playback state"
        );
        self.publish(WsEvent::state_changed(snapshot));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_state_change() {
        let publisher = EventPublisher::new();
        let mut rx = publisher.subscribe();

        let snapshot = PlaybackSnapshot {
            phase: PlaybackPhase::Requesting,
            is_loading: true,
            is_playing: false,
            error: None,
        };
        publisher.state_changed(&snapshot);

        match rx.recv().await.unwrap() {
            WsEvent::PlaybackStateChanged {
                phase, is_loading, ..
            } => {
                assert_eq!(phase, PlaybackPhase::Requesting);
                assert!(is_loading);
            }
        }
    }

    #[test]
    fn test_publish_without_subscribers_is_ignored() {
        let publisher = EventPublisher::new();
        publisher.state_changed(&PlaybackSnapshot::default());
    }

    #[test]
    fn test_event_json_shape() {
        let snapshot = PlaybackSnapshot {
            phase: PlaybackPhase::Idle,
            is_loading: false,
            is_playing: false,
            error: Some("boom".to_string()),
        };
        let json = serde_json::to_value(WsEvent::state_changed(&snapshot)).unwrap();

        assert_eq!(json["event"], "PlaybackStateChanged");
        assert_eq!(json["data"]["phase"], "idle");
        assert_eq!(json["data"]["error"], "boom");
        assert!(json["data"]["at"].is_string());
    }
}
