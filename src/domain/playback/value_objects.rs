//! Playback Context - Value Objects

use serde::{Deserialize, Serialize};

/// 播放阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackPhase {
    #[default]
    Idle,
    /// 等待合成服务返回
    Requesting,
    /// 解码音频负载
    Decoding,
    Playing,
}

impl PlaybackPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Requesting => "requesting",
            Self::Decoding => "decoding",
            Self::Playing => "playing",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Requesting | Self::Decoding)
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }
}

impl std::fmt::Display for PlaybackPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 对外暴露的 UI 状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub phase: PlaybackPhase,
    pub is_loading: bool,
    pub is_playing: bool,
    pub error: Option<String>,
}

impl Default for PlaybackSnapshot {
    fn default() -> Self {
        Self {
            phase: PlaybackPhase::Idle,
            is_loading: false,
            is_playing: false,
            error: None,
        }
    }
}
