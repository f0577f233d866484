//! Data Transfer Objects

use serde::Serialize;

use crate::domain::playback::{PlaybackPhase, PlaybackSnapshot};
use crate::domain::script::{RuleEntry, Script};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Script DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RuleResponse {
    pub title: String,
    pub body: String,
}

impl From<&RuleEntry> for RuleResponse {
    fn from(rule: &RuleEntry) -> Self {
        Self {
            title: rule.title.clone(),
            body: rule.body.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScriptResponse {
    pub total: usize,
    pub rules: Vec<RuleResponse>,
}

impl From<&Script> for ScriptResponse {
    fn from(script: &Script) -> Self {
        Self {
            total: script.rules().len(),
            rules: script.rules().iter().map(RuleResponse::from).collect(),
        }
    }
}

// ============================================================================
// Playback DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PlaybackStateResponse {
    pub phase: PlaybackPhase,
    pub is_loading: bool,
    pub is_playing: bool,
    pub error: Option<String>,
}

impl From<PlaybackSnapshot> for PlaybackStateResponse {
    fn from(snapshot: PlaybackSnapshot) -> Self {
        Self {
            phase: snapshot.phase,
            is_loading: snapshot.is_loading,
            is_playing: snapshot.is_playing,
            error: snapshot.error,
        }
    }
}
