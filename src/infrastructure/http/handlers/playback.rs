//! Playback Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::infrastructure::http::dto::{ApiResponse, PlaybackStateResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 获取当前播放状态
pub async fn get_playback_state(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<PlaybackStateResponse>> {
    Json(ApiResponse::success(state.controller.snapshot().into()))
}

/// 播放/停止切换
///
/// 开始播放时等待合成与解码完成后才返回；失败信息同时写入播放状态
pub async fn toggle_playback(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<PlaybackStateResponse>>, ApiError> {
    let snapshot = state.controller.toggle().await?;
    Ok(Json(ApiResponse::success(snapshot.into())))
}
