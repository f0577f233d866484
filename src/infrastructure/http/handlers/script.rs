//! Script Handler

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::infrastructure::http::dto::{ApiResponse, ScriptResponse};
use crate::infrastructure::http::state::AppState;

/// 获取规则列表
pub async fn get_script(State(state): State<Arc<AppState>>) -> Json<ApiResponse<ScriptResponse>> {
    Json(ApiResponse::success(ScriptResponse::from(&state.script)))
}
