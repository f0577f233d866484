//! HTTP Routes
//!
//! API Endpoints:
//! - /                      GET   控制页面
//! - /api/ping              GET   健康检查
//! - /api/script            GET   规则列表
//! - /api/playback/state    GET   当前播放状态
//! - /api/playback/toggle   POST  播放/停止
//! - /ws/events             WS    播放状态事件

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::index))
        .nest("/api", api_routes())
        .route("/ws/events", get(handlers::websocket_handler))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/script", get(handlers::get_script))
        .nest("/playback", playback_routes())
}

/// Playback 路由
fn playback_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/state", get(handlers::get_playback_state))
        .route("/toggle", post(handlers::toggle_playback))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    use crate::application::error::MSG_CONFIGURATION;
    use crate::application::{PlaybackController, SpeechSynthesizerPort};
    use crate::domain::script::Script;
    use crate::infrastructure::adapters::{
        FakeTtsClient, FakeTtsClientConfig, GeminiTtsClient, GeminiTtsClientConfig, PcmDecoder,
        SimulatedAudioOutput,
    };
    use crate::infrastructure::events::EventPublisher;
    use crate::infrastructure::http::server::build_router;

    fn test_state(synthesizer: Arc<dyn SpeechSynthesizerPort>) -> Arc<AppState> {
        let script = Script::builtin();
        let publisher = EventPublisher::new().arc();
        let controller = PlaybackController::new(
            script.full_text(),
            synthesizer,
            Arc::new(PcmDecoder::default()),
            Arc::new(SimulatedAudioOutput::new()),
            publisher.clone(),
        )
        .arc();
        Arc::new(AppState::new(controller, script, publisher))
    }

    fn fake_state() -> Arc<AppState> {
        let config = FakeTtsClientConfig {
            delay_ms: 0,
            ..FakeTtsClientConfig::default()
        };
        test_state(Arc::new(FakeTtsClient::new(config)))
    }

    async fn send(router: Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_index_page() {
        let router = build_router(fake_state());
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("/api/playback/toggle"));
    }

    #[tokio::test]
    async fn test_ping() {
        let (status, body) = send(build_router(fake_state()), "GET", "/api/ping").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["status"], "ok");
    }

    #[tokio::test]
    async fn test_get_script() {
        let (_, body) = send(build_router(fake_state()), "GET", "/api/script").await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["total"], 6);
        assert_eq!(body["data"]["rules"][0]["title"], "أولاً:");
    }

    #[tokio::test]
    async fn test_initial_state_is_idle() {
        let (_, body) = send(build_router(fake_state()), "GET", "/api/playback/state").await;
        assert_eq!(body["data"]["phase"], "idle");
        assert_eq!(body["data"]["is_loading"], false);
        assert_eq!(body["data"]["is_playing"], false);
        assert!(body["data"]["error"].is_null());
    }

    #[tokio::test]
    async fn test_toggle_starts_then_stops() {
        let state = fake_state();

        let (_, body) = send(build_router(state.clone()), "POST", "/api/playback/toggle").await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["phase"], "playing");
        assert_eq!(body["data"]["is_playing"], true);
        assert!(state.controller.has_active_session());

        let (_, body) = send(build_router(state.clone()), "POST", "/api/playback/toggle").await;
        assert_eq!(body["data"]["phase"], "idle");
        assert_eq!(body["data"]["is_playing"], false);
        assert!(!state.controller.has_active_session());
    }

    #[tokio::test]
    async fn test_toggle_without_api_key_reports_configuration_error() {
        let client = GeminiTtsClient::new(GeminiTtsClientConfig::new("http://127.0.0.1:1")).unwrap();
        let state = test_state(Arc::new(client));

        let (_, body) = send(build_router(state.clone()), "POST", "/api/playback/toggle").await;
        assert_eq!(body["errno"], 503);
        assert_eq!(body["error"], MSG_CONFIGURATION);
        assert!(body["data"].is_null());

        let (_, body) = send(build_router(state), "GET", "/api/playback/state").await;
        assert_eq!(body["data"]["phase"], "idle");
        assert_eq!(body["data"]["error"], MSG_CONFIGURATION);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let router = build_router(fake_state());
        let request = Request::builder()
            .uri("/api/missing")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
