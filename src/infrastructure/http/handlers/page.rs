//! Page Handler - 控制页面

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../../web/index.html");

/// 规则文本 + 播放/停止按钮
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
