//! Bundled chat page.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// `GET /`: serves the chat page. History lives in the browser's local storage.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
