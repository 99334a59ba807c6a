//! Session memory endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use calmspace_core::memory::ConversationSummary;

use crate::AppState;
use crate::error::{AppError, AppResult};

/// `GET /api/sessions/{id}/summary`: unknown sessions report an empty summary.
pub async fn session_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<ConversationSummary> {
    Json(state.memory.summary(&id))
}

/// `DELETE /api/sessions/{id}`
pub async fn forget_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if state.memory.forget(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("session {id}")))
    }
}
