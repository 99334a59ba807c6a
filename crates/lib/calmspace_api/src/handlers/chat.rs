//! Chat endpoint: crisis screen, emotion tagging, reply.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use calmspace_core::crisis::CrisisLevel;
use calmspace_core::memory::{MAX_SESSION_ID_LEN, MemoryEntry};
use calmspace_core::responder::ReplySource;
use chrono::Utc;
use tracing::{info, warn};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{ChatRequest, ChatResponse, CrisisReply, SupportReply};

/// `POST /api/chat`
///
/// High-risk messages get the emergency response without a model call.
/// Everything else goes through the responder. Message text is never logged.
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let Json(body) = payload?;
    let message = body.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("Message cannot be empty".into()));
    }
    let session_id = body.session_id.as_deref().filter(|s| !s.is_empty());
    if session_id.is_some_and(|id| id.len() > MAX_SESSION_ID_LEN) {
        return Err(AppError::Validation(format!(
            "session_id must be at most {MAX_SESSION_ID_LEN} bytes"
        )));
    }

    let (previous_emotions, previous_levels) = match session_id {
        Some(id) => (
            state.memory.recent_emotions(id),
            state.memory.recent_crisis_levels(id),
        ),
        None => (Vec::new(), Vec::new()),
    };

    let crisis = state.crisis.assess(message, &previous_levels);
    let emotion = state.emotions.analyze(message).with_history(&previous_emotions);

    let record = |source: ReplySource| {
        if let Some(id) = session_id {
            state.memory.record(
                id,
                MemoryEntry {
                    timestamp: Utc::now(),
                    message_chars: message.chars().count(),
                    source,
                    emotion: emotion.primary,
                    crisis_level: crisis.level,
                },
            );
        }
    };

    if crisis.level == CrisisLevel::High {
        warn!(trend = ?crisis.trend, "high crisis detected in user message");
        record(ReplySource::Crisis);
        return Ok(Json(ChatResponse::Crisis(CrisisReply {
            message: state.crisis.crisis_response().to_string(),
            crisis_detected: true,
            crisis_level: CrisisLevel::High,
            emotion: "crisis",
            timestamp: Utc::now(),
            response_source: ReplySource::Crisis,
            suggestions: Vec::new(),
        })));
    }

    info!(
        emotion = %emotion.primary,
        intensity = %emotion.intensity,
        crisis_level = %crisis.level,
        history = body.history.len(),
        "received chat message"
    );

    let history = body.chat_history();
    let reply = state
        .responder
        .respond(message, &history, &emotion, &crisis)
        .await;
    record(reply.source);

    Ok(Json(ChatResponse::Support(SupportReply {
        message: reply.message,
        crisis_detected: false,
        crisis_level: crisis.level,
        emotion: emotion.primary,
        intensity: emotion.intensity,
        timestamp: Utc::now(),
        response_source: reply.source,
        quality_score: reply.quality_score,
        emotion_appropriate: reply.emotion_appropriate,
        crisis_appropriate: reply.crisis_appropriate,
        fallback: reply.source == ReplySource::Fallback,
        dataset_match: reply.dataset_match,
        suggestions: state.emotions.emotion_suggestions(emotion.primary),
    })))
}
