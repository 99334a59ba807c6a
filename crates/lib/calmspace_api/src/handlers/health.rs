//! Health endpoint.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::models::{HealthFeatures, HealthResponse};

/// `GET /api/health`: reports which features are live.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: chrono::Utc::now(),
        features: HealthFeatures {
            crisis_detection: true,
            emotion_detection: true,
            llm_integration: state.responder.model_configured(),
            dataset_retrieval: state.responder.datasets().is_loaded(),
        },
    })
}
