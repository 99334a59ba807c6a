//! Static support resources.

use axum::Json;
use axum::extract::State;
use calmspace_core::crisis;

use crate::AppState;
use crate::models::{GuidanceResponse, ResourcesResponse};

const MENTAL_HEALTH_RESOURCES: &[&str] = &[
    "Talk to a trusted friend or family member",
    "Consider speaking with a mental health professional",
    "Practice deep breathing exercises",
    "Try journaling your thoughts and feelings",
    "Take a walk in nature",
    "Practice mindfulness or meditation",
];

/// `GET /api/resources`
pub async fn resources() -> Json<ResourcesResponse> {
    Json(ResourcesResponse {
        crisis_hotlines: crisis::hotlines(),
        mental_health_resources: MENTAL_HEALTH_RESOURCES.to_vec(),
    })
}

/// `GET /api/crisis/guidance`: what to do when someone is at risk.
pub async fn crisis_guidance(State(state): State<AppState>) -> Json<GuidanceResponse> {
    Json(GuidanceResponse {
        guidance: state.crisis.escalation_guidance(),
        crisis_response: state.crisis.crisis_response(),
    })
}
