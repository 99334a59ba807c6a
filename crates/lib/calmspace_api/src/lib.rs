//! # calmspace_api
//!
//! HTTP API library for CalmSpace.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use calmspace_core::crisis::CrisisFilter;
use calmspace_core::dataset::DatasetHandler;
use calmspace_core::emotion::EmotionDetector;
use calmspace_core::llm::ChatModel;
use calmspace_core::memory::ConversationMemory;
use calmspace_core::responder::Responder;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{chat, datasets, health, index, resources, sessions};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub responder: Responder,
    pub crisis: CrisisFilter,
    pub emotions: EmotionDetector,
    /// Per-session reply metadata.
    pub memory: Arc<ConversationMemory>,
}

impl AppState {
    pub fn new(model: Arc<dyn ChatModel>, datasets: Arc<DatasetHandler>) -> Self {
        Self {
            responder: Responder::new(model, datasets),
            crisis: CrisisFilter::new(),
            emotions: EmotionDetector::new(),
            memory: Arc::new(ConversationMemory::new()),
        }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index::index))
        .route("/api/chat", post(chat::chat_handler))
        .route("/api/health", get(health::health_check))
        .route("/api/resources", get(resources::resources))
        .route("/api/crisis/guidance", get(resources::crisis_guidance))
        .route("/api/dataset-stats", get(datasets::dataset_stats))
        .route("/api/sessions/{id}", delete(sessions::forget_session))
        .route("/api/sessions/{id}/summary", get(sessions::session_summary))
        .layer(cors)
        .with_state(state)
}
