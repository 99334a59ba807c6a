//! Request and response bodies.

use std::collections::BTreeMap;

use calmspace_core::crisis::{CrisisLevel, EscalationGuidance};
use calmspace_core::dataset::{CorpusStats, DatasetMatch};
use calmspace_core::emotion::{Emotion, Intensity};
use calmspace_core::llm::ChatMessage;
use calmspace_core::responder::ReplySource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// One turn of browser-side history. Roles other than user and assistant are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryTurn {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

impl HistoryTurn {
    pub fn to_chat_message(&self) -> Option<ChatMessage> {
        match self.role.as_str() {
            "user" => Some(ChatMessage::user(&self.content)),
            "assistant" | "bot" => Some(ChatMessage::assistant(&self.content)),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
    pub session_id: Option<String>,
}

impl ChatRequest {
    pub fn chat_history(&self) -> Vec<ChatMessage> {
        self.history.iter().filter_map(HistoryTurn::to_chat_message).collect()
    }
}

/// Emergency reply; the model is never consulted.
#[derive(Debug, Serialize)]
pub struct CrisisReply {
    pub message: String,
    pub crisis_detected: bool,
    pub crisis_level: CrisisLevel,
    /// Always `"crisis"`.
    pub emotion: &'static str,
    pub timestamp: DateTime<Utc>,
    pub response_source: ReplySource,
    pub suggestions: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct SupportReply {
    pub message: String,
    pub crisis_detected: bool,
    pub crisis_level: CrisisLevel,
    pub emotion: Emotion,
    pub intensity: Intensity,
    pub timestamp: DateTime<Utc>,
    pub response_source: ReplySource,
    pub quality_score: f32,
    pub emotion_appropriate: bool,
    pub crisis_appropriate: bool,
    pub fallback: bool,
    pub dataset_match: Option<DatasetMatch>,
    pub suggestions: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ChatResponse {
    Crisis(CrisisReply),
    Support(SupportReply),
}

#[derive(Debug, Serialize)]
pub struct HealthFeatures {
    pub crisis_detection: bool,
    pub emotion_detection: bool,
    pub llm_integration: bool,
    pub dataset_retrieval: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub features: HealthFeatures,
}

#[derive(Debug, Serialize)]
pub struct ResourcesResponse {
    pub crisis_hotlines: BTreeMap<&'static str, &'static str>,
    pub mental_health_resources: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct GuidanceResponse {
    #[serde(flatten)]
    pub guidance: EscalationGuidance,
    pub crisis_response: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DatasetStatsResponse {
    pub status: &'static str,
    pub datasets: BTreeMap<String, CorpusStats>,
    pub total_entries: usize,
}
