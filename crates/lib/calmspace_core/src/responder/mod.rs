//! Responder: picks the reply for a screened message.
//!
//! Order of preference:
//!
//! 1. a close corpus answer ([`MATCH_THRESHOLD`])
//! 2. the chat model, with the reply polished and decorated
//! 3. a looser corpus answer ([`FALLBACK_THRESHOLD`]) or a canned reply

pub mod fallback;
pub mod postprocess;
pub mod prompt;
pub mod quality;

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::crisis::CrisisAssessment;
use crate::dataset::{DatasetHandler, DatasetMatch, FALLBACK_THRESHOLD, MATCH_THRESHOLD};
use crate::emotion::EmotionReading;
use crate::llm::{ChatMessage, ChatModel};

/// Quality score reported for fallback replies.
pub const FALLBACK_QUALITY: f32 = 0.5;

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    Crisis,
    Dataset,
    Ai,
    Fallback,
}

/// Reply plus the heuristics computed for it.
#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    pub message: String,
    pub source: ReplySource,
    pub quality_score: f32,
    pub emotion_appropriate: bool,
    pub crisis_appropriate: bool,
    pub dataset_match: Option<DatasetMatch>,
}

/// Chooses and shapes replies.
#[derive(Clone)]
pub struct Responder {
    model: Arc<dyn ChatModel>,
    datasets: Arc<DatasetHandler>,
}

impl Responder {
    pub fn new(model: Arc<dyn ChatModel>, datasets: Arc<DatasetHandler>) -> Self {
        Self { model, datasets }
    }

    pub fn datasets(&self) -> &DatasetHandler {
        &self.datasets
    }

    pub fn model_configured(&self) -> bool {
        self.model.is_configured()
    }

    /// Produce the reply for `message`.
    pub async fn respond(
        &self,
        message: &str,
        history: &[ChatMessage],
        emotion: &EmotionReading,
        crisis: &CrisisAssessment,
    ) -> Reply {
        if let Some(found) = self
            .datasets
            .find_best_match(message, emotion.primary, MATCH_THRESHOLD)
        {
            info!(source = found.source, score = found.similarity_score, "answered from dataset");
            return Reply {
                message: postprocess::escape_html(&found.response),
                source: ReplySource::Dataset,
                quality_score: quality::score_quality(&found.response, emotion, crisis),
                emotion_appropriate: true,
                crisis_appropriate: true,
                dataset_match: Some(found),
            };
        }

        let context = prompt::prepare_context(message, history, emotion, crisis);
        match self.model.complete(&context).await {
            Ok(raw) => {
                let text = postprocess::polish(&raw, emotion.primary);
                info!(model = self.model.name(), chars = text.chars().count(), "answered from model");
                Reply {
                    quality_score: quality::score_quality(&text, emotion, crisis),
                    emotion_appropriate: quality::emotion_appropriate(&text, emotion),
                    crisis_appropriate: quality::crisis_appropriate(&text, crisis),
                    message: postprocess::decorate(&text, emotion.primary),
                    source: ReplySource::Ai,
                    dataset_match: None,
                }
            }
            Err(e) => {
                warn!(model = self.model.name(), error = %e, "model unavailable, using fallback reply");
                Reply {
                    message: self.fallback_reply(message, emotion),
                    source: ReplySource::Fallback,
                    quality_score: FALLBACK_QUALITY,
                    emotion_appropriate: true,
                    crisis_appropriate: true,
                    dataset_match: None,
                }
            }
        }
    }

    /// Looser corpus match, else a canned reply for the emotion and intensity,
    /// else a general supportive line. Corpus text is HTML-escaped.
    pub fn fallback_reply(&self, message: &str, emotion: &EmotionReading) -> String {
        if let Some(found) = self
            .datasets
            .find_best_match(message, emotion.primary, FALLBACK_THRESHOLD)
        {
            return postprocess::escape_html(&found.response);
        }
        fallback::canned_reply(emotion.primary, emotion.intensity)
            .unwrap_or_else(|| self.datasets.fallback_response(emotion.primary))
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::dataset::{DatasetConfig, MENTAL_FILES};

    use crate::crisis::{CrisisLevel, CrisisTrend};
    use crate::emotion::{Emotion, EmotionTrend, Intensity};
    use crate::llm::LlmError;

    struct ScriptedModel {
        reply: Option<String>,
        seen: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl ScriptedModel {
        fn new(reply: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(str::to_string),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
            self.seen.lock().unwrap().push(messages.to_vec());
            self.reply.clone().ok_or(LlmError::Empty)
        }
    }

    fn anxious() -> EmotionReading {
        EmotionReading {
            primary: Emotion::Anxious,
            intensity: Intensity::Moderate,
            confidence: 1.0,
            trend: EmotionTrend::Stable,
        }
    }

    fn sleep_corpus() -> Arc<DatasetHandler> {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(MENTAL_FILES[0]),
            "input,output\n\
             I cannot sleep at night,Try a <b>wind-down</b> routine & rest.\n\
             I cannot sleep lately,Keep a steady wake time.\n",
        )
        .unwrap();
        fs::write(
            dir.path().join(MENTAL_FILES[1]),
            "input,output\n\
             My boss yells at work,Set boundaries.\n\
             Work and my boss,Talk to HR.\n",
        )
        .unwrap();
        Arc::new(DatasetHandler::load(&DatasetConfig {
            dir: dir.path().to_path_buf(),
        }))
    }

    fn calm() -> CrisisAssessment {
        CrisisAssessment {
            level: CrisisLevel::Low,
            trend: CrisisTrend::Stable,
            escalation_needed: false,
        }
    }

    #[tokio::test]
    async fn model_reply_is_polished_and_decorated() {
        let model = ScriptedModel::new(Some(
            "Let's breathe together. You are safe. Try grounding. This sentence is dropped.",
        ));
        let responder = Responder::new(model.clone(), Arc::new(DatasetHandler::empty()));

        let reply = responder.respond("I'm anxious", &[], &anxious(), &calm()).await;

        assert_eq!(reply.source, ReplySource::Ai);
        assert!(reply.message.starts_with("<strong>🌱 Here for You</strong>"));
        assert!(reply.message.ends_with("Try grounding. 😟"));
        assert!(!reply.message.contains("dropped"));
        assert!(reply.emotion_appropriate);

        let seen = model.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].last(), Some(&ChatMessage::user("I'm anxious")));
    }

    #[tokio::test]
    async fn model_failure_falls_back_to_canned_reply() {
        let responder = Responder::new(ScriptedModel::new(None), Arc::new(DatasetHandler::empty()));

        let reply = responder.respond("I'm anxious", &[], &anxious(), &calm()).await;

        assert_eq!(reply.source, ReplySource::Fallback);
        assert!((reply.quality_score - FALLBACK_QUALITY).abs() < 1e-6);
        assert!(!reply.message.is_empty());
        assert!(reply.dataset_match.is_none());
    }

    #[tokio::test]
    async fn neutral_fallback_uses_general_reply() {
        let responder = Responder::new(ScriptedModel::new(None), Arc::new(DatasetHandler::empty()));

        let reply = responder
            .respond("hello there", &[], &EmotionReading::neutral(), &calm())
            .await;

        assert_eq!(reply.source, ReplySource::Fallback);
        assert!(reply.message.contains("listen") || reply.message.contains("valid"));
    }

    #[tokio::test]
    async fn close_corpus_answer_skips_the_model() {
        let model = ScriptedModel::new(Some("unused"));
        let responder = Responder::new(model.clone(), sleep_corpus());

        let reply = responder
            .respond("I can't sleep at night", &[], &EmotionReading::neutral(), &calm())
            .await;

        assert_eq!(reply.source, ReplySource::Dataset);
        assert_eq!(
            reply.message,
            "Try a &lt;b&gt;wind-down&lt;/b&gt; routine &amp; rest."
        );
        let found = reply.dataset_match.expect("dataset match");
        assert_eq!(found.dataset, "mental");
        assert_eq!(found.response, "Try a <b>wind-down</b> routine & rest.");
        assert!(found.similarity_score >= MATCH_THRESHOLD);
        assert!(model.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn fallback_prefers_corpus_then_canned_reply() {
        let responder = Responder::new(ScriptedModel::new(None), sleep_corpus());

        let from_corpus = responder.fallback_reply("sleep", &EmotionReading::neutral());
        assert_eq!(from_corpus, "Try a &lt;b&gt;wind-down&lt;/b&gt; routine &amp; rest.");

        let canned = responder.fallback_reply("pizza toppings", &anxious());
        assert!(!canned.is_empty());
        assert!(!canned.contains("wind-down"));
    }

    #[test]
    fn source_serializes_lowercase() {
        assert_eq!(serde_json::to_value(ReplySource::Ai).unwrap(), "ai");
    }
}
