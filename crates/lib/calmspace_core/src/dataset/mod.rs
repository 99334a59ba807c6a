//! Dataset retrieval: canned answers from conversation corpora.
//!
//! Two corpora are indexed with TF-IDF at startup:
//!
//! - `emotion`: `EmotionChat_69k.csv`, empathetic dialogues labelled by emotion
//! - `mental`: `MentalChat_6K.csv` + `MentalChat_10K.csv`, counselling Q&A
//!
//! A missing or malformed file only disables its corpus; the service keeps
//! running with whatever loaded.

pub mod loader;
pub mod tfidf;

use std::collections::{BTreeMap, HashMap};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use rand::seq::IndexedRandom;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::emotion::Emotion;
use loader::{EmotionRow, MentalRow};
use tfidf::{TfidfIndex, TfidfOptions};

pub const EMOTION_FILE: &str = "EmotionChat_69k.csv";
pub const MENTAL_FILES: [&str; 2] = ["MentalChat_6K.csv", "MentalChat_10K.csv"];

/// Similarity needed before a corpus answer replaces a model reply.
pub const MATCH_THRESHOLD: f32 = 0.3;

/// Looser similarity used when the model is unavailable.
pub const FALLBACK_THRESHOLD: f32 = 0.1;

/// Errors that can occur while loading corpora.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Missing column '{column}' in {path}")]
    MissingColumn { path: String, column: String },
}

/// Where the corpora live.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub dir: PathBuf,
}

impl DatasetConfig {
    /// Reads `CALMSPACE_DATASET_DIR`, defaulting to `dataset`.
    pub fn from_env() -> Self {
        Self {
            dir: env::var("CALMSPACE_DATASET_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("dataset")),
        }
    }
}

/// A corpus answer close enough to the user's message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetMatch {
    pub response: String,
    pub source: &'static str,
    pub similarity_score: f32,
    pub dataset: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
}

/// Size and shape of one loaded corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusStats {
    pub rows: usize,
    pub columns: Vec<String>,
    pub sample_entries: usize,
}

#[derive(Debug)]
struct Corpus<T> {
    columns: Vec<String>,
    rows: Vec<T>,
    index: TfidfIndex,
}

impl<T> Corpus<T> {
    fn stats(&self) -> CorpusStats {
        CorpusStats {
            rows: self.rows.len(),
            columns: self.columns.clone(),
            sample_entries: self.rows.len().min(3),
        }
    }
}

/// Indexed corpora plus canned fallbacks.
#[derive(Debug, Default)]
pub struct DatasetHandler {
    emotion: Option<Corpus<EmotionRow>>,
    // emotion -> emotion corpus rows carrying that label
    emotion_rows: HashMap<Emotion, Vec<usize>>,
    mental: Option<Corpus<MentalRow>>,
}

impl DatasetHandler {
    /// Handler with no corpora; every search misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load and index whatever corpora exist under `config.dir`.
    pub fn load(config: &DatasetConfig) -> Self {
        let emotion = match load_emotion(&config.dir) {
            Ok(corpus) => {
                info!(rows = corpus.rows.len(), terms = corpus.index.vocabulary_len(), "loaded emotion corpus");
                Some(corpus)
            }
            Err(e) => {
                warn!(error = %e, "emotion corpus unavailable");
                None
            }
        };
        let mental = match load_mental(&config.dir) {
            Ok(corpus) => {
                info!(rows = corpus.rows.len(), terms = corpus.index.vocabulary_len(), "loaded mental health corpus");
                Some(corpus)
            }
            Err(e) => {
                warn!(error = %e, "mental health corpus unavailable");
                None
            }
        };
        let emotion_rows = emotion
            .as_ref()
            .map(|corpus| rows_by_label(&corpus.rows))
            .unwrap_or_default();
        Self {
            emotion,
            emotion_rows,
            mental,
        }
    }

    /// True when at least one corpus loaded.
    pub fn is_loaded(&self) -> bool {
        self.emotion.is_some() || self.mental.is_some()
    }

    /// Best corpus answer scoring at least `threshold`.
    ///
    /// The emotion corpus is only searched for a non-neutral emotion, and only
    /// among rows labelled with that emotion.
    pub fn find_best_match(
        &self,
        message: &str,
        emotion: Emotion,
        threshold: f32,
    ) -> Option<DatasetMatch> {
        let cleaned = clean_text(message);
        let mut best: Option<DatasetMatch> = None;

        if !emotion.is_neutral()
            && let Some(found) = self.search_emotion(&cleaned, emotion)
        {
            best = Some(found);
        }
        if let Some(found) = self.search_mental(&cleaned) {
            let better = best
                .as_ref()
                .is_none_or(|b| found.similarity_score > b.similarity_score);
            if better {
                best = Some(found);
            }
        }

        best.filter(|m| m.similarity_score >= threshold && m.similarity_score > 0.0)
    }

    fn search_emotion(&self, message: &str, emotion: Emotion) -> Option<DatasetMatch> {
        let corpus = self.emotion.as_ref()?;
        let candidates = self.emotion_rows.get(&emotion)?;

        let query = corpus.index.transform(message);
        let (row, score) = corpus.index.best_match(&query, candidates.iter().copied())?;
        let row = &corpus.rows[row];
        Some(DatasetMatch {
            response: row.agent_reply(),
            source: "emotion_dataset",
            similarity_score: score,
            dataset: "emotion",
            emotion: Some(row.emotion.clone()),
            input: None,
        })
    }

    fn search_mental(&self, message: &str) -> Option<DatasetMatch> {
        let corpus = self.mental.as_ref()?;
        let query = corpus.index.transform(message);
        let (row, score) = corpus.index.best_match(&query, 0..corpus.rows.len())?;
        let row = &corpus.rows[row];
        Some(DatasetMatch {
            response: row.output.clone(),
            source: "mental_health_dataset",
            similarity_score: score,
            dataset: "mental",
            emotion: None,
            input: Some(row.input.clone()),
        })
    }

    /// Per-corpus statistics keyed by corpus name.
    pub fn stats(&self) -> BTreeMap<String, CorpusStats> {
        let mut stats = BTreeMap::new();
        if let Some(corpus) = &self.emotion {
            stats.insert("emotion".to_string(), corpus.stats());
        }
        if let Some(corpus) = &self.mental {
            stats.insert("mental".to_string(), corpus.stats());
        }
        stats
    }

    /// Short canned reply for when nothing else is available.
    pub fn fallback_response(&self, emotion: Emotion) -> &'static str {
        let options: &[&'static str] = match emotion {
            Emotion::Anxious => &[
                "I can sense you're feeling anxious right now. That's completely okay. Let's take a moment together - try taking three deep breaths with me. Inhale slowly for 4 counts, hold for 4, then exhale for 4. How does that feel?",
                "Anxiety can be really overwhelming. Remember, it's okay to feel this way. Sometimes talking about what's on your mind can help. Would you like to share what's making you feel anxious?",
            ],
            Emotion::Sad => &[
                "I'm so sorry you're feeling sad right now. Your feelings are valid, and it's okay to not be okay. Sometimes just acknowledging how we feel can be the first step toward feeling better. Would you like to talk about what's on your mind?",
                "Sadness can feel really heavy and isolating. Remember that you're not alone in feeling this way. Sometimes the simple act of expressing our feelings can help lighten the load a little. I'm here to listen.",
            ],
            Emotion::Stressed => &[
                "Stress can feel really overwhelming, like everything is piling up at once. It's okay to feel this way. Sometimes breaking things down into smaller steps can help. What's one small thing you could do right now that might help you feel a little better?",
                "I can hear how stressed you're feeling. That's completely understandable. Sometimes the best thing we can do is give ourselves permission to take a break. Even just a few minutes of deep breathing can help reset our nervous system.",
            ],
            Emotion::Lonely => &[
                "Loneliness can be one of the hardest feelings to sit with. It's completely normal to feel this way, and your feelings are valid. Sometimes reaching out to someone we trust, even just to say hello, can help. Is there someone you could reach out to?",
                "I hear how lonely you're feeling right now. That's a really difficult place to be. Remember that you're not alone in feeling this way - many people experience loneliness, even when surrounded by others.",
            ],
            _ => &[
                "I'm here to listen and support you. Sometimes just talking about what's on our minds can help us feel a little better. Would you like to share what's going on?",
                "I hear you, and I want you to know that your feelings are valid. It's okay to not be okay sometimes. I'm here to listen whenever you're ready to talk.",
            ],
        };
        options.choose(&mut rand::rng()).copied().unwrap_or_default()
    }
}

fn load_emotion(dir: &Path) -> Result<Corpus<EmotionRow>, DatasetError> {
    let (columns, rows) = loader::read_csv::<EmotionRow>(&dir.join(EMOTION_FILE), EmotionRow::COLUMNS)?;
    let documents: Vec<String> = rows.iter().map(EmotionRow::document).collect();
    let index = TfidfIndex::fit(&documents, TfidfOptions::default());
    Ok(Corpus { columns, rows, index })
}

/// Row indices per detectable emotion, matched on the lowercased label.
fn rows_by_label(rows: &[EmotionRow]) -> HashMap<Emotion, Vec<usize>> {
    let labels: Vec<String> = rows.iter().map(|r| r.emotion.to_lowercase()).collect();
    let mut by_label = HashMap::new();
    for emotion in Emotion::DETECTABLE {
        let matching: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, label)| label.contains(emotion.as_str()))
            .map(|(i, _)| i)
            .collect();
        if !matching.is_empty() {
            by_label.insert(emotion, matching);
        }
    }
    by_label
}

fn load_mental(dir: &Path) -> Result<Corpus<MentalRow>, DatasetError> {
    let mut columns = Vec::new();
    let mut rows = Vec::new();
    for file in MENTAL_FILES {
        let (file_columns, file_rows) =
            loader::read_csv::<MentalRow>(&dir.join(file), MentalRow::COLUMNS)?;
        for column in file_columns {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
        rows.extend(file_rows);
    }
    let index = TfidfIndex::fit(
        &rows.iter().map(|r| r.input.as_str()).collect::<Vec<_>>(),
        TfidfOptions::default(),
    );
    Ok(Corpus { columns, rows, index })
}

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("non-word pattern must compile"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern must compile"));

/// Lowercase, strip punctuation and collapse whitespace.
pub fn clean_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, " ");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}
