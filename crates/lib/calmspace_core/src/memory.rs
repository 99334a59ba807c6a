//! Per-session conversation memory.
//!
//! Keeps reply metadata (never message text) for the most recent turns of
//! each session so emotion and crisis trends can be tracked across requests.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;

use crate::crisis::{CrisisLevel, CrisisTrend};
use crate::emotion::{Emotion, EmotionTrend};
use crate::responder::ReplySource;

/// Turns kept per session.
pub const MAX_MEMORY_LENGTH: usize = 20;

/// Sessions kept before the least recently active one is evicted.
pub const MAX_SESSIONS: usize = 10_000;

/// Longest accepted session id, in bytes.
pub const MAX_SESSION_ID_LEN: usize = 128;

/// One remembered turn.
#[derive(Debug, Clone, Serialize)]
pub struct MemoryEntry {
    pub timestamp: DateTime<Utc>,
    pub message_chars: usize,
    pub source: ReplySource,
    pub emotion: Emotion,
    pub crisis_level: CrisisLevel,
}

/// Aggregate view of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationSummary {
    pub message_count: usize,
    pub primary_emotion: Emotion,
    pub crisis_level: CrisisLevel,
    pub emotion_trend: EmotionTrend,
    pub crisis_trend: CrisisTrend,
    pub last_interaction: Option<DateTime<Utc>>,
}

impl ConversationSummary {
    fn empty() -> Self {
        Self {
            message_count: 0,
            primary_emotion: Emotion::Neutral,
            crisis_level: CrisisLevel::Low,
            emotion_trend: EmotionTrend::Stable,
            crisis_trend: CrisisTrend::Stable,
            last_interaction: None,
        }
    }
}

/// Concurrent session store, bounded in sessions and in turns per session.
#[derive(Debug)]
pub struct ConversationMemory {
    sessions: DashMap<String, VecDeque<MemoryEntry>>,
    max_sessions: usize,
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::with_capacity(MAX_SESSIONS)
    }
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(max_sessions: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Append a turn, dropping the oldest past [`MAX_MEMORY_LENGTH`].
    ///
    /// A new session beyond capacity evicts the least recently active one.
    pub fn record(&self, session_id: &str, entry: MemoryEntry) {
        if !self.sessions.contains_key(session_id) {
            while self.sessions.len() >= self.max_sessions {
                if !self.evict_idlest() {
                    break;
                }
            }
        }
        let mut entries = self.sessions.entry(session_id.to_string()).or_default();
        entries.push_back(entry);
        while entries.len() > MAX_MEMORY_LENGTH {
            entries.pop_front();
        }
    }

    /// Emotions of earlier turns, oldest first.
    pub fn recent_emotions(&self, session_id: &str) -> Vec<Emotion> {
        self.sessions
            .get(session_id)
            .map(|e| e.iter().map(|m| m.emotion).collect())
            .unwrap_or_default()
    }

    /// Crisis levels of earlier turns, oldest first.
    pub fn recent_crisis_levels(&self, session_id: &str) -> Vec<CrisisLevel> {
        self.sessions
            .get(session_id)
            .map(|e| e.iter().map(|m| m.crisis_level).collect())
            .unwrap_or_default()
    }

    pub fn summary(&self, session_id: &str) -> ConversationSummary {
        let Some(entries) = self.sessions.get(session_id) else {
            return ConversationSummary::empty();
        };
        if entries.is_empty() {
            return ConversationSummary::empty();
        }

        let emotions: Vec<Emotion> = entries.iter().map(|e| e.emotion).collect();
        let levels: Vec<CrisisLevel> = entries.iter().map(|e| e.crisis_level).collect();

        ConversationSummary {
            message_count: entries.len(),
            primary_emotion: most_common(&emotions),
            crisis_level: levels.iter().copied().max().unwrap_or(CrisisLevel::Low),
            emotion_trend: EmotionTrend::from_emotions(&emotions),
            crisis_trend: CrisisTrend::from_levels(&levels),
            last_interaction: entries.back().map(|e| e.timestamp),
        }
    }

    pub fn forget(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn evict_idlest(&self) -> bool {
        let idlest = self
            .sessions
            .iter()
            .min_by_key(|s| s.value().back().map(|e| e.timestamp))
            .map(|s| s.key().clone());
        match idlest {
            Some(id) => self.sessions.remove(&id).is_some(),
            None => false,
        }
    }
}

/// Most frequent emotion; the one seen first wins a tie.
fn most_common(emotions: &[Emotion]) -> Emotion {
    let mut counts: HashMap<Emotion, usize> = HashMap::new();
    for e in emotions {
        *counts.entry(*e).or_default() += 1;
    }
    let mut best = (Emotion::Neutral, 0);
    for e in emotions {
        let count = counts[e];
        if count > best.1 {
            best = (*e, count);
        }
    }
    best.0
}
