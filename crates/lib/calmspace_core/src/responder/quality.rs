//! Keyword heuristics for judging a reply.

use crate::crisis::{CrisisAssessment, CrisisLevel};
use crate::emotion::{Emotion, EmotionReading};

const SUPPORTIVE_WORDS: &[&str] = &["support", "listen", "understand", "valid", "okay", "help", "care"];
const CRISIS_SCORE_WORDS: &[&str] = &["help", "support", "professional", "crisis"];
const CRISIS_CHECK_WORDS: &[&str] = &["help", "support", "professional", "crisis", "988", "911"];

fn mentions_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

fn scoring_words(emotion: Emotion) -> &'static [&'static str] {
    match emotion {
        Emotion::Anxious => &["breathe", "ground", "calm", "anxiety"],
        Emotion::Sad => &["sad", "feel", "valid", "okay"],
        Emotion::Angry => &["angry", "frustrated", "understand", "express"],
        Emotion::Stressed => &["stress", "overwhelmed", "break", "step"],
        Emotion::Lonely => &["lonely", "alone", "connect", "reach"],
        Emotion::Happy => &["happy", "good", "positive", "celebrate"],
        Emotion::Confused => &["confused", "uncertain", "clarify", "understand"],
        Emotion::Neutral => &[],
    }
}

fn indicator_words(emotion: Emotion) -> &'static [&'static str] {
    match emotion {
        Emotion::Anxious => &["breathe", "ground", "calm", "anxiety", "worried"],
        Emotion::Sad => &["sad", "feel", "valid", "okay", "understand"],
        other => scoring_words(other),
    }
}

/// Score in `[0, 1]` from length, tone and topical keywords.
pub fn score_quality(response: &str, emotion: &EmotionReading, crisis: &CrisisAssessment) -> f32 {
    let lower = response.to_lowercase();
    let mut score: f32 = 0.5;

    if (50..=300).contains(&response.chars().count()) {
        score += 0.1;
    }
    if mentions_any(&lower, SUPPORTIVE_WORDS) {
        score += 0.1;
    }
    if response.contains('?') {
        score += 0.1;
    }
    if crisis.is_concerning() && mentions_any(&lower, CRISIS_SCORE_WORDS) {
        score += 0.2;
    }
    if !emotion.primary.is_neutral() && mentions_any(&lower, scoring_words(emotion.primary)) {
        score += 0.1;
    }

    score.min(1.0)
}

/// Whether the reply speaks to the detected emotion.
pub fn emotion_appropriate(response: &str, emotion: &EmotionReading) -> bool {
    if emotion.primary.is_neutral() {
        return true;
    }
    mentions_any(&response.to_lowercase(), indicator_words(emotion.primary))
}

/// Whether a high-risk reply points toward help.
pub fn crisis_appropriate(response: &str, crisis: &CrisisAssessment) -> bool {
    if crisis.level < CrisisLevel::High {
        return true;
    }
    mentions_any(&response.to_lowercase(), CRISIS_CHECK_WORDS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crisis::CrisisTrend;
    use crate::emotion::{EmotionTrend, Intensity};

    fn reading(primary: Emotion) -> EmotionReading {
        EmotionReading {
            primary,
            intensity: Intensity::Moderate,
            confidence: 1.0,
            trend: EmotionTrend::Stable,
        }
    }

    fn crisis(level: CrisisLevel) -> CrisisAssessment {
        CrisisAssessment {
            level,
            trend: CrisisTrend::Stable,
            escalation_needed: level == CrisisLevel::High,
        }
    }

    #[test]
    fn bare_reply_scores_base() {
        let score = score_quality("ok", &reading(Emotion::Neutral), &crisis(CrisisLevel::Low));
        assert!((score - 0.5).abs() < 1e-6);
    }

    #[test]
    fn full_marks_are_capped() {
        let reply = "I'm here to listen and support you. Let's breathe together and find calm. Would professional help feel okay?";
        let score = score_quality(reply, &reading(Emotion::Anxious), &crisis(CrisisLevel::Medium));
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn crisis_bonus_only_when_concerning() {
        let reply = "Please reach out for help.";
        let low = score_quality(reply, &reading(Emotion::Neutral), &crisis(CrisisLevel::Low));
        let medium = score_quality(reply, &reading(Emotion::Neutral), &crisis(CrisisLevel::Medium));
        assert!((medium - low - 0.2).abs() < 1e-6);
    }

    #[test]
    fn emotion_appropriateness() {
        assert!(emotion_appropriate("Let's breathe slowly.", &reading(Emotion::Anxious)));
        assert!(!emotion_appropriate("Nice weather.", &reading(Emotion::Anxious)));
        assert!(emotion_appropriate("Nice weather.", &reading(Emotion::Neutral)));
    }

    #[test]
    fn crisis_appropriateness() {
        assert!(crisis_appropriate("Nice weather.", &crisis(CrisisLevel::Medium)));
        assert!(!crisis_appropriate("Nice weather.", &crisis(CrisisLevel::High)));
        assert!(crisis_appropriate("Please call 988.", &crisis(CrisisLevel::High)));
    }
}
