//! Emotion detection: regex scoring of user messages.
//!
//! Every emotion owns four word-boundary patterns. A message scores one point
//! per non-overlapping match; the highest score wins.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Emotions the detector can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Anxious,
    Sad,
    Angry,
    Stressed,
    Lonely,
    Confused,
    Happy,
    Neutral,
}

impl Emotion {
    /// Emotions with patterns, in tie-break order.
    pub const DETECTABLE: [Emotion; 7] = [
        Emotion::Anxious,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Stressed,
        Emotion::Lonely,
        Emotion::Confused,
        Emotion::Happy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Anxious => "anxious",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Stressed => "stressed",
            Emotion::Lonely => "lonely",
            Emotion::Confused => "confused",
            Emotion::Happy => "happy",
            Emotion::Neutral => "neutral",
        }
    }

    pub fn is_neutral(&self) -> bool {
        *self == Emotion::Neutral
    }

    /// Capitalized name, e.g. "Anxious".
    pub fn title(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How strongly an emotion shows in a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Mild,
    Moderate,
    Severe,
}

impl Intensity {
    fn from_matches(matches: usize) -> Self {
        match matches {
            0 => Intensity::Mild,
            1 | 2 => Intensity::Moderate,
            _ => Intensity::Severe,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Mild => "mild",
            Intensity::Moderate => "moderate",
            Intensity::Severe => "severe",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trend of the detected emotion across recent turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionTrend {
    Stable,
    Improving,
    Declining,
}

impl EmotionTrend {
    /// Trend over a chronological list of emotions, judged on the last three.
    pub fn from_emotions(emotions: &[Emotion]) -> Self {
        if emotions.len() < 3 {
            return EmotionTrend::Stable;
        }
        let recent = &emotions[emotions.len() - 3..];
        let count = |e: Emotion| recent.iter().filter(|r| **r == e).count();
        if count(Emotion::Happy) >= 2 {
            EmotionTrend::Improving
        } else if count(Emotion::Sad) >= 2 || count(Emotion::Anxious) >= 2 {
            EmotionTrend::Declining
        } else {
            EmotionTrend::Stable
        }
    }
}

/// Result of analyzing one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionReading {
    pub primary: Emotion,
    pub intensity: Intensity,
    /// Share of all pattern matches that went to the primary emotion.
    pub confidence: f32,
    pub trend: EmotionTrend,
}

impl EmotionReading {
    pub fn neutral() -> Self {
        Self {
            primary: Emotion::Neutral,
            intensity: Intensity::Mild,
            confidence: 0.0,
            trend: EmotionTrend::Stable,
        }
    }

    /// Same reading with the trend recomputed from earlier emotions (oldest first).
    pub fn with_history(mut self, previous: &[Emotion]) -> Self {
        let mut emotions = previous.to_vec();
        emotions.push(self.primary);
        self.trend = EmotionTrend::from_emotions(&emotions);
        self
    }
}

static EMOTION_PATTERNS: LazyLock<Vec<(Emotion, Vec<Regex>)>> = LazyLock::new(|| {
    let table: [(Emotion, [&str; 4]); 7] = [
        (
            Emotion::Anxious,
            [
                r"\b(anxious|anxiety|worried|worry|nervous|panic|overwhelmed|stressed|stress)\b",
                r"\b(can't breathe|heart racing|sweating|shaking|trembling)\b",
                r"\b(what if|what's going to happen|afraid|scared|fear)\b",
                r"\b(overthinking|racing thoughts|mind won't stop)\b",
            ],
        ),
        (
            Emotion::Sad,
            [
                r"\b(sad|depressed|down|blue|hopeless|worthless|empty|numb)\b",
                r"\b(crying|tears|sobbing|weeping|miserable|unhappy)\b",
                r"\b(don't care|nothing matters|pointless|meaningless)\b",
                r"\b(lonely|alone|isolated|no one understands)\b",
            ],
        ),
        (
            Emotion::Angry,
            [
                r"\b(angry|mad|furious|rage|irritated|annoyed|frustrated)\b",
                r"\b(hate|hate myself|hate everything|pissed off)\b",
                r"\b(unfair|unjust|wrong|stupid|idiot|dumb)\b",
                r"\b(want to scream|want to break something|violent)\b",
            ],
        ),
        (
            Emotion::Stressed,
            [
                r"\b(stressed|overwhelmed|too much|can't handle|pressure)\b",
                r"\b(busy|rushed|deadline|work|job|responsibilities)\b",
                r"\b(exhausted|tired|burned out|drained|fatigued)\b",
                r"\b(too many things|everything at once|piling up)\b",
            ],
        ),
        (
            Emotion::Lonely,
            [
                r"\b(lonely|alone|isolated|no friends|no one cares)\b",
                r"\b(by myself|no one to talk to|no one understands)\b",
                r"\b(miss someone|missing|wish someone was here)\b",
                r"\b(no one around|empty house|quiet|silence)\b",
            ],
        ),
        (
            Emotion::Confused,
            [
                r"\b(confused|unsure|don't know|uncertain|mixed up)\b",
                r"\b(what should i do|what do i want|lost|directionless)\b",
                r"\b(contradictory|mixed feelings|conflicted)\b",
                r"\b(not sure|maybe|perhaps|possibly)\b",
            ],
        ),
        (
            Emotion::Happy,
            [
                r"\b(happy|glad|joy|joyful|excited|cheerful|delighted)\b",
                r"\b(grateful|thankful|proud|relieved|content)\b",
                r"\b(good day|great day|feeling good|feeling great|feeling better)\b",
                r"\b(amazing|wonderful|awesome|fantastic)\b",
            ],
        ),
    ];

    table
        .into_iter()
        .map(|(emotion, patterns)| {
            let compiled = patterns
                .iter()
                .map(|p| Regex::new(&format!("(?i){p}")).expect("emotion pattern must compile"))
                .collect();
            (emotion, compiled)
        })
        .collect()
});

/// Regex-based emotion detector.
#[derive(Debug, Clone, Default)]
pub struct EmotionDetector;

impl EmotionDetector {
    pub fn new() -> Self {
        Self
    }

    /// Match counts per detectable emotion, in tie-break order.
    fn scores(&self, message: &str) -> Vec<(Emotion, usize)> {
        let lowered = message.to_lowercase().replace('\u{2019}', "'");
        EMOTION_PATTERNS
            .iter()
            .map(|(emotion, patterns)| {
                let score = patterns.iter().map(|p| p.find_iter(&lowered).count()).sum();
                (*emotion, score)
            })
            .collect()
    }

    /// Primary emotion of a message, `Neutral` when nothing matches.
    pub fn detect_emotion(&self, message: &str) -> Emotion {
        pick_primary(&self.scores(message)).0
    }

    /// Intensity of `emotion` in `message`.
    pub fn emotion_intensity(&self, message: &str, emotion: Emotion) -> Intensity {
        if emotion.is_neutral() {
            return Intensity::Mild;
        }
        let matches = self
            .scores(message)
            .into_iter()
            .find(|(e, _)| *e == emotion)
            .map(|(_, score)| score)
            .unwrap_or(0);
        Intensity::from_matches(matches)
    }

    /// Primary emotion, intensity and confidence in one pass.
    pub fn analyze(&self, message: &str) -> EmotionReading {
        let scores = self.scores(message);
        let (primary, top) = pick_primary(&scores);
        if primary.is_neutral() {
            return EmotionReading::neutral();
        }
        let total: usize = scores.iter().map(|(_, s)| s).sum();
        EmotionReading {
            primary,
            intensity: Intensity::from_matches(top),
            confidence: top as f32 / total as f32,
            trend: EmotionTrend::Stable,
        }
    }

    /// Guidance sentence describing the emotion for the model.
    pub fn emotion_context(&self, emotion: Emotion) -> &'static str {
        match emotion {
            Emotion::Anxious => "The user appears to be experiencing anxiety. Focus on grounding techniques, breathing exercises, and reassurance.",
            Emotion::Sad => "The user seems to be feeling sad or depressed. Offer comfort, validation, and gentle encouragement.",
            Emotion::Angry => "The user appears to be angry or frustrated. Acknowledge their feelings and help them find healthy ways to express anger.",
            Emotion::Stressed => "The user is feeling stressed or overwhelmed. Help them break things down and find coping strategies.",
            Emotion::Lonely => "The user is feeling lonely or isolated. Offer connection and suggest reaching out to others.",
            Emotion::Confused => "The user seems confused or uncertain. Help them clarify their thoughts and feelings.",
            Emotion::Happy => "The user seems to be in a positive mood. Celebrate with them and encourage what is working.",
            Emotion::Neutral => "The user's emotional state appears neutral. Maintain supportive and empathetic tone.",
        }
    }

    /// Coping suggestions for an emotion.
    pub fn emotion_suggestions(&self, emotion: Emotion) -> Vec<&'static str> {
        match emotion {
            Emotion::Anxious => vec![
                "Try the 4-7-8 breathing technique: inhale for 4, hold for 7, exhale for 8",
                "Name 5 things you can see, 4 you can touch, 3 you can hear, 2 you can smell, 1 you can taste",
                "Take a short walk to help ground yourself",
                "Write down your worries to get them out of your head",
            ],
            Emotion::Sad => vec![
                "Allow yourself to feel sad - it's a normal emotion",
                "Try doing something small that usually brings you joy",
                "Talk to someone you trust about how you're feeling",
                "Consider journaling your thoughts and feelings",
            ],
            Emotion::Angry => vec![
                "Take a few deep breaths to help calm your nervous system",
                "Try counting to 10 before responding",
                "Write down what you're angry about",
                "Find a physical outlet like exercise or punching a pillow",
            ],
            Emotion::Stressed => vec![
                "Break down what's stressing you into smaller, manageable pieces",
                "Take a 5-minute break to do something you enjoy",
                "Try progressive muscle relaxation",
                "Make a list of what you can control vs. what you can't",
            ],
            Emotion::Lonely => vec![
                "Reach out to someone you haven't talked to in a while",
                "Consider joining a group or community around your interests",
                "Try volunteering to connect with others",
                "Write a letter to someone you care about",
            ],
            Emotion::Confused => vec![
                "Take time to sit with your feelings without judgment",
                "Try writing down your thoughts to clarify them",
                "Talk to someone you trust about what's on your mind",
                "Remember that it's okay to not have all the answers",
            ],
            Emotion::Happy | Emotion::Neutral => vec![
                "Remember that your feelings are valid and it's okay to not be okay sometimes.",
            ],
        }
    }
}

/// Highest positive score; the first emotion wins a tie.
fn pick_primary(scores: &[(Emotion, usize)]) -> (Emotion, usize) {
    scores
        .iter()
        .fold((Emotion::Neutral, 0), |best, &(emotion, score)| {
            if score > best.1 { (emotion, score) } else { best }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_when_nothing_matches() {
        let detector = EmotionDetector::new();
        assert_eq!(detector.detect_emotion("Hello, how are you?"), Emotion::Neutral);
        assert_eq!(detector.analyze("Hello, how are you?"), EmotionReading::neutral());
    }

    #[test]
    fn detects_anxiety() {
        let detector = EmotionDetector::new();
        assert_eq!(
            detector.detect_emotion("I'm feeling really anxious today"),
            Emotion::Anxious
        );
    }

    #[test]
    fn sad_outscores_lonely() {
        // "lonely" scores for both sad and lonely; "sad" tips it.
        let detector = EmotionDetector::new();
        assert_eq!(detector.detect_emotion("I'm so sad and lonely"), Emotion::Sad);
    }

    #[test]
    fn stressed_outscores_anxious() {
        let detector = EmotionDetector::new();
        assert_eq!(
            detector.detect_emotion("I'm really stressed about work"),
            Emotion::Stressed
        );
    }

    #[test]
    fn tie_goes_to_earlier_emotion() {
        // "overwhelmed" is one match for both anxious and stressed.
        let detector = EmotionDetector::new();
        assert_eq!(detector.detect_emotion("overwhelmed"), Emotion::Anxious);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let detector = EmotionDetector::new();
        assert_eq!(detector.detect_emotion("FURIOUS right now"), Emotion::Angry);
    }

    #[test]
    fn intensity_thresholds() {
        let detector = EmotionDetector::new();
        assert_eq!(
            detector.emotion_intensity("hello there", Emotion::Sad),
            Intensity::Mild
        );
        assert_eq!(
            detector.emotion_intensity("I feel sad", Emotion::Sad),
            Intensity::Moderate
        );
        assert_eq!(
            detector.emotion_intensity("sad, crying and feeling empty", Emotion::Sad),
            Intensity::Severe
        );
        assert_eq!(
            detector.emotion_intensity("sad sad sad", Emotion::Neutral),
            Intensity::Mild
        );
    }

    #[test]
    fn analyze_reports_confidence() {
        let detector = EmotionDetector::new();
        let reading = detector.analyze("I'm so sad and lonely");
        assert_eq!(reading.primary, Emotion::Sad);
        assert_eq!(reading.intensity, Intensity::Moderate);
        // sad: 2, lonely: 1
        assert!((reading.confidence - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn trend_rules() {
        use Emotion::*;
        assert_eq!(EmotionTrend::from_emotions(&[Sad, Sad]), EmotionTrend::Stable);
        assert_eq!(
            EmotionTrend::from_emotions(&[Sad, Happy, Neutral, Happy]),
            EmotionTrend::Improving
        );
        assert_eq!(
            EmotionTrend::from_emotions(&[Anxious, Neutral, Anxious]),
            EmotionTrend::Declining
        );
        assert_eq!(
            EmotionTrend::from_emotions(&[Angry, Sad, Lonely]),
            EmotionTrend::Stable
        );
    }

    #[test]
    fn with_history_counts_current_reading() {
        let detector = EmotionDetector::new();
        let reading = detector
            .analyze("I feel sad")
            .with_history(&[Emotion::Neutral, Emotion::Sad]);
        assert_eq!(reading.trend, EmotionTrend::Declining);
    }

    #[test]
    fn suggestions_per_emotion() {
        let detector = EmotionDetector::new();
        assert_eq!(detector.emotion_suggestions(Emotion::Anxious).len(), 4);
        assert_eq!(detector.emotion_suggestions(Emotion::Neutral).len(), 1);
    }

    #[test]
    fn title_capitalizes() {
        assert_eq!(Emotion::Lonely.title(), "Lonely");
    }
}
