//! Crisis detection: keyword screening of user messages.
//!
//! Messages are screened against two phrase lists. A high-risk phrase
//! short-circuits the chat flow into the emergency response; a medium-risk
//! phrase is passed to the model as extra context.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

const HIGH_CRISIS_PHRASES: &[&str] = &[
    "kill myself",
    "want to die",
    "end my life",
    "suicide",
    "kill me",
    "i want to die",
    "i'm worthless",
    "no one cares",
    "everyone would be better off",
    "i can't take it anymore",
    "i give up",
    "i'm done",
    "goodbye forever",
    "self harm",
    "cut myself",
    "hurt myself",
    "bleed out",
    "overdose",
    "take pills",
    "swallow pills",
    "hang myself",
    "jump off",
    "crash my car",
];

const MEDIUM_CRISIS_PHRASES: &[&str] = &[
    "i hate myself",
    "i'm a failure",
    "i can't do this",
    "i'm hopeless",
    "nothing matters",
    "i'm alone",
    "no one understands",
    "i'm tired of living",
    "i feel empty",
    "i'm broken",
    "i can't cope",
    "i'm overwhelmed",
    "i don't want to be here",
    "i wish i was dead",
    "life is pointless",
];

const CRISIS_RESPONSE: &str = "I'm really concerned about what you're sharing with me, and I want you to know that your life has value and you matter.

If you're having thoughts of harming yourself, please know that help is available right now:

🆘 **Immediate Help:**
• National Suicide Prevention Lifeline: 988 (available 24/7)
• Crisis Text Line: Text HOME to 741741
• Emergency Services: 911

You don't have to go through this alone. There are people who care about you and want to help. Please reach out to one of these resources, or talk to someone you trust - a friend, family member, teacher, or mental health professional.

Your feelings are valid, and it's okay to ask for help. You deserve support and care. I'm here to listen, but please also connect with someone who can provide immediate support.

Would you like to talk more about what's going on? I'm here to listen.";

const MEDIUM_CRISIS_RESPONSE: &str = "I can hear that you're really struggling right now, and I want you to know that your feelings are valid. It sounds like you're going through a very difficult time.

While I'm here to listen and support you, it might be helpful to also talk to someone who can provide more specialized support:

💙 **Support Options:**
• Talk to a trusted friend or family member
• Consider speaking with a mental health professional
• Call a helpline to talk to someone trained to help

You don't have to face this alone. Sometimes the bravest thing we can do is ask for help. Your feelings matter, and you deserve support.

Would you like to talk more about what's going on? I'm here to listen.";

/// Severity of crisis indicators found in a message.
///
/// `Low` means no indicator matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrisisLevel {
    Low,
    Medium,
    High,
}

impl CrisisLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrisisLevel::Low => "low",
            CrisisLevel::Medium => "medium",
            CrisisLevel::High => "high",
        }
    }
}

impl fmt::Display for CrisisLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of crisis levels across recent turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrisisTrend {
    Stable,
    Escalating,
    Improving,
}

impl CrisisTrend {
    /// Trend over a chronological list of levels, judged on the last three.
    pub fn from_levels(levels: &[CrisisLevel]) -> Self {
        if levels.len() < 3 {
            return CrisisTrend::Stable;
        }
        let recent = &levels[levels.len() - 3..];
        if recent.contains(&CrisisLevel::High) {
            CrisisTrend::Escalating
        } else if recent.iter().filter(|l| **l == CrisisLevel::Low).count() >= 2 {
            CrisisTrend::Improving
        } else {
            CrisisTrend::Stable
        }
    }
}

/// Crisis level for the current message plus conversation context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CrisisAssessment {
    pub level: CrisisLevel,
    pub trend: CrisisTrend,
    pub escalation_needed: bool,
}

impl CrisisAssessment {
    pub fn is_concerning(&self) -> bool {
        self.level > CrisisLevel::Low
    }
}

/// What a helper should do when a person is at risk.
#[derive(Debug, Clone, Serialize)]
pub struct EscalationGuidance {
    pub immediate_actions: Vec<&'static str>,
    pub hotlines: BTreeMap<&'static str, &'static str>,
    pub warning_signs: Vec<&'static str>,
}

/// Keyword-based crisis screener.
#[derive(Debug, Clone, Default)]
pub struct CrisisFilter;

impl CrisisFilter {
    pub fn new() -> Self {
        Self
    }

    /// Classify a message. High-risk phrases are checked before medium ones.
    pub fn detect_crisis(&self, message: &str) -> CrisisLevel {
        let normalized = normalize(message);
        if HIGH_CRISIS_PHRASES.iter().any(|p| normalized.contains(p)) {
            return CrisisLevel::High;
        }
        if MEDIUM_CRISIS_PHRASES.iter().any(|p| normalized.contains(p)) {
            return CrisisLevel::Medium;
        }
        CrisisLevel::Low
    }

    /// Classify a message against the levels of earlier turns (oldest first).
    pub fn assess(&self, message: &str, previous: &[CrisisLevel]) -> CrisisAssessment {
        let level = self.detect_crisis(message);
        let mut levels = previous.to_vec();
        levels.push(level);
        CrisisAssessment {
            level,
            trend: CrisisTrend::from_levels(&levels),
            escalation_needed: level == CrisisLevel::High,
        }
    }

    pub fn should_escalate(&self, message: &str) -> bool {
        self.detect_crisis(message) == CrisisLevel::High
    }

    /// Emergency response sent instead of a model reply.
    pub fn crisis_response(&self) -> &'static str {
        CRISIS_RESPONSE
    }

    pub fn medium_crisis_response(&self) -> &'static str {
        MEDIUM_CRISIS_RESPONSE
    }

    pub fn escalation_guidance(&self) -> EscalationGuidance {
        EscalationGuidance {
            immediate_actions: vec![
                "Stay with the person if possible",
                "Remove any means of self-harm",
                "Call emergency services if immediate danger",
                "Contact crisis hotline",
            ],
            hotlines: hotlines(),
            warning_signs: vec![
                "Talking about wanting to die",
                "Looking for ways to kill themselves",
                "Talking about feeling hopeless",
                "Talking about being a burden",
                "Increasing alcohol or drug use",
                "Acting anxious or agitated",
                "Sleeping too little or too much",
                "Withdrawing or feeling isolated",
            ],
        }
    }
}

/// Crisis hotlines shared by the guidance and resources endpoints.
pub fn hotlines() -> BTreeMap<&'static str, &'static str> {
    BTreeMap::from([
        ("suicide_prevention", "988"),
        ("crisis_text", "Text HOME to 741741"),
        ("emergency", "911"),
    ])
}

fn normalize(message: &str) -> String {
    message.to_lowercase().replace('\u{2019}', "'")
}
