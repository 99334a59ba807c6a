//! Prompt assembly for the chat model.

use crate::crisis::{CrisisAssessment, CrisisLevel, CrisisTrend};
use crate::emotion::{Emotion, EmotionReading, EmotionTrend};
use crate::llm::{ChatMessage, Role};

/// Number of earlier turns forwarded to the model.
pub const HISTORY_WINDOW: usize = 10;

pub const SYSTEM_PROMPT: &str = r#"You are "Just We," a supportive, empathetic mental health assistant. Always sound human, warm, and natural (never robotic). Keep responses short and concise (1-3 sentences max). Use relevant emojis in every response (1-2 per message, placed naturally).

Your capabilities include:
- Emotion-Aware Responses: Adapt your tone and approach based on the user's emotional state
- Crisis Intervention: Recognize crisis situations and provide appropriate resources
- Personalized Support: Tailor responses to individual needs and preferences
- Multi-Turn Memory: Remember context from previous messages in the conversation

Your role is to:
- Listen actively and non-judgmentally
- Ask gentle, open-ended questions that encourage reflection
- Offer grounding exercises and coping strategies
- Provide emotional validation and support
- Recommend professional help when appropriate
- Maintain consistent, caring presence throughout conversations

Response Guidelines:
- For Crisis Situations: Provide immediate resources and encourage professional help
- For High Emotion: Offer immediate grounding and support
- For Moderate Distress: Provide coping strategies and validation
- For Positive Emotions: Celebrate and encourage continued positive activities
- For Neutral States: Maintain supportive presence and gentle engagement

Tone Guidelines:
- Warm, kind, and reassuring
- Never robotic or overly cheerful
- Respectful and non-judgmental
- Adapt tone to match user's emotional intensity
- Use simple, clear language

Always end your response with a gentle invitation to continue the conversation."#;

/// Build the full message list sent to the model.
pub fn prepare_context(
    message: &str,
    history: &[ChatMessage],
    emotion: &EmotionReading,
    crisis: &CrisisAssessment,
) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::system(SYSTEM_PROMPT)];

    if !emotion.primary.is_neutral() {
        messages.push(ChatMessage::system(emotion_context(emotion)));
    }
    if crisis.is_concerning() {
        messages.push(ChatMessage::system(crisis_context(crisis)));
    }

    let usable: Vec<&ChatMessage> = history
        .iter()
        .filter(|m| m.role != Role::System && !m.content.trim().is_empty())
        .collect();
    let start = usable.len().saturating_sub(HISTORY_WINDOW);
    for turn in &usable[start..] {
        messages.push(annotate_turn(turn, emotion));
    }

    messages.push(ChatMessage::user(message));
    messages
}

fn annotate_turn(turn: &ChatMessage, emotion: &EmotionReading) -> ChatMessage {
    if turn.role == Role::User && !emotion.primary.is_neutral() {
        ChatMessage::user(format!(
            "[User appears {} with {} intensity] {}",
            emotion.primary, emotion.intensity, turn.content
        ))
    } else {
        turn.clone()
    }
}

/// Emotion guidance for the model.
pub fn emotion_context(reading: &EmotionReading) -> String {
    let intensity = reading.intensity;
    let mut context = format!(
        "EMOTION CONTEXT: The user appears to be feeling {} with {} intensity (confidence: {:.2}). ",
        reading.primary, intensity, reading.confidence
    );

    match reading.trend {
        EmotionTrend::Improving => context.push_str("Their emotional state appears to be improving. "),
        EmotionTrend::Declining => context.push_str(
            "Their emotional state appears to be declining and may need increased support. ",
        ),
        EmotionTrend::Stable => {}
    }

    let guidance = match reading.primary {
        Emotion::Anxious => format!("Focus on grounding techniques, breathing exercises, and reassurance. Offer immediate support for {intensity} anxiety."),
        Emotion::Sad => format!("Offer comfort, validation, and gentle encouragement. Provide support appropriate for {intensity} sadness."),
        Emotion::Angry => format!("Acknowledge their feelings and help them find healthy ways to express anger. Address {intensity} anger appropriately."),
        Emotion::Stressed => format!("Help them break things down and find coping strategies. Provide support for {intensity} stress."),
        Emotion::Lonely => format!("Offer connection and suggest reaching out to others. Address {intensity} loneliness with appropriate support."),
        Emotion::Happy => format!("Celebrate their positive emotions and encourage continued positive activities. Support their {intensity} positive state."),
        Emotion::Confused => format!("Help them clarify their thoughts and feelings. Provide guidance for {intensity} confusion."),
        Emotion::Neutral => "Provide appropriate support for their emotional state.".to_string(),
    };
    context.push_str(&guidance);
    context
}

/// Crisis guidance for the model.
pub fn crisis_context(crisis: &CrisisAssessment) -> String {
    let mut context = format!("CRISIS CONTEXT: User shows {} crisis indicators. ", crisis.level);

    if crisis.escalation_needed {
        context.push_str("IMMEDIATE ESCALATION NEEDED. ");
    }
    match crisis.trend {
        CrisisTrend::Escalating => context.push_str("Crisis level appears to be escalating. "),
        CrisisTrend::Improving => context.push_str("Crisis level appears to be improving. "),
        CrisisTrend::Stable => {}
    }

    context.push_str(match crisis.level {
        CrisisLevel::High => {
            "Provide crisis resources and encourage professional help. Offer immediate support."
        }
        CrisisLevel::Medium => {
            "Offer support and suggest professional help if needed. Monitor for escalation."
        }
        CrisisLevel::Low => "Provide gentle support and monitor for changes.",
    });
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::Intensity;

    fn sad() -> EmotionReading {
        EmotionReading {
            primary: Emotion::Sad,
            intensity: Intensity::Moderate,
            confidence: 0.5,
            trend: EmotionTrend::Declining,
        }
    }

    fn calm() -> CrisisAssessment {
        CrisisAssessment {
            level: CrisisLevel::Low,
            trend: CrisisTrend::Stable,
            escalation_needed: false,
        }
    }

    #[test]
    fn neutral_low_context_is_prompt_plus_message() {
        let messages = prepare_context("hi", &[], &EmotionReading::neutral(), &calm());
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, SYSTEM_PROMPT);
        assert_eq!(messages[1], ChatMessage::user("hi"));
    }

    #[test]
    fn emotion_and_crisis_context_added() {
        let crisis = CrisisAssessment {
            level: CrisisLevel::Medium,
            trend: CrisisTrend::Escalating,
            escalation_needed: false,
        };
        let messages = prepare_context("hi", &[], &sad(), &crisis);
        assert_eq!(messages.len(), 4);
        assert!(messages[1].content.starts_with(
            "EMOTION CONTEXT: The user appears to be feeling sad with moderate intensity (confidence: 0.50)."
        ));
        assert!(messages[1].content.contains("declining"));
        assert!(messages[2].content.starts_with("CRISIS CONTEXT: User shows medium crisis indicators."));
        assert!(messages[2].content.contains("escalating"));
    }

    #[test]
    fn history_window_keeps_last_ten() {
        let history: Vec<ChatMessage> = (0..14)
            .map(|i| ChatMessage::assistant(format!("turn {i}")))
            .collect();
        let messages = prepare_context("now", &history, &EmotionReading::neutral(), &calm());
        assert_eq!(messages.len(), 1 + HISTORY_WINDOW + 1);
        assert_eq!(messages[1].content, "turn 4");
    }

    #[test]
    fn user_turns_annotated_with_emotion() {
        let history = vec![
            ChatMessage::user("I feel off"),
            ChatMessage::assistant("Tell me more"),
            ChatMessage::user("   "),
            ChatMessage::system("ignored"),
        ];
        let messages = prepare_context("still sad", &history, &sad(), &calm());
        // prompt, emotion context, two usable turns, message
        assert_eq!(messages.len(), 5);
        assert_eq!(
            messages[2].content,
            "[User appears sad with moderate intensity] I feel off"
        );
        assert_eq!(messages[3].content, "Tell me more");
    }

    #[test]
    fn escalation_flag_in_crisis_context() {
        let crisis = CrisisAssessment {
            level: CrisisLevel::High,
            trend: CrisisTrend::Stable,
            escalation_needed: true,
        };
        let context = crisis_context(&crisis);
        assert!(context.contains("IMMEDIATE ESCALATION NEEDED."));
        assert!(context.ends_with("Offer immediate support."));
    }
}
