//! Canned replies used when the model cannot answer.

use rand::seq::IndexedRandom;

use crate::emotion::{Emotion, Intensity};

/// Replies for an emotion at a given intensity; `None` for neutral.
fn table(emotion: Emotion, intensity: Intensity) -> Option<&'static [&'static str]> {
    use Intensity::*;
    let replies: &'static [&'static str] = match (emotion, intensity) {
        (Emotion::Anxious, Severe) => &[
            "I can sense you're experiencing intense anxiety right now. Let's take a moment together - try taking three deep breaths with me. Inhale slowly for 4 counts, hold for 4, then exhale for 4. How does that feel?",
            "Your anxiety is really intense right now, and that's completely okay. Sometimes the simple act of being heard can help. Would you like to share what's making you feel this way?",
            "I hear how overwhelming this anxiety feels. Have you tried any grounding techniques? One simple one is to name 5 things you can see, 4 you can touch, 3 you can hear, 2 you can smell, and 1 you can taste.",
        ],
        (Emotion::Anxious, Moderate) => &[
            "I can sense you're feeling anxious right now. That's completely okay. Let's take a moment together - try taking three deep breaths with me. Inhale slowly for 4 counts, hold for 4, then exhale for 4. How does that feel?",
            "Anxiety can be really overwhelming. Remember, it's okay to feel this way. Sometimes talking about what's on your mind can help. Would you like to share what's making you feel anxious?",
            "I hear you're feeling anxious. That's a really tough feeling to sit with. Have you tried any grounding techniques? One simple one is to name 5 things you can see, 4 you can touch, 3 you can hear, 2 you can smell, and 1 you can taste.",
        ],
        (Emotion::Anxious, Mild) => &[
            "I notice you're feeling a bit anxious. That's completely normal. Sometimes just talking about what's on your mind can help. Would you like to share?",
            "It's okay to feel anxious sometimes. Taking a few deep breaths can help. How are you feeling right now?",
            "I'm here to listen if you want to talk about what's making you feel anxious.",
        ],
        (Emotion::Sad, Severe) => &[
            "I'm so sorry you're feeling this deeply sad right now. Your feelings are completely valid, and it's okay to not be okay. Sometimes just acknowledging how we feel can be the first step. Would you like to talk about what's on your mind?",
            "This sadness feels really heavy for you right now. Remember that you're not alone in feeling this way. Sometimes the simple act of expressing our feelings can help lighten the load a little. I'm here to listen.",
            "It sounds like you're going through a really difficult time. Your feelings matter, and it's okay to take time to process them. Sometimes talking to someone we trust can help. Is there someone in your life you feel comfortable reaching out to?",
        ],
        (Emotion::Sad, Moderate) => &[
            "I'm so sorry you're feeling sad right now. Your feelings are valid, and it's okay to not be okay. Sometimes just acknowledging how we feel can be the first step toward feeling better. Would you like to talk about what's on your mind?",
            "Sadness can feel really heavy and isolating. Remember that you're not alone in feeling this way. Sometimes the simple act of expressing our feelings can help lighten the load a little. I'm here to listen.",
            "It sounds like you're going through a really difficult time. Your feelings matter, and it's okay to take time to process them. Sometimes talking to someone we trust can help. Is there someone in your life you feel comfortable reaching out to?",
        ],
        (Emotion::Sad, Mild) => &[
            "It's okay to feel sad sometimes. Your feelings are valid. Would you like to talk about what's on your mind?",
            "I'm here to listen if you want to share what's making you feel this way.",
            "Sometimes just talking about our feelings can help. I'm here to listen.",
        ],
        (Emotion::Angry, Severe) => &[
            "I can hear how intense this anger feels for you right now. It's completely okay to feel angry - it's a normal emotion. Sometimes taking a moment to breathe can help. Would you like to talk about what's making you feel this way?",
            "Your anger is really strong right now, and that's okay. Sometimes finding healthy ways to express anger can help. Would you like to talk about what's going on?",
            "I hear how frustrated and angry you're feeling. It's okay to feel this way. Sometimes talking about what's bothering us can help us process these feelings.",
        ],
        (Emotion::Angry, Moderate) => &[
            "I can hear how angry and frustrated you're feeling. It's completely okay to feel this way. Sometimes taking a moment to breathe can help. Would you like to talk about what's making you feel this way?",
            "Your anger is valid, and it's okay to feel this way. Sometimes finding healthy ways to express anger can help. Would you like to talk about what's going on?",
            "I hear how frustrated you're feeling. It's okay to feel this way. Sometimes talking about what's bothering us can help us process these feelings.",
        ],
        (Emotion::Angry, Mild) => &[
            "It's okay to feel irritated or frustrated. Would you like to talk about what's bothering you?",
            "I'm here to listen if you want to share what's making you feel this way.",
            "Sometimes talking about our frustrations can help. I'm here to listen.",
        ],
        (Emotion::Stressed, Severe) => &[
            "I can hear how overwhelmed and stressed you're feeling. That's completely understandable. Sometimes breaking things down into smaller steps can help. What's one small thing you could do right now that might help you feel a little better?",
            "Stress can feel really overwhelming, like everything is piling up at once. It's okay to feel this way. Sometimes the best thing we can do is give ourselves permission to take a break. Even just a few minutes of deep breathing can help reset our nervous system.",
            "You're dealing with a lot right now, and that stress is completely valid. Remember that it's okay to ask for help and to take things one step at a time. What's one thing that usually helps you feel more grounded when you're stressed?",
        ],
        (Emotion::Stressed, Moderate) => &[
            "Stress can feel really overwhelming, like everything is piling up at once. It's okay to feel this way. Sometimes breaking things down into smaller steps can help. What's one small thing you could do right now that might help you feel a little better?",
            "I can hear how stressed you're feeling. That's completely understandable. Sometimes the best thing we can do is give ourselves permission to take a break. Even just a few minutes of deep breathing can help reset our nervous system.",
            "Stress can make everything feel more difficult than it needs to be. Remember that it's okay to ask for help and to take things one step at a time. What's one thing that usually helps you feel more grounded when you're stressed?",
        ],
        (Emotion::Stressed, Mild) => &[
            "It's normal to feel stressed sometimes. Would you like to talk about what's on your mind?",
            "I'm here to listen if you want to share what's stressing you.",
            "Sometimes talking about our stress can help us feel better. I'm here to listen.",
        ],
        (Emotion::Lonely, Severe) => &[
            "Loneliness can be one of the hardest feelings to sit with, especially when it feels so intense. It's completely normal to feel this way, and your feelings are valid. Sometimes reaching out to someone we trust, even just to say hello, can help. Is there someone you could reach out to?",
            "I hear how deeply lonely you're feeling right now. That's a really difficult place to be. Remember that you're not alone in feeling this way - many people experience loneliness, even when surrounded by others. Sometimes joining a community or group activity can help. What interests you?",
            "Loneliness can feel really isolating and overwhelming. It's okay to feel this way. Sometimes the simple act of being heard can help us feel less alone. I'm here to listen, and I want you to know that your feelings matter.",
        ],
        (Emotion::Lonely, Moderate) => &[
            "Loneliness can be one of the hardest feelings to sit with. It's completely normal to feel this way, and your feelings are valid. Sometimes reaching out to someone we trust, even just to say hello, can help. Is there someone you could reach out to?",
            "I hear how lonely you're feeling right now. That's a really difficult place to be. Remember that you're not alone in feeling this way - many people experience loneliness, even when surrounded by others. Sometimes joining a community or group activity can help. What interests you?",
            "Loneliness can feel really isolating. It's okay to feel this way. Sometimes the simple act of being heard can help us feel less alone. I'm here to listen, and I want you to know that your feelings matter.",
        ],
        (Emotion::Lonely, Mild) => &[
            "It's okay to feel lonely sometimes. Would you like to talk about what's on your mind?",
            "I'm here to listen if you want to share what's making you feel this way.",
            "Sometimes talking about our feelings can help. I'm here to listen.",
        ],
        (Emotion::Happy, Severe) => &[
            "I'm so glad you're feeling this happy! It's wonderful to see you in such a positive state. What's contributing to this good feeling?",
            "Your joy is contagious! It's great to see you feeling so positive. How can we build on this good energy?",
            "This happiness sounds really wonderful! What's making you feel this way? I'd love to hear more about it.",
        ],
        (Emotion::Happy, Moderate) => &[
            "It's great to see you in a positive mood! What's contributing to this good feeling?",
            "I'm glad you're feeling good. How can we build on this positive energy?",
            "It's wonderful to see you feeling positive. What's on your mind?",
        ],
        (Emotion::Happy, Mild) => &[
            "It's good to see you feeling okay. How are things going?",
            "I'm glad you're doing alright. What's on your mind?",
            "It's nice to see you in a good mood. How can I support you today?",
        ],
        (Emotion::Confused, Severe) => &[
            "I can hear how confused and uncertain you're feeling right now. That's completely okay - sometimes things can feel really unclear. Would you like to talk through what's on your mind? Sometimes just talking about our thoughts can help clarify them.",
            "It sounds like you're feeling really uncertain about things right now. That's a difficult place to be. Sometimes taking time to sit with our feelings without judgment can help. What's on your mind?",
            "Confusion can feel really overwhelming when it's this intense. Remember that it's okay to not have all the answers right now. Sometimes talking to someone we trust can help us sort through our thoughts.",
        ],
        (Emotion::Confused, Moderate) => &[
            "I can hear how confused and uncertain you're feeling. That's completely okay - sometimes things can feel really unclear. Would you like to talk through what's on your mind? Sometimes just talking about our thoughts can help clarify them.",
            "It sounds like you're feeling uncertain about things right now. That's a difficult place to be. Sometimes taking time to sit with our feelings without judgment can help. What's on your mind?",
            "Confusion can feel really overwhelming. Remember that it's okay to not have all the answers right now. Sometimes talking to someone we trust can help us sort through our thoughts.",
        ],
        (Emotion::Confused, Mild) => &[
            "It's okay to feel uncertain sometimes. Would you like to talk about what's on your mind?",
            "I'm here to listen if you want to share what's making you feel this way.",
            "Sometimes talking through our thoughts can help clarify them. I'm here to listen.",
        ],
        (Emotion::Neutral, _) => return None,
    };
    Some(replies)
}

/// Random canned reply for the emotion and intensity; `None` for neutral.
pub fn canned_reply(emotion: Emotion, intensity: Intensity) -> Option<&'static str> {
    table(emotion, intensity)?.choose(&mut rand::rng()).copied()
}
