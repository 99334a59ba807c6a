//! Reply shaping: short, emoji-bearing, with a mood heading.

use crate::emotion::Emotion;

/// Sentences kept from a model reply.
pub const MAX_SENTENCES: usize = 3;

/// Maximum reply length in characters, before decoration.
pub const MAX_CHARS: usize = 300;

/// Trim a raw model reply: first sentences, emoji, length cap.
pub fn polish(raw: &str, emotion: Emotion) -> String {
    let short = shorten(raw);
    let with_emoji = add_emoji(&short, emotion);
    truncate(&with_emoji)
}

/// Keep the first [`MAX_SENTENCES`] sentences.
///
/// A sentence ends at `.`, `!` or `?` followed by spaces.
pub fn shorten(text: &str) -> String {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') && chars.peek().is_some_and(|(_, n)| *n == ' ') {
            sentences.push(&text[start..i + c.len_utf8()]);
            while let Some((_, ' ')) = chars.peek() {
                chars.next();
            }
            start = chars.peek().map(|(j, _)| *j).unwrap_or(text.len());
        }
    }
    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
        .into_iter()
        .take(MAX_SENTENCES)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Append the emotion's emoji unless the text already carries one.
pub fn add_emoji(text: &str, emotion: Emotion) -> String {
    if text.chars().any(is_emoji) {
        return text.to_string();
    }
    format!("{text} {}", emoji_for(emotion))
}

/// Cap at [`MAX_CHARS`] characters, ending in "..." when cut.
pub fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_CHARS {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(MAX_CHARS - 3).collect();
    cut.push_str("...");
    cut
}

/// Escape text for use as HTML element content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap a polished reply with a heading and mood label for the chat page.
///
/// `text` is escaped; only the wrapper is markup.
pub fn decorate(text: &str, emotion: Emotion) -> String {
    let mood = if emotion.is_neutral() {
        "Checking in".to_string()
    } else {
        emotion.title()
    };
    format!(
        "<strong>{}</strong><br><span style='font-size:0.9em;color:#2196F3;'>Mood: {mood}</span><br>{}",
        heading_for(emotion),
        escape_html(text)
    )
}

pub fn heading_for(emotion: Emotion) -> &'static str {
    match emotion {
        Emotion::Anxious => "🌱 Here for You",
        Emotion::Sad => "💙 Gentle Support",
        Emotion::Angry => "🔥 Let's Cool Down",
        Emotion::Stressed => "🧘 Quick Tip",
        Emotion::Lonely => "🤗 You're Not Alone",
        Emotion::Happy => "🌞 Celebrate!",
        Emotion::Confused => "❓ Let's Clarify",
        Emotion::Neutral => "💬 Checking In",
    }
}

pub fn emoji_for(emotion: Emotion) -> &'static str {
    match emotion {
        Emotion::Anxious => "😟",
        Emotion::Sad => "😢",
        Emotion::Angry => "😠",
        Emotion::Stressed => "😣",
        Emotion::Lonely => "🤗",
        Emotion::Happy => "😊",
        Emotion::Confused => "🤔",
        Emotion::Neutral => "💚",
    }
}

// Emoticons, symbols & pictographs, transport & map, regional indicators.
fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F600..=0x1F64F | 0x1F300..=0x1F5FF | 0x1F680..=0x1F6FF | 0x1F1E0..=0x1F1FF
    )
}
