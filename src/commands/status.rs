//! Informational commands: mood, help.

use matdev_autoreact::{classify, score, SentimentScore};

pub(crate) fn format_score(s: &SentimentScore) -> String {
    format!(
        "love={} sad={} angry={} laugh={} (!={} caps={} question={})",
        s.love, s.sad, s.angry, s.laugh, s.exclamations, s.caps_tokens, s.has_question
    )
}

/// Handle `mood <text>`: show what the classifier makes of a text.
pub(super) fn handle_mood(text: &str, prefix: &str) -> String {
    match classify(text) {
        Some(mood) => format!(
            "{} {}\n{}",
            mood.glyph(),
            mood.as_str(),
            format_score(&score(text))
        ),
        None => format!("Usage: {prefix}mood <text>"),
    }
}

pub(super) fn handle_help(prefix: &str) -> String {
    format!(
        "Commands\n\n\
         {prefix}autoreact - show auto-react settings\n\
         {prefix}autoreact on|off - react to chat messages\n\
         {prefix}autoreact status on|off - react to status updates\n\
         {prefix}autoreact delay on|off - randomized delay for chat reactions\n\
         {prefix}autoreact delay status on|off - randomized delay for status reactions\n\
         {prefix}mood <text> - classify a text\n\
         {prefix}help - this list"
    )
}
