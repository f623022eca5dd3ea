//! Keyword-weighted sentiment scorer.
//!
//! Scores a message into four buckets (love, sad, angry, laugh) and picks the
//! reaction glyph of the strongest one, falling back to a neutral thumbs-up.

use crate::lexicon::*;
use serde::Serialize;

/// Minimum bucket score needed before a mood beats the neutral fallback.
pub const MOOD_THRESHOLD: u32 = 2;

/// Flat boost for each marker group present in the text.
const MARKER_BOOST: u32 = 3;

/// Reaction bucket chosen for a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Love,
    Sad,
    Angry,
    Laugh,
    Neutral,
}

impl Mood {
    /// Reaction emoji sent for this mood.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Love => "\u{2764}\u{fe0f}", // ❤️
            Self::Sad => "\u{1f622}",         // 😢
            Self::Angry => "\u{1f620}",       // 😠
            Self::Laugh => "\u{1f602}",       // 😂
            Self::Neutral => "\u{1f44d}",     // 👍
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Love => "love",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Laugh => "laugh",
            Self::Neutral => "neutral",
        }
    }
}

/// Per-call scoring state. Buckets only ever grow while scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SentimentScore {
    pub love: u32,
    pub sad: u32,
    pub angry: u32,
    pub laugh: u32,
    pub exclamations: u32,
    pub caps_tokens: u32,
    pub has_question: bool,
}

impl SentimentScore {
    pub fn max(&self) -> u32 {
        self.love.max(self.sad).max(self.angry).max(self.laugh)
    }

    /// Pick the winning mood. Ties resolve love > sad > angry > laugh.
    pub fn mood(&self) -> Mood {
        let max = self.max();
        if max >= MOOD_THRESHOLD {
            let ordered = [
                (self.love, Mood::Love),
                (self.sad, Mood::Sad),
                (self.angry, Mood::Angry),
                (self.laugh, Mood::Laugh),
            ];
            if let Some((_, mood)) = ordered.into_iter().find(|(s, _)| *s == max) {
                return mood;
            }
        }
        // Questions with weak signal get the same thumbs-up as everything else.
        Mood::Neutral
    }
}

/// Score `text` without deciding on a mood.
pub fn score(text: &str) -> SentimentScore {
    let lower = text.to_lowercase();
    let mut s = SentimentScore {
        love: keyword_score(&lower, LOVE_KW, 6),
        sad: keyword_score(&lower, SAD_KW, 6),
        angry: keyword_score(&lower, ANGRY_KW, 4),
        laugh: keyword_score(&lower, LAUGH_KW, 4),
        ..Default::default()
    };

    s.exclamations = text.matches('!').count() as u32;
    s.love += s.exclamations;
    s.angry += s.exclamations;
    s.laugh += s.exclamations;

    s.caps_tokens = count_caps_tokens(text);
    s.angry += 2 * s.caps_tokens;
    s.love += s.caps_tokens;

    if has_marker(text, SAD_MARKERS) {
        s.sad += MARKER_BOOST;
    }
    if has_marker(text, LAUGH_MARKERS) {
        s.laugh += MARKER_BOOST;
    }
    if has_marker(text, LOVE_MARKERS) {
        s.love += MARKER_BOOST;
    }
    if has_marker(text, ANGRY_MARKERS) {
        s.angry += MARKER_BOOST;
    }

    s.has_question = text.contains('?');
    s
}

/// Classify a message body. Empty text yields no decision.
pub fn classify(text: &str) -> Option<Mood> {
    if text.is_empty() {
        return None;
    }
    Some(score(text).mood())
}

/// Sum keyword weights: 2 for keywords longer than `long_after` chars, else 1.
fn keyword_score(lower: &str, keywords: &[&str], long_after: usize) -> u32 {
    keywords
        .iter()
        .filter(|kw| lower.contains(*kw))
        .map(|kw| if kw.chars().count() > long_after { 2 } else { 1 })
        .sum()
}

/// Count words of two or more letters written entirely in uppercase.
fn count_caps_tokens(text: &str) -> u32 {
    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|w| w.len() >= 2 && w.chars().all(|c| c.is_ascii_uppercase()))
        .count() as u32
}

fn has_marker(text: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| text.contains(m))
}
