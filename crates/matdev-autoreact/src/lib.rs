//! Auto-reaction for incoming chat messages and status updates.
//!
//! [`sentiment`] picks a glyph, [`delay`] decides when to send it, [`ledger`]
//! keeps status reactions from firing twice, and [`engine`] ties them together.

pub mod delay;
pub mod engine;
pub mod ledger;
pub mod lexicon;
pub mod sentiment;

pub use engine::{Dispatch, ReactionEngine, SettingChange, SkipReason};
pub use sentiment::{classify, score, Mood, SentimentScore};
