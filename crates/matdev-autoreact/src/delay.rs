//! Reaction delivery delay policy.

use matdev_core::config::DelayMode;
use matdev_core::message::MessageKind;
use rand::Rng;
use std::ops::RangeInclusive;
use std::time::Duration;

/// Randomized window for chat message reactions, in milliseconds.
pub const MESSAGE_DELAY_MS: RangeInclusive<u64> = 500..=2_500;

/// Randomized window for status reactions (30 s to 5 min), in milliseconds.
pub const STATUS_DELAY_MS: RangeInclusive<u64> = 30_000..=300_000;

/// Milliseconds to wait before delivering a reaction.
///
/// The random source is passed in so callers (and tests) decide how it is seeded.
pub fn schedule_delay<R: Rng + ?Sized>(mode: DelayMode, kind: MessageKind, rng: &mut R) -> u64 {
    match (mode, kind) {
        (DelayMode::Immediate, _) => 0,
        (DelayMode::Randomized, MessageKind::Chat) => rng.gen_range(MESSAGE_DELAY_MS),
        (DelayMode::Randomized, MessageKind::Status) => rng.gen_range(STATUS_DELAY_MS),
    }
}

/// [`schedule_delay`] as a [`Duration`].
pub fn delay_duration<R: Rng + ?Sized>(
    mode: DelayMode,
    kind: MessageKind,
    rng: &mut R,
) -> Duration {
    Duration::from_millis(schedule_delay(mode, kind, rng))
}
