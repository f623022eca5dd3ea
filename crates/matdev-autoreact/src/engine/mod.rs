//! Reaction engine: decides whether, how, and when to react to an event.
//!
//! Flow per event: classify the text, check enablement/authorship/de-dup,
//! pick a delay, then deliver from a spawned task that owns everything it needs.


use crate::delay::schedule_delay;
use crate::ledger::{sweep_loop, DedupKey, DeliveryLedger};
use crate::sentiment::{classify, Mood};
use matdev_core::config::{patch_autoreact, AutoReactConfig, DelayMode};
use matdev_core::message::{IncomingMessage, MessageKind, OutgoingReaction};
use matdev_core::traits::Channel;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Why an event did not get a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Reactions are switched off for this kind of event.
    Disabled,
    /// The bot authored the event itself.
    OwnMessage,
    /// Nothing to classify.
    NoText,
    /// A reaction for this status is already scheduled or sent.
    Duplicate,
}

/// Result of handing an event to the engine.
#[derive(Debug)]
pub enum Dispatch {
    Skipped(SkipReason),
    Scheduled {
        mood: Mood,
        delay_ms: u64,
        /// Delivery task. Runs to completion even if the handle is dropped.
        task: JoinHandle<()>,
    },
}

/// A single runtime settings change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingChange {
    MessageReactions(bool),
    StatusReactions(bool),
    MessageDelay(DelayMode),
    StatusDelay(DelayMode),
}

/// Owns the runtime auto-react settings and the status de-dup ledger.
pub struct ReactionEngine {
    config: RwLock<AutoReactConfig>,
    ledger: Arc<DeliveryLedger>,
    /// Where setting changes are persisted. `None` keeps them in memory only.
    config_path: Option<String>,
}

impl ReactionEngine {
    pub fn new(config: AutoReactConfig, config_path: Option<String>) -> Self {
        Self {
            config: RwLock::new(config),
            ledger: Arc::new(DeliveryLedger::new()),
            config_path,
        }
    }

    /// Snapshot of the current settings.
    pub fn config(&self) -> AutoReactConfig {
        *self.config.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn ledger(&self) -> &Arc<DeliveryLedger> {
        &self.ledger
    }

    /// Apply setting changes, persist them, and return the new settings.
    ///
    /// Persistence failures are logged; the in-memory change still holds.
    pub fn update(&self, changes: &[SettingChange]) -> AutoReactConfig {
        // Held across the file write so the file always matches the last
        // change applied in memory.
        let mut cfg = self.config.write().unwrap_or_else(|e| e.into_inner());
        for change in changes {
            match *change {
                SettingChange::MessageReactions(on) => cfg.message_reactions = on,
                SettingChange::StatusReactions(on) => cfg.status_reactions = on,
                SettingChange::MessageDelay(mode) => cfg.message_delay = mode,
                SettingChange::StatusDelay(mode) => cfg.status_delay = mode,
            }
        }
        let updated = *cfg;

        info!(
            "autoreact settings updated: message={} status={} message_delay={} status_delay={}",
            updated.message_reactions,
            updated.status_reactions,
            updated.message_delay.as_str(),
            updated.status_delay.as_str()
        );

        if let Some(ref path) = self.config_path {
            if let Err(e) = patch_autoreact(path, &updated) {
                warn!("failed to persist autoreact settings to {path}: {e}");
            }
        }
        updated
    }

    /// Whether `event` may be reacted to.
    ///
    /// For status events this also claims the de-dup key, before any delay is
    /// awaited, so a second copy arriving during the delay is rejected.
    pub fn should_react(&self, event: &IncomingMessage) -> bool {
        self.check(event, &self.config()).is_ok()
    }

    fn check(&self, event: &IncomingMessage, cfg: &AutoReactConfig) -> Result<(), SkipReason> {
        if !cfg.enabled_for(event.kind) {
            return Err(SkipReason::Disabled);
        }
        if event.from_me {
            return Err(SkipReason::OwnMessage);
        }
        if event.kind == MessageKind::Status && !self.ledger.claim(dedup_key(event)) {
            return Err(SkipReason::Duplicate);
        }
        Ok(())
    }

    /// Classify `event` and, if allowed, schedule the reaction on `channel`.
    pub fn handle(&self, event: &IncomingMessage, channel: Arc<dyn Channel>) -> Dispatch {
        let Some(mood) = classify(&event.text) else {
            return Dispatch::Skipped(SkipReason::NoText);
        };

        let cfg = self.config();
        if let Err(reason) = self.check(event, &cfg) {
            debug!(
                "autoreact skip {} {} from {}: {reason:?}",
                event.kind.as_str(),
                event.id,
                event.sender_id
            );
            return Dispatch::Skipped(reason);
        }

        let delay_ms = schedule_delay(
            cfg.delay_for(event.kind),
            event.kind,
            &mut rand::thread_rng(),
        );

        let key = event.key();
        let reaction = OutgoingReaction {
            target: key.remote_jid.clone(),
            emoji: mood.glyph().to_string(),
            key,
        };
        let rollback = match event.kind {
            MessageKind::Status => Some((self.ledger.clone(), dedup_key(event))),
            MessageKind::Chat => None,
        };

        debug!(
            "autoreact: {} {} -> {} in {delay_ms}ms",
            event.kind.as_str(),
            event.id,
            mood.as_str()
        );

        let task = tokio::spawn(deliver(
            channel,
            reaction,
            Duration::from_millis(delay_ms),
            rollback,
        ));

        Dispatch::Scheduled {
            mood,
            delay_ms,
            task,
        }
    }

    /// Spawn the periodic bulk purge of the de-dup ledger.
    pub fn spawn_sweeper(&self) -> JoinHandle<()> {
        let interval = sweep_interval(self.config().ledger_sweep_hours);
        tokio::spawn(sweep_loop(self.ledger.clone(), interval))
    }
}

/// Sweep period for `hours`, at least one hour.
fn sweep_interval(hours: u64) -> Duration {
    Duration::from_secs(hours.max(1).saturating_mul(3600))
}

fn dedup_key(event: &IncomingMessage) -> DedupKey {
    DedupKey::new(event.sender_id.as_str(), event.id.as_str())
}

/// Wait out the delay, then send. Failed status deliveries release their key.
async fn deliver(
    channel: Arc<dyn Channel>,
    reaction: OutgoingReaction,
    delay: Duration,
    rollback: Option<(Arc<DeliveryLedger>, DedupKey)>,
) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    match channel.send_reaction(reaction.clone()).await {
        Ok(()) => {
            info!(
                "reacted {} to {} on {}",
                reaction.emoji,
                reaction.key.id,
                channel.name()
            );
        }
        Err(e) => {
            warn!(
                "reaction to {} on {} failed: {e}",
                reaction.key.id,
                channel.name()
            );
            if let Some((ledger, key)) = rollback {
                ledger.release(&key);
            }
        }
    }
}
