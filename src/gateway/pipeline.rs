//! Per-event pipeline: admin command or auto-reaction.

use super::Gateway;
use crate::commands::{self, Command, CommandContext};
use matdev_autoreact::Dispatch;
use matdev_core::message::{IncomingMessage, MessageKind};
use tracing::{debug, info, warn};

/// What the gateway did with an event.
#[derive(Debug)]
pub enum Outcome {
    /// An admin command ran and its reply was sent.
    Command(Command),
    /// Handed to the reaction engine.
    Reaction(Dispatch),
    /// The event names a channel that is not running.
    UnknownChannel,
}

impl Gateway {
    pub(super) async fn handle_message(&self, incoming: IncomingMessage) -> Outcome {
        let preview = if incoming.text.chars().count() > 60 {
            let truncated: String = incoming.text.chars().take(60).collect();
            format!("{truncated}...")
        } else {
            incoming.text.clone()
        };
        debug!(
            "[{}] {} {} from {}: {}",
            incoming.channel,
            incoming.kind.as_str(),
            incoming.id,
            incoming.sender_name.as_deref().unwrap_or(&incoming.sender_id),
            preview
        );

        let Some(channel) = self.channels.get(&incoming.channel).cloned() else {
            warn!(
                "dropping event {} from unknown channel '{}'",
                incoming.id, incoming.channel
            );
            return Outcome::UnknownChannel;
        };

        // --- 1. ADMIN COMMANDS ---
        // Status updates are never commands.
        if incoming.kind == MessageKind::Chat
            && commands::is_authorized(&incoming, &self.commands_config.owners)
        {
            if let Some(cmd) = Command::parse(&incoming.text, &self.commands_config.prefix) {
                info!(
                    "command {cmd:?} from {} on {}",
                    incoming.sender_id, incoming.channel
                );
                let ctx = CommandContext {
                    engine: &self.engine,
                    prefix: &self.commands_config.prefix,
                    text: &incoming.text,
                };
                let response = commands::handle(cmd, &ctx);
                self.send_text(&incoming, &response).await;
                return Outcome::Command(cmd);
            }
        }

        // --- 2. AUTO-REACT ---
        Outcome::Reaction(self.engine.handle(&incoming, channel))
    }
}
