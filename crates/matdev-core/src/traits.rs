use crate::{
    error::MatdevError,
    message::{IncomingMessage, OutgoingMessage, OutgoingReaction},
};
use async_trait::async_trait;

/// Messaging Channel trait.
///
/// Every message source (console, WhatsApp bridge, ...) implements this
/// trait to receive events and deliver replies and reactions.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Start listening for incoming events.
    /// Returns a receiver that yields incoming messages.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<IncomingMessage>, MatdevError>;

    /// Send a text reply back through this channel.
    async fn send(&self, message: OutgoingMessage) -> Result<(), MatdevError>;

    /// React to an existing message with an emoji.
    async fn send_reaction(&self, _reaction: OutgoingReaction) -> Result<(), MatdevError> {
        Err(MatdevError::Channel(format!(
            "{} does not support reactions",
            self.name()
        )))
    }

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), MatdevError>;

    /// Downcast support for channel-specific operations.
    fn as_any(&self) -> &dyn std::any::Any;
}
