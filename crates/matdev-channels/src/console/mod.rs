//! Console channel: events on stdin, replies and reactions on stdout.
//!
//! Each stdin line is either a JSON-encoded `IncomingMessage` (useful for
//! simulating status updates or group chats) or plain text, which becomes a
//! direct chat message from the configured sender.


use async_trait::async_trait;
use matdev_core::{
    config::ConsoleConfig,
    error::MatdevError,
    message::{IncomingMessage, OutgoingMessage, OutgoingReaction},
    traits::Channel,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

/// Local stdin/stdout channel.
pub struct ConsoleChannel {
    config: ConsoleConfig,
    stopped: Arc<AtomicBool>,
}

impl ConsoleChannel {
    pub fn new(config: ConsoleConfig) -> Self {
        Self {
            config,
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }
}

/// Turn one input line into an event. Blank lines yield nothing.
pub(crate) fn parse_line(line: &str, sender_id: &str) -> Option<IncomingMessage> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with('{') {
        match serde_json::from_str::<IncomingMessage>(trimmed) {
            Ok(mut msg) => {
                if msg.channel.is_empty() {
                    msg.channel = "console".to_string();
                }
                return Some(msg);
            }
            Err(e) => debug!("console line is not a JSON event, treating as text: {e}"),
        }
    }

    Some(IncomingMessage {
        id: Uuid::new_v4().to_string(),
        channel: "console".to_string(),
        sender_id: sender_id.to_string(),
        sender_name: None,
        text: trimmed.to_string(),
        timestamp: chrono::Utc::now(),
        reply_target: Some(sender_id.to_string()),
        is_group: false,
        from_me: false,
        kind: Default::default(),
    })
}

/// Human-readable line printed for a delivered reaction.
pub(crate) fn format_reaction(reaction: &OutgoingReaction) -> String {
    match reaction.key.participant {
        Some(ref author) => format!(
            "[reaction] {} -> {} in {} (by {author})",
            reaction.emoji, reaction.key.id, reaction.target
        ),
        None => format!(
            "[reaction] {} -> {} in {}",
            reaction.emoji, reaction.key.id, reaction.target
        ),
    }
}

#[async_trait]
impl Channel for ConsoleChannel {
    fn name(&self) -> &str {
        "console"
    }

    async fn start(&self) -> Result<mpsc::Receiver<IncomingMessage>, MatdevError> {
        let (tx, rx) = mpsc::channel(64);
        let sender_id = self.config.sender_id.clone();
        let stopped = self.stopped.clone();

        info!("Console channel reading stdin as {sender_id}");

        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                let line = match lines.next_line().await {
                    Ok(Some(l)) => l,
                    Ok(None) => {
                        info!("console stdin closed");
                        break;
                    }
                    Err(e) => {
                        tracing::error!("console read error: {e}");
                        break;
                    }
                };
                if stopped.load(Ordering::Relaxed) {
                    break;
                }
                let Some(msg) = parse_line(&line, &sender_id) else {
                    continue;
                };
                if tx.send(msg).await.is_err() {
                    info!("console channel receiver dropped");
                    break;
                }
            }
        });

        Ok(rx)
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), MatdevError> {
        println!("{}", message.text);
        Ok(())
    }

    async fn send_reaction(&self, reaction: OutgoingReaction) -> Result<(), MatdevError> {
        println!("{}", format_reaction(&reaction));
        Ok(())
    }

    async fn stop(&self) -> Result<(), MatdevError> {
        self.stopped.store(true, Ordering::Relaxed);
        info!("Console channel stopped");
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
