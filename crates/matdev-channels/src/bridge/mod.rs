//! HTTP bridge channel.
//!
//! The WhatsApp protocol itself is spoken by an external bridge process. This
//! channel delivers replies and reactions to it over HTTP; inbound events are
//! pushed by the bridge to the gateway API and fed in through [`BridgeChannel::inbound`].

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use matdev_core::{
    config::BridgeConfig,
    error::MatdevError,
    message::{IncomingMessage, OutgoingMessage, OutgoingReaction},
    traits::Channel,
};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info};

/// Upper bound for text replies. Reactions carry no timeout.
const SEND_TIMEOUT: Duration = Duration::from_secs(15);

/// Body of `POST {base_url}/send`.
#[derive(Debug, Serialize)]
pub(crate) struct SendBody<'a> {
    pub to: &'a str,
    pub text: &'a str,
}

/// Body of `POST {base_url}/react`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReactBody<'a> {
    pub chat_jid: &'a str,
    pub message_id: &'a str,
    pub participant: Option<&'a str>,
    pub from_me: bool,
    pub emoji: &'a str,
}

impl<'a> From<&'a OutgoingReaction> for ReactBody<'a> {
    fn from(r: &'a OutgoingReaction) -> Self {
        Self {
            chat_jid: &r.target,
            message_id: &r.key.id,
            participant: r.key.participant.as_deref(),
            from_me: r.key.from_me,
            emoji: &r.emoji,
        }
    }
}

/// Channel backed by an external WhatsApp bridge.
pub struct BridgeChannel {
    config: BridgeConfig,
    client: reqwest::Client,
    base_url: String,
    send_timeout: Duration,
    /// Sender for events pushed by the bridge. Set after `start()`.
    inbound: Mutex<Option<mpsc::Sender<IncomingMessage>>>,
}

impl BridgeChannel {
    pub fn new(config: BridgeConfig) -> Self {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Self {
            config,
            client: reqwest::Client::new(),
            base_url,
            send_timeout: SEND_TIMEOUT,
            inbound: Mutex::new(None),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = timeout;
        self
    }

    /// Queue for events arriving from the bridge, or `None` before `start()`
    /// and after `stop()`.
    pub async fn inbound(&self) -> Option<mpsc::Sender<IncomingMessage>> {
        self.inbound.lock().await.clone()
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        route: &str,
        body: &T,
        timeout: Option<Duration>,
    ) -> Result<(), MatdevError> {
        let url = format!("{}/{route}", self.base_url);
        let mut req = self.client.post(&url).json(body);
        if let Some(timeout) = timeout {
            req = req.timeout(timeout);
        }
        if !self.config.api_key.is_empty() {
            req = req.bearer_auth(&self.config.api_key);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| MatdevError::Channel(format!("bridge {route} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(MatdevError::Channel(format!(
                "bridge {route} returned {status}: {error_text}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Channel for BridgeChannel {
    fn name(&self) -> &str {
        "bridge"
    }

    async fn start(&self) -> Result<mpsc::Receiver<IncomingMessage>, MatdevError> {
        let (tx, rx) = mpsc::channel(64);
        *self.inbound.lock().await = Some(tx);
        info!("Bridge channel started ({})", self.base_url);
        Ok(rx)
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), MatdevError> {
        let target = message
            .reply_target
            .as_deref()
            .ok_or_else(|| MatdevError::Channel("no reply_target on outgoing message".into()))?;

        self.post(
            "send",
            &SendBody {
                to: target,
                text: &message.text,
            },
            Some(self.send_timeout),
        )
        .await
    }

    async fn send_reaction(&self, reaction: OutgoingReaction) -> Result<(), MatdevError> {
        debug!(
            "bridge react {} on {} in {}",
            reaction.emoji, reaction.key.id, reaction.target
        );
        self.post("react", &ReactBody::from(&reaction), None).await
    }

    async fn stop(&self) -> Result<(), MatdevError> {
        *self.inbound.lock().await = None;
        info!("Bridge channel stopped");
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
