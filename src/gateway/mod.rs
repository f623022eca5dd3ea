//! Gateway: the main event loop connecting channels, admin commands, and the
//! reaction engine.
//!
//! Includes: channel fan-in, the de-dup ledger sweep, the HTTP API, and
//! graceful shutdown.

mod pipeline;


use matdev_autoreact::ReactionEngine;
use matdev_channels::BridgeChannel;
use matdev_core::{
    config::{ApiConfig, CommandsConfig},
    message::{IncomingMessage, OutgoingMessage},
    traits::Channel,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// The central gateway that routes events from channels to commands or reactions.
pub struct Gateway {
    pub(super) channels: HashMap<String, Arc<dyn Channel>>,
    pub(super) engine: Arc<ReactionEngine>,
    pub(super) commands_config: CommandsConfig,
    pub(super) api_config: ApiConfig,
    pub(super) uptime: Instant,
}

impl Gateway {
    /// Create a new gateway.
    pub fn new(
        channels: HashMap<String, Arc<dyn Channel>>,
        engine: Arc<ReactionEngine>,
        commands_config: CommandsConfig,
        api_config: ApiConfig,
    ) -> Self {
        Self {
            channels,
            engine,
            commands_config,
            api_config,
            uptime: Instant::now(),
        }
    }

    /// Run the main event loop.
    pub async fn run(self: Arc<Self>) -> anyhow::Result<()> {
        let cfg = self.engine.config();
        info!(
            "MATDEV gateway running | channels: {} | reactions: message={} status={}",
            self.channels.keys().cloned().collect::<Vec<_>>().join(", "),
            cfg.message_reactions,
            cfg.status_reactions,
        );

        let (tx, mut rx) = mpsc::channel::<IncomingMessage>(256);

        for (name, channel) in &self.channels {
            let mut channel_rx = channel
                .start()
                .await
                .map_err(|e| anyhow::anyhow!("failed to start channel {name}: {e}"))?;
            let tx = tx.clone();
            let channel_name = name.clone();

            tokio::spawn(async move {
                while let Some(msg) = channel_rx.recv().await {
                    if tx.send(msg).await.is_err() {
                        info!("gateway receiver dropped, stopping {channel_name} forwarder");
                        break;
                    }
                }
            });

            info!("Channel started: {name}");
        }

        drop(tx);

        // Periodic bulk purge of the status de-dup ledger.
        let sweep_handle = self.engine.spawn_sweeper();

        // Spawn HTTP API server. Bridge events are fed into the bridge channel's queue.
        let api_handle = if self.api_config.enabled {
            let api_tx = self.bridge_inbound().await;
            if api_tx.is_none() {
                warn!("API enabled without a bridge channel; POST /api/events will return 503");
            }
            let api_cfg = self.api_config.clone();
            let api_engine = self.engine.clone();
            let api_uptime = self.uptime;
            Some(tokio::spawn(async move {
                crate::api::serve(api_cfg, api_engine, api_uptime, api_tx).await;
            }))
        } else {
            None
        };

        // Main event loop with graceful shutdown.
        loop {
            tokio::select! {
                incoming = rx.recv() => {
                    let Some(incoming) = incoming else {
                        info!("all channels closed");
                        break;
                    };
                    let gw = self.clone();
                    tokio::spawn(async move {
                        gw.handle_message(incoming).await;
                    });
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        self.shutdown(&sweep_handle, &api_handle).await;
        Ok(())
    }

    /// Inbound queue of the bridge channel, if one is configured and started.
    async fn bridge_inbound(&self) -> Option<mpsc::Sender<IncomingMessage>> {
        let bridge = self
            .channels
            .get("bridge")?
            .as_any()
            .downcast_ref::<BridgeChannel>()?;
        bridge.inbound().await
    }

    /// Graceful shutdown: abort background tasks, stop channels.
    ///
    /// Reactions already scheduled are left to finish on their own.
    async fn shutdown(&self, sweep_handle: &JoinHandle<()>, api_handle: &Option<JoinHandle<()>>) {
        info!("Shutting down...");

        sweep_handle.abort();
        if let Some(h) = api_handle {
            h.abort();
        }

        for (name, channel) in &self.channels {
            if let Err(e) = channel.stop().await {
                warn!("failed to stop channel {name}: {e}");
            }
        }

        info!("Shutdown complete.");
    }

    /// Send a plain text message back to where `incoming` came from.
    pub(super) async fn send_text(&self, incoming: &IncomingMessage, text: &str) {
        let msg = OutgoingMessage {
            text: text.to_string(),
            reply_target: incoming
                .reply_target
                .clone()
                .or_else(|| Some(incoming.sender_id.clone())),
        };

        if let Some(channel) = self.channels.get(&incoming.channel) {
            if let Err(e) = channel.send(msg).await {
                error!("failed to send message: {e}");
            }
        }
    }
}
