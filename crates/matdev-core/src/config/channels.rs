use serde::{Deserialize, Serialize};

use super::defaults::*;

/// Channel configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChannelConfig {
    pub console: Option<ConsoleConfig>,
    pub bridge: Option<BridgeConfig>,
}

/// Local stdin/stdout channel, handy for trying reactions without a phone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Sender id assigned to plain-text lines.
    #[serde(default = "default_console_sender")]
    pub sender_id: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sender_id: default_console_sender(),
        }
    }
}

/// HTTP bridge to an external WhatsApp client.
///
/// Outbound replies and reactions are POSTed to `base_url`; inbound events
/// are pushed by the bridge to `POST /api/events`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_bridge_url")]
    pub base_url: String,
    /// Bearer token sent to the bridge. Empty = no auth header.
    #[serde(default)]
    pub api_key: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: default_bridge_url(),
            api_key: String::new(),
        }
    }
}
