mod channels;
mod defaults;

#[cfg(test)]
mod tests;

pub use channels::*;

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::MatdevError;
use crate::message::MessageKind;
use defaults::*;

/// Top-level MATDEV configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub matdev: MatdevConfig,
    #[serde(default)]
    pub autoreact: AutoReactConfig,
    #[serde(default)]
    pub commands: CommandsConfig,
    #[serde(default)]
    pub channel: ChannelConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

/// General bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatdevConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for MatdevConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// How long to wait before a reaction is delivered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelayMode {
    /// React as soon as the event is classified.
    Immediate,
    /// Wait a random amount of time so reactions look less mechanical.
    #[default]
    Randomized,
}

impl DelayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Immediate => "immediate",
            Self::Randomized => "randomized",
        }
    }
}

/// Auto-react settings. Mutable at runtime; changes are written back with
/// [`patch_autoreact`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoReactConfig {
    #[serde(default)]
    pub message_reactions: bool,
    #[serde(default)]
    pub status_reactions: bool,
    #[serde(default)]
    pub message_delay: DelayMode,
    #[serde(default)]
    pub status_delay: DelayMode,
    /// Interval of the bulk purge of the status de-duplication ledger.
    #[serde(default = "default_sweep_hours")]
    pub ledger_sweep_hours: u64,
}

impl Default for AutoReactConfig {
    fn default() -> Self {
        Self {
            message_reactions: false,
            status_reactions: false,
            message_delay: DelayMode::default(),
            status_delay: DelayMode::default(),
            ledger_sweep_hours: default_sweep_hours(),
        }
    }
}

impl AutoReactConfig {
    /// Whether reactions are switched on for this kind of event.
    pub fn enabled_for(&self, kind: MessageKind) -> bool {
        match kind {
            MessageKind::Chat => self.message_reactions,
            MessageKind::Status => self.status_reactions,
        }
    }

    /// Delay mode applied to this kind of event.
    pub fn delay_for(&self, kind: MessageKind) -> DelayMode {
        match kind {
            MessageKind::Chat => self.message_delay,
            MessageKind::Status => self.status_delay,
        }
    }
}

/// Admin command settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandsConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Sender ids allowed to run admin commands besides the bot's own account.
    #[serde(default)]
    pub owners: Vec<String>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            owners: Vec::new(),
        }
    }
}

/// HTTP API configuration -- inbound bridge events and admin endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_api_host")]
    pub host: String,
    #[serde(default = "default_api_port")]
    pub port: u16,
    /// Bearer token for API authentication. Empty = no auth (for local-only use).
    #[serde(default)]
    pub api_key: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_api_host(),
            port: default_api_port(),
            api_key: String::new(),
        }
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Set `key = value` inside `[section]`, keeping every other line intact.
///
/// Replaces an existing assignment, inserts the key right after the section
/// header when missing, or appends the whole section when absent.
pub fn patch_toml_key(content: &str, section: &str, key: &str, value: &str) -> String {
    let header = format!("[{section}]");
    let new_line = format!("{key} = {value}");
    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();

    let Some(start) = lines.iter().position(|l| is_table_header(l, section)) else {
        let mut out = content.trim_end().to_string();
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str(&format!("{header}\n{new_line}\n"));
        return out;
    };

    let end = lines[start + 1..]
        .iter()
        .position(|l| l.trim_start().starts_with('['))
        .map(|i| start + 1 + i)
        .unwrap_or(lines.len());

    let existing = lines[start + 1..end].iter().position(|l| {
        l.trim_start()
            .strip_prefix(key)
            .is_some_and(|rest| rest.trim_start().starts_with('='))
    });

    match existing {
        Some(i) => lines[start + 1 + i] = new_line,
        None => lines.insert(start + 1, new_line),
    }

    let mut out = lines.join("\n");
    if content.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Whether `line` opens `[section]`, allowing inner spaces and a trailing comment.
fn is_table_header(line: &str, section: &str) -> bool {
    let line = line.split('#').next().unwrap_or_default().trim();
    line.strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .is_some_and(|name| !name.starts_with('[') && name.trim() == section)
}

/// Persist the runtime-mutable auto-react settings into `[autoreact]`.
///
/// Text-based patching preserves comments and formatting. A missing file is
/// created with just the `[autoreact]` section.
pub fn patch_autoreact(config_path: &str, cfg: &AutoReactConfig) -> Result<(), MatdevError> {
    let path = Path::new(config_path);
    let mut content = if path.exists() {
        std::fs::read_to_string(path)?
    } else {
        String::new()
    };

    let pairs = [
        ("status_delay", quoted(cfg.status_delay.as_str())),
        ("message_delay", quoted(cfg.message_delay.as_str())),
        ("status_reactions", cfg.status_reactions.to_string()),
        ("message_reactions", cfg.message_reactions.to_string()),
    ];
    for (key, value) in &pairs {
        content = patch_toml_key(&content, "autoreact", key, value);
    }

    std::fs::write(path, content)?;
    info!(
        "autoreact settings persisted to {config_path}: message={} status={} message_delay={} status_delay={}",
        cfg.message_reactions,
        cfg.status_reactions,
        cfg.message_delay.as_str(),
        cfg.status_delay.as_str()
    );
    Ok(())
}

fn quoted(s: &str) -> String {
    format!("\"{s}\"")
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, MatdevError> {
    let path = Path::new(path);
    if !path.exists() {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| MatdevError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| MatdevError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
