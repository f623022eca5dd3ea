//! Default value functions used by serde for config deserialization.

pub fn default_name() -> String {
    "MATDEV".to_string()
}

pub fn default_data_dir() -> String {
    "~/.matdev".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}

pub fn default_sweep_hours() -> u64 {
    6
}

pub fn default_prefix() -> String {
    ".".to_string()
}

pub fn default_console_sender() -> String {
    "console".to_string()
}

pub fn default_bridge_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

pub fn default_api_host() -> String {
    "127.0.0.1".to_string()
}

pub fn default_api_port() -> u16 {
    3901
}
