//! Auto-react settings command: show and toggle.

use matdev_autoreact::{ReactionEngine, SettingChange};
use matdev_core::config::{AutoReactConfig, DelayMode};

fn on_off(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}

fn parse_switch(arg: &str) -> Option<bool> {
    match arg.to_lowercase().as_str() {
        "on" | "enable" | "true" => Some(true),
        "off" | "disable" | "false" => Some(false),
        _ => None,
    }
}

fn delay_mode(randomized: bool) -> DelayMode {
    if randomized {
        DelayMode::Randomized
    } else {
        DelayMode::Immediate
    }
}

/// Map command arguments to a settings change. `None` means bad usage.
pub(super) fn parse_change(args: &[&str]) -> Option<SettingChange> {
    let lowered: Vec<String> = args.iter().map(|a| a.to_lowercase()).collect();
    let words: Vec<&str> = lowered.iter().map(String::as_str).collect();
    match words.as_slice() {
        [switch] => parse_switch(switch).map(SettingChange::MessageReactions),
        ["status", switch] => parse_switch(switch).map(SettingChange::StatusReactions),
        ["delay", switch] => {
            parse_switch(switch).map(|on| SettingChange::MessageDelay(delay_mode(on)))
        }
        ["delay", "status", switch] => {
            parse_switch(switch).map(|on| SettingChange::StatusDelay(delay_mode(on)))
        }
        _ => None,
    }
}

pub(super) fn format_settings(cfg: &AutoReactConfig, pending: usize) -> String {
    format!(
        "Auto-react\n\
         messages: {} (delay: {})\n\
         status: {} (delay: {})\n\
         pending status keys: {pending}",
        on_off(cfg.message_reactions),
        cfg.message_delay.as_str(),
        on_off(cfg.status_reactions),
        cfg.status_delay.as_str(),
    )
}

fn usage(prefix: &str) -> String {
    format!(
        "Usage:\n\
         {prefix}autoreact on|off\n\
         {prefix}autoreact status on|off\n\
         {prefix}autoreact delay on|off\n\
         {prefix}autoreact delay status on|off"
    )
}

fn describe(change: SettingChange) -> String {
    match change {
        SettingChange::MessageReactions(on) => format!("Message reactions {}.", on_off(on)),
        SettingChange::StatusReactions(on) => format!("Status reactions {}.", on_off(on)),
        SettingChange::MessageDelay(mode) => format!("Message reaction delay: {}.", mode.as_str()),
        SettingChange::StatusDelay(mode) => format!("Status reaction delay: {}.", mode.as_str()),
    }
}

/// Handle `autoreact [args]`.
pub(super) fn handle_autoreact(engine: &ReactionEngine, args: &[&str], prefix: &str) -> String {
    if args.is_empty() {
        return format_settings(&engine.config(), engine.ledger().len());
    }
    match parse_change(args) {
        Some(change) => {
            engine.update(&[change]);
            describe(change)
        }
        None => usage(prefix),
    }
}
