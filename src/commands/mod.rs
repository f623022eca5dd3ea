//! Built-in admin commands: instant responses, no reaction.

mod settings;
mod status;


use matdev_autoreact::ReactionEngine;
use matdev_core::message::IncomingMessage;

pub(crate) use status::format_score;

/// Grouped context for command execution.
pub struct CommandContext<'a> {
    pub engine: &'a ReactionEngine,
    pub prefix: &'a str,
    pub text: &'a str,
}

/// Known admin commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AutoReact,
    Mood,
    Help,
}

impl Command {
    /// Parse a command from message text. Returns `None` when the text does not
    /// start with `prefix` or names an unknown command (it is then treated as a
    /// normal message).
    pub fn parse(text: &str, prefix: &str) -> Option<Self> {
        let rest = text.trim_start().strip_prefix(prefix)?;
        let word = rest.split_whitespace().next()?;
        match word.to_lowercase().as_str() {
            "autoreact" | "ar" => Some(Self::AutoReact),
            "mood" => Some(Self::Mood),
            "help" => Some(Self::Help),
            _ => None,
        }
    }
}

/// Whether `msg` may run admin commands: the bot's own account or a listed owner.
pub fn is_authorized(msg: &IncomingMessage, owners: &[String]) -> bool {
    msg.from_me || owners.iter().any(|o| o == &msg.sender_id)
}

/// Words after the command name.
fn args(text: &str) -> Vec<&str> {
    text.split_whitespace().skip(1).collect()
}

/// Handle a command and return the response text.
pub fn handle(cmd: Command, ctx: &CommandContext<'_>) -> String {
    match cmd {
        Command::AutoReact => settings::handle_autoreact(ctx.engine, &args(ctx.text), ctx.prefix),
        Command::Mood => status::handle_mood(&args(ctx.text).join(" "), ctx.prefix),
        Command::Help => status::handle_help(ctx.prefix),
    }
}
