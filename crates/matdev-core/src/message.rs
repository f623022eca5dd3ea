use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Chat id WhatsApp uses for status updates.
pub const STATUS_BROADCAST_JID: &str = "status@broadcast";

/// What kind of content an incoming event carries.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Regular direct or group chat message.
    #[default]
    Chat,
    /// Ephemeral status update. The same status can be observed more than once.
    Status,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "message",
            Self::Status => "status",
        }
    }
}

/// An incoming event from a channel, with its text body already extracted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    /// Platform message id. Stable across redeliveries of the same event.
    pub id: String,
    /// Channel name (e.g. "console", "bridge").
    #[serde(default)]
    pub channel: String,
    /// Platform-specific author id.
    pub sender_id: String,
    /// Human-readable sender name.
    #[serde(default)]
    pub sender_name: Option<String>,
    /// Plain text body (conversation, extended text, or media caption).
    #[serde(default)]
    pub text: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// Chat the event was posted in, used as the reaction/reply target.
    #[serde(default)]
    pub reply_target: Option<String>,
    #[serde(default)]
    pub is_group: bool,
    /// Whether the bot's own account authored this event.
    #[serde(default)]
    pub from_me: bool,
    #[serde(default)]
    pub kind: MessageKind,
}

impl IncomingMessage {
    /// Reference to this event, as needed by a reaction.
    pub fn key(&self) -> MessageKey {
        let remote_jid = match self.kind {
            MessageKind::Status => STATUS_BROADCAST_JID.to_string(),
            MessageKind::Chat => self
                .reply_target
                .clone()
                .unwrap_or_else(|| self.sender_id.clone()),
        };
        let participant = if self.is_group || self.kind == MessageKind::Status {
            Some(self.sender_id.clone())
        } else {
            None
        };
        MessageKey {
            id: self.id.clone(),
            remote_jid,
            participant,
            from_me: self.from_me,
        }
    }
}

/// An outgoing text message to send back through a channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub text: String,
    /// Platform-specific target for routing (chat id).
    #[serde(default)]
    pub reply_target: Option<String>,
}

/// Identifies the message a reaction points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageKey {
    pub id: String,
    pub remote_jid: String,
    /// Author inside a group or status broadcast.
    pub participant: Option<String>,
    pub from_me: bool,
}

/// A reaction glyph to attach to an existing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingReaction {
    /// Chat the reaction is delivered to.
    pub target: String,
    pub emoji: String,
    pub key: MessageKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incoming(kind: MessageKind, is_group: bool) -> IncomingMessage {
        IncomingMessage {
            id: "3EB0ABC".into(),
            channel: "bridge".into(),
            sender_id: "5511999887766@s.whatsapp.net".into(),
            sender_name: None,
            text: "hi".into(),
            timestamp: Utc::now(),
            reply_target: Some("120363001234567890@g.us".into()),
            is_group,
            from_me: false,
            kind,
        }
    }

    #[test]
    fn test_key_for_direct_chat_has_no_participant() {
        let mut msg = incoming(MessageKind::Chat, false);
        msg.reply_target = Some("5511999887766@s.whatsapp.net".into());
        let key = msg.key();
        assert_eq!(key.remote_jid, "5511999887766@s.whatsapp.net");
        assert_eq!(key.participant, None);
    }

    #[test]
    fn test_key_for_group_names_participant() {
        let key = incoming(MessageKind::Chat, true).key();
        assert_eq!(key.remote_jid, "120363001234567890@g.us");
        assert_eq!(
            key.participant.as_deref(),
            Some("5511999887766@s.whatsapp.net")
        );
    }

    #[test]
    fn test_key_for_status_uses_broadcast_jid() {
        let key = incoming(MessageKind::Status, false).key();
        assert_eq!(key.remote_jid, STATUS_BROADCAST_JID);
        assert!(key.participant.is_some());
    }

    #[test]
    fn test_incoming_defaults_from_minimal_json() {
        let msg: IncomingMessage =
            serde_json::from_str(r#"{"id":"A1","sender_id":"u1","text":"hello"}"#).unwrap();
        assert_eq!(msg.kind, MessageKind::Chat);
        assert!(!msg.from_me);
        assert!(msg.reply_target.is_none());
    }

    #[test]
    fn test_kind_deserializes_lowercase() {
        let msg: IncomingMessage =
            serde_json::from_str(r#"{"id":"A1","sender_id":"u1","kind":"status"}"#).unwrap();
        assert_eq!(msg.kind, MessageKind::Status);
        assert_eq!(msg.kind.as_str(), "status");
    }
}
