//! Inbound event types.

/// Kind of chat text the bot received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Regular channel message.
    Channel,
    /// Private whisper.
    Whisper,
    /// `/me` action in a channel.
    Action,
}

impl MessageKind {
    /// Short label for log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Channel => "channel",
            Self::Whisper => "whisper",
            Self::Action => "action",
        }
    }
}

/// A piece of chat text with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub kind: MessageKind,
    /// Nick of the sender.
    pub origin: String,
    /// Channel the text was sent to. `None` for whispers.
    pub channel: Option<String>,
    pub text: String,
}

impl ChatMessage {
    pub fn channel(
        origin: impl Into<String>,
        channel: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            kind: MessageKind::Channel,
            origin: origin.into(),
            channel: Some(channel.into()),
            text: text.into(),
        }
    }

    pub fn whisper(origin: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Whisper,
            origin: origin.into(),
            channel: None,
            text: text.into(),
        }
    }

    pub fn action(
        origin: impl Into<String>,
        channel: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            kind: MessageKind::Action,
            origin: origin.into(),
            channel: Some(channel.into()),
            text: text.into(),
        }
    }
}

/// Everything the transport reports to the bot, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// Registration with the server completed.
    Connected,
    /// Someone joined a channel. Could be the bot itself.
    Joined { channel: String, nick: String },
    /// Someone left a channel. Could be the bot itself.
    Parted { channel: String, nick: String },
    /// Chat text: channel message, whisper or action.
    Message(ChatMessage),
    /// The connection is gone.
    Disconnected { reason: Option<String> },
}

impl From<ChatMessage> for InboundEvent {
    fn from(message: ChatMessage) -> Self {
        Self::Message(message)
    }
}
