//! Chat transport boundary.
//!
//! The dispatch core only sees two things of the network:
//!
//! - an ordered stream of [`InboundEvent`]s
//! - the send primitives of the [`Transport`] trait
//!
//! Two implementations ship with the crate: [`irc::IrcTransport`] speaks the
//! Twitch IRC dialect over TCP, [`memory::MemoryTransport`] records every call
//! and is used by tests.

mod event;
pub mod irc;
pub mod memory;
mod wire;

pub use event::{ChatMessage, InboundEvent, MessageKind};
pub use wire::Line;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors reported by transport send primitives.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection closed")]
    Closed,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("codec error: {0}")]
    Codec(#[from] tokio_util::codec::LinesCodecError),

    #[error("send rejected: {0}")]
    Rejected(String),
}

/// Send primitives offered by a connected chat transport.
///
/// Message, whisper and timeout sends are only ever issued through the rate
/// gate. Joins and quits are lifecycle commands and bypass it.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a chat message to a channel.
    async fn send_channel_message(&self, channel: &str, text: &str) -> Result<(), TransportError>;

    /// Send a private whisper to a user.
    async fn send_whisper(&self, target: &str, text: &str) -> Result<(), TransportError>;

    /// Time a user out of a channel.
    async fn apply_timeout(
        &self,
        channel: &str,
        target: &str,
        duration: Duration,
    ) -> Result<(), TransportError>;

    /// Join a channel.
    async fn join_channel(&self, channel: &str) -> Result<(), TransportError>;

    /// Leave the network.
    async fn quit(&self, reason: Option<&str>) -> Result<(), TransportError>;
}

/// Where a chat reply goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// A channel, e.g. `#domsson`.
    Channel(String),
    /// A whisper to a user.
    Whisper(String),
}

/// A send request produced by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Plain text to a channel or user.
    Message { destination: Destination, text: String },
    /// Privileged moderation action.
    Timeout {
        channel: String,
        target: String,
        duration: Duration,
    },
}

impl Outbound {
    /// Text destined for a channel.
    pub fn channel(channel: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Message {
            destination: Destination::Channel(channel.into()),
            text: text.into(),
        }
    }

    /// Text whispered to a user.
    pub fn whisper(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Message {
            destination: Destination::Whisper(target.into()),
            text: text.into(),
        }
    }

    /// Whether there is nothing to send.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Message { text, .. } => text.trim().is_empty(),
            Self::Timeout { target, .. } => target.is_empty(),
        }
    }

    /// Hand the request to the matching transport primitive.
    pub async fn deliver(&self, transport: &dyn Transport) -> Result<(), TransportError> {
        match self {
            Self::Message {
                destination: Destination::Channel(channel),
                text,
            } => transport.send_channel_message(channel, text).await,
            Self::Message {
                destination: Destination::Whisper(target),
                text,
            } => transport.send_whisper(target, text).await,
            Self::Timeout {
                channel,
                target,
                duration,
            } => transport.apply_timeout(channel, target, *duration).await,
        }
    }
}
