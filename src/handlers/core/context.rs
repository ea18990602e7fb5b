//! Handler context and the `Handler` trait.

use crate::error::HandlerResult;
use crate::sampler::SampleError;
use crate::session::Session;
use crate::transport::{ChatMessage, Destination, MessageKind, Outbound};
use async_trait::async_trait;

/// A command implementation.
///
/// Handlers are stateless between invocations. Everything they may touch
/// goes through the [`Context`].
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult;
}

/// What a handler sees of the world while it runs.
///
/// Reads are free. Writes are limited to send requests, which pass through
/// the session's rate gate.
pub struct Context<'a> {
    session: &'a mut Session,
    message: &'a ChatMessage,
    token: &'a str,
    args: &'a str,
}

impl<'a> Context<'a> {
    pub fn new(
        session: &'a mut Session,
        message: &'a ChatMessage,
        token: &'a str,
        args: &'a str,
    ) -> Self {
        Self {
            session,
            message,
            token,
            args,
        }
    }

    /// The triggering message.
    pub fn message(&self) -> &ChatMessage {
        self.message
    }

    /// Who sent the triggering message.
    pub fn origin(&self) -> &str {
        &self.message.origin
    }

    /// The command token as typed, including the prefix.
    pub fn token(&self) -> &str {
        self.token
    }

    /// Everything after the command token, trimmed.
    pub fn args(&self) -> &str {
        self.args
    }

    /// The channel the bot sits in.
    pub fn channel(&self) -> &str {
        self.session.channel()
    }

    pub fn nick(&self) -> &str {
        self.session.nick()
    }

    pub fn owner(&self) -> Option<&str> {
        self.session.owner()
    }

    pub fn utc_offset(&self) -> i32 {
        self.session.utc_offset()
    }

    pub fn youtube(&self) -> Option<&str> {
        self.session.youtube()
    }

    /// Whether the sender is the configured owner.
    pub fn is_owner(&self) -> bool {
        self.session.is_owner(&self.message.origin)
    }

    /// Where a reply to the triggering message should go.
    ///
    /// Whispers are answered by whisper, everything else in the channel the
    /// message came from.
    pub fn reply_destination(&self) -> Destination {
        match self.message.kind {
            MessageKind::Whisper => Destination::Whisper(self.message.origin.clone()),
            MessageKind::Channel | MessageKind::Action => Destination::Channel(
                self.message
                    .channel
                    .clone()
                    .unwrap_or_else(|| self.session.channel().to_string()),
            ),
        }
    }

    /// Answer the triggering message.
    pub async fn reply(&mut self, text: String) -> HandlerResult {
        let outbound = Outbound::Message {
            destination: self.reply_destination(),
            text,
        };
        self.send(outbound).await
    }

    /// Request an arbitrary send through the rate gate.
    pub async fn send(&mut self, outbound: Outbound) -> HandlerResult {
        self.session.send(outbound).await?;
        Ok(())
    }

    pub fn sample_phrase(&mut self) -> Result<String, SampleError> {
        self.session.sample_phrase()
    }

    pub fn sample_color(&mut self) -> Option<Result<String, SampleError>> {
        self.session.sample_color()
    }
}
