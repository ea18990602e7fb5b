//! Event dispatch.
//!
//! The [`Dispatcher`] is the single worker that owns the [`Session`]. It
//! consumes inbound events in arrival order, tracks the connection
//! lifecycle and runs at most one command handler per event, each to
//! completion before the next event is looked at.

use crate::handlers::{Context, Registry};
use crate::session::Session;
use crate::telemetry::spans;
use crate::transport::{ChatMessage, InboundEvent, MessageKind};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, warn};

/// Where the bot stands with the chat server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Disconnected,
    Connecting,
    Connected,
    /// In the configured channel. Commands are only dispatched here.
    Joined,
}

/// Split a message into command token and arguments.
///
/// Returns `None` unless the text starts with `prefix`. The token is the
/// first whitespace-delimited word, prefix included; the arguments are the
/// rest, trimmed.
pub fn command_token(text: &str, prefix: char) -> Option<(&str, &str)> {
    if !text.starts_with(prefix) {
        return None;
    }
    match text.split_once(char::is_whitespace) {
        Some((token, args)) => Some((token, args.trim())),
        None => Some((text.trim_end(), "")),
    }
}

/// Routes inbound events to command handlers.
pub struct Dispatcher {
    registry: Registry,
    session: Session,
    state: LinkState,
}

impl Dispatcher {
    pub fn new(registry: Registry, session: Session) -> Self {
        Self {
            registry,
            session,
            state: LinkState::Connecting,
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Consume events until shutdown, the end of the stream or a disconnect.
    ///
    /// Cancellation is only observed between events. A handler that has
    /// started always runs to completion.
    pub async fn run(
        &mut self,
        events: &mut mpsc::Receiver<InboundEvent>,
        shutdown: &CancellationToken,
    ) {
        let span = spans::session(self.session.channel(), self.session.nick());
        async {
            loop {
                let event = tokio::select! {
                    biased;
                    _ = shutdown.cancelled() => {
                        info!("Shutdown requested, no longer taking events");
                        break;
                    }
                    event = events.recv() => event,
                };

                let Some(event) = event else {
                    info!("Event stream closed");
                    self.state = LinkState::Disconnected;
                    break;
                };

                self.handle_event(event).await;
                if self.state == LinkState::Disconnected {
                    break;
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Apply one inbound event.
    pub async fn handle_event(&mut self, event: InboundEvent) {
        match event {
            InboundEvent::Connected => {
                info!("Connected to server");
                self.state = LinkState::Connected;
                let channel = self.session.channel().to_string();
                if let Err(e) = self.session.transport().join_channel(&channel).await {
                    warn!(%channel, error = %e, "Could not join channel");
                }
            }
            InboundEvent::Joined { channel, nick } => {
                if self.is_own_membership(&channel, &nick) {
                    info!(%channel, "Joined channel");
                    self.state = LinkState::Joined;
                } else {
                    debug!(%channel, %nick, "User joined");
                }
            }
            InboundEvent::Parted { channel, nick } => {
                if self.is_own_membership(&channel, &nick) {
                    info!(%channel, "Left channel");
                    self.state = LinkState::Connected;
                } else {
                    debug!(%channel, %nick, "User left");
                }
            }
            InboundEvent::Message(message) => {
                if self.state != LinkState::Joined {
                    debug!(
                        state = ?self.state,
                        origin = %message.origin,
                        "Ignoring message before join"
                    );
                    return;
                }
                self.dispatch(&message).await;
            }
            InboundEvent::Disconnected { reason } => {
                info!(reason = reason.as_deref().unwrap_or("none"), "Disconnected");
                self.state = LinkState::Disconnected;
            }
        }
    }

    fn is_own_membership(&self, channel: &str, nick: &str) -> bool {
        self.session.is_self(nick) && channel.eq_ignore_ascii_case(self.session.channel())
    }

    /// Run the handler for `message`, if it is a command.
    ///
    /// Returns whether a handler was invoked. Handler errors are logged and
    /// never propagate.
    pub async fn dispatch(&mut self, message: &ChatMessage) -> bool {
        if self.session.is_self(&message.origin) {
            return false;
        }
        if message.kind != MessageKind::Whisper
            && message
                .channel
                .as_deref()
                .is_some_and(|channel| !channel.eq_ignore_ascii_case(self.session.channel()))
        {
            debug!(channel = ?message.channel, "Ignoring message from another channel");
            return false;
        }
        let Some((token, args)) = command_token(&message.text, self.session.command_prefix()) else {
            return false;
        };

        let route = self.registry.resolve(token);
        route.mark_used();

        let span = spans::command(route.label(), &message.origin, message.kind.as_str());
        let mut ctx = Context::new(&mut self.session, message, token, args);
        let result = route.handler().handle(&mut ctx).instrument(span.clone()).await;

        if let Err(e) = result {
            span.in_scope(|| {
                if e.is_rate_limited() {
                    debug!(error = %e, "Did not send message");
                } else {
                    warn!(code = e.error_code(), error = %e, "Command failed");
                }
            });
        }
        true
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("state", &self.state)
            .field("session", &self.session)
            .field("registry", &self.registry)
            .finish()
    }
}
