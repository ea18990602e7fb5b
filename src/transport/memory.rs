//! In-memory transport that records every call.

use super::{Transport, TransportError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// One call made against a [`MemoryTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Channel { channel: String, text: String },
    Whisper { target: String, text: String },
    Timeout { channel: String, target: String, duration: Duration },
    Join(String),
    Quit(Option<String>),
}

/// Transport that keeps sends in a list instead of a socket.
///
/// Calls made while [`set_failing`](Self::set_failing) is on return
/// [`TransportError::Closed`] and are not recorded.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    sent: Mutex<Vec<Sent>>,
    failing: AtomicBool,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of everything sent so far.
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().clone()
    }

    /// Only the chat messages and whispers, as text.
    pub fn texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .iter()
            .filter_map(|s| match s {
                Sent::Channel { text, .. } | Sent::Whisper { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.sent.lock().clear();
    }

    fn record(&self, sent: Sent) -> Result<(), TransportError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(TransportError::Closed);
        }
        self.sent.lock().push(sent);
        Ok(())
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn send_channel_message(&self, channel: &str, text: &str) -> Result<(), TransportError> {
        self.record(Sent::Channel {
            channel: channel.to_string(),
            text: text.to_string(),
        })
    }

    async fn send_whisper(&self, target: &str, text: &str) -> Result<(), TransportError> {
        self.record(Sent::Whisper {
            target: target.to_string(),
            text: text.to_string(),
        })
    }

    async fn apply_timeout(
        &self,
        channel: &str,
        target: &str,
        duration: Duration,
    ) -> Result<(), TransportError> {
        self.record(Sent::Timeout {
            channel: channel.to_string(),
            target: target.to_string(),
            duration,
        })
    }

    async fn join_channel(&self, channel: &str) -> Result<(), TransportError> {
        self.record(Sent::Join(channel.to_string()))
    }

    async fn quit(&self, reason: Option<&str>) -> Result<(), TransportError> {
        self.record(Sent::Quit(reason.map(str::to_string)))
    }
}
