//! Integration test common infrastructure.
//!
//! [`TestBot`] wires a dispatcher to an in-memory transport and a manual
//! clock, with flavor files in a temporary directory. [`FakeServer`] is a
//! bare TCP listener for exercising the IRC transport.

#![allow(dead_code)]

pub mod server;

#[allow(unused_imports)]
pub use server::FakeServer;

use kaulmate::clock::ManualClock;
use kaulmate::config::Settings;
use kaulmate::handlers::Registry;
use kaulmate::transport::memory::MemoryTransport;
use kaulmate::transport::{ChatMessage, InboundEvent};
use kaulmate::{Dispatcher, LinkState, Session};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub const CHANNEL: &str = "#domsson";
pub const NICK: &str = "kaulmate";
pub const OWNER: &str = "domsson";

/// Knobs for [`TestBot::start`].
pub struct BotOptions {
    pub phrases: Option<Vec<&'static str>>,
    pub colors: Option<Vec<&'static str>>,
    pub youtube: Option<&'static str>,
    pub owner: Option<&'static str>,
    pub interval_secs: f64,
}

impl Default for BotOptions {
    fn default() -> Self {
        Self {
            phrases: Some(vec!["Kaul!", "Mate!"]),
            colors: None,
            youtube: None,
            owner: Some(OWNER),
            interval_secs: 1.5,
        }
    }
}

/// A bot with the standard command set, already joined to [`CHANNEL`].
pub struct TestBot {
    pub dispatcher: Dispatcher,
    pub transport: Arc<MemoryTransport>,
    pub clock: Arc<ManualClock>,
    _dir: TempDir,
}

impl TestBot {
    pub async fn new() -> Self {
        Self::start(BotOptions::default()).await
    }

    pub async fn start(options: BotOptions) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let phrases = write_lines(&dir, "random", options.phrases.as_deref());
        let colors = options
            .colors
            .as_deref()
            .map(|lines| write_lines(&dir, "colors", Some(lines)));

        let settings = Settings {
            host: "localhost".into(),
            port: 6667,
            nick: NICK.into(),
            pass: "oauth:test".into(),
            channel: CHANNEL.into(),
            owner: options.owner.map(str::to_string),
            command_prefix: '!',
            utc_offset: 0,
            message_interval: Duration::from_secs_f64(options.interval_secs),
            youtube: options.youtube.map(str::to_string),
            phrases,
            colors,
        };

        let transport = Arc::new(MemoryTransport::new());
        let clock = Arc::new(ManualClock::new());
        let session = Session::new(&settings, transport.clone(), clock.clone()).with_seed(42);
        let registry = Registry::standard(&session);
        let mut dispatcher = Dispatcher::new(registry, session);

        dispatcher.handle_event(InboundEvent::Connected).await;
        dispatcher
            .handle_event(InboundEvent::Joined {
                channel: CHANNEL.into(),
                nick: NICK.into(),
            })
            .await;
        assert_eq!(dispatcher.state(), LinkState::Joined);
        transport.clear();

        Self {
            dispatcher,
            transport,
            clock,
            _dir: dir,
        }
    }

    /// Deliver a channel message from `origin`.
    pub async fn say(&mut self, origin: &str, text: &str) {
        self.dispatcher
            .handle_event(ChatMessage::channel(origin, CHANNEL, text).into())
            .await;
    }

    /// Deliver a `/me` action from `origin`.
    pub async fn act(&mut self, origin: &str, text: &str) {
        self.dispatcher
            .handle_event(ChatMessage::action(origin, CHANNEL, text).into())
            .await;
    }

    /// Deliver a whisper from `origin`.
    pub async fn whisper(&mut self, origin: &str, text: &str) {
        self.dispatcher
            .handle_event(ChatMessage::whisper(origin, text).into())
            .await;
    }

    pub fn advance(&self, secs: f64) {
        self.clock.advance_secs(secs);
    }
}

/// Write `lines` as a newline-terminated file, or nothing at all for `None`.
fn write_lines(dir: &TempDir, name: &str, lines: Option<&[&str]>) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(lines) = lines {
        let body: String = lines.iter().map(|line| format!("{line}\n")).collect();
        std::fs::write(&path, body).expect("write flavor file");
    }
    path
}
