//! Session context.
//!
//! One [`Session`] exists per running bot. It holds who and where the bot
//! is, the rate gate, the transport and the flavor sources. Handlers never
//! see it directly; they get a [`Context`](crate::handlers::Context) that
//! only exposes reads and send requests.

use crate::clock::Clock;
use crate::config::Settings;
use crate::gate::{GateError, RateGate};
use crate::sampler::{self, SampleError};
use crate::transport::{Outbound, Transport};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Long-lived bot state shared by every dispatch.
pub struct Session {
    channel: String,
    nick: String,
    owner: Option<String>,
    command_prefix: char,
    utc_offset: i32,
    youtube: Option<String>,
    phrases: PathBuf,
    colors: Option<PathBuf>,
    gate: RateGate,
    transport: Arc<dyn Transport>,
    rng: StdRng,
}

impl Session {
    /// Build the session from validated settings.
    ///
    /// The random generator is seeded once here from OS entropy.
    pub fn new(settings: &Settings, transport: Arc<dyn Transport>, clock: Arc<dyn Clock>) -> Self {
        Self {
            channel: settings.channel.clone(),
            nick: settings.nick.clone(),
            owner: settings.owner.clone(),
            command_prefix: settings.command_prefix,
            utc_offset: settings.utc_offset,
            youtube: settings.youtube.clone(),
            phrases: settings.phrases.clone(),
            colors: settings.colors.clone(),
            gate: RateGate::new(settings.message_interval, clock),
            transport,
            rng: StdRng::from_entropy(),
        }
    }

    /// Replace the generator with a seeded one, for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn nick(&self) -> &str {
        &self.nick
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn command_prefix(&self) -> char {
        self.command_prefix
    }

    pub fn utc_offset(&self) -> i32 {
        self.utc_offset
    }

    pub fn youtube(&self) -> Option<&str> {
        self.youtube.as_deref()
    }

    pub fn min_interval(&self) -> Duration {
        self.gate.min_interval()
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Whether `identity` is the configured owner. Always false without one.
    pub fn is_owner(&self, identity: &str) -> bool {
        self.owner
            .as_deref()
            .is_some_and(|owner| owner.eq_ignore_ascii_case(identity))
    }

    /// Whether `identity` is the bot itself.
    pub fn is_self(&self, identity: &str) -> bool {
        self.nick.eq_ignore_ascii_case(identity)
    }

    /// Send through the rate gate. This is the only way out for chat text.
    pub async fn send(&mut self, outbound: Outbound) -> Result<(), GateError> {
        self.gate.try_send(self.transport.as_ref(), &outbound).await
    }

    /// Random line from the phrases file.
    pub fn sample_phrase(&mut self) -> Result<String, SampleError> {
        sampler::sample_file(&self.phrases, &mut self.rng)
    }

    /// Random line from the colors file, `None` when no file is configured.
    pub fn sample_color(&mut self) -> Option<Result<String, SampleError>> {
        let path = self.colors.as_ref()?;
        Some(sampler::sample_file(path, &mut self.rng))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("channel", &self.channel)
            .field("nick", &self.nick)
            .field("owner", &self.owner)
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}
