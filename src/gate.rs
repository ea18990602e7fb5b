//! Outbound send pacing.
//!
//! Chat services throttle or disconnect clients that talk too fast. Every
//! message the bot sends passes a [`RateGate`]: at most one send is accepted
//! per minimum interval, and only a send the transport confirmed counts
//! against the interval.

use crate::clock::Clock;
use crate::transport::{Outbound, Transport, TransportError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Reasons a send did not go out.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("refusing to send an empty message")]
    Empty,

    #[error("last message was sent {:.2}s ago, {:.2}s left", .elapsed.as_secs_f64(), .remaining.as_secs_f64())]
    TooSoon {
        elapsed: Duration,
        remaining: Duration,
    },

    #[error("send failed: {0}")]
    SendFailed(#[from] TransportError),
}

impl GateError {
    /// Static label for log fields.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::TooSoon { .. } => "rate_limited",
            Self::SendFailed(_) => "send_failed",
        }
    }
}

/// Single-slot send gate.
pub struct RateGate {
    min_interval: Duration,
    /// `None` until the first confirmed send.
    last_sent: Option<Instant>,
    clock: Arc<dyn Clock>,
}

impl RateGate {
    pub fn new(min_interval: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            min_interval,
            last_sent: None,
            clock,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Time of the last confirmed send.
    pub fn last_sent(&self) -> Option<Instant> {
        self.last_sent
    }

    /// Check whether a send would be accepted right now, without sending.
    pub fn check(&self) -> Result<Instant, GateError> {
        let now = self.clock.now();
        if let Some(last) = self.last_sent {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.min_interval {
                return Err(GateError::TooSoon {
                    elapsed,
                    remaining: self.min_interval - elapsed,
                });
            }
        }
        Ok(now)
    }

    /// Send `outbound` if the interval allows it.
    ///
    /// Rejections leave the gate untouched. A transport failure is returned as
    /// [`GateError::SendFailed`] and does not update the last-sent time.
    pub async fn try_send(
        &mut self,
        transport: &dyn Transport,
        outbound: &Outbound,
    ) -> Result<(), GateError> {
        if outbound.is_empty() {
            return Err(GateError::Empty);
        }
        let now = self.check()?;
        outbound.deliver(transport).await?;
        self.last_sent = Some(now);
        Ok(())
    }
}

impl std::fmt::Debug for RateGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateGate")
            .field("min_interval", &self.min_interval)
            .field("last_sent", &self.last_sent)
            .finish_non_exhaustive()
    }
}
