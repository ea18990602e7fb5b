//! Unified error handling for the dispatch path.
//!
//! Nothing in here is fatal. Handlers return [`HandlerError`] and the
//! dispatcher logs it and moves on to the next event.

use crate::gate::GateError;
use crate::sampler::SampleError;
use thiserror::Error;

/// Errors that can occur while running a command handler.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Gate(#[from] GateError),

    #[error(transparent)]
    Sample(#[from] SampleError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Gate(e) => e.error_code(),
            Self::Sample(e) => e.error_code(),
            Self::Internal(_) => "internal_error",
        }
    }

    /// Whether the error is routine pacing rather than something going wrong.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Gate(GateError::TooSoon { .. }))
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportError;
    use std::time::Duration;

    #[test]
    fn test_handler_error_codes() {
        let too_soon = HandlerError::from(GateError::TooSoon {
            elapsed: Duration::from_millis(500),
            remaining: Duration::from_millis(1000),
        });
        assert_eq!(too_soon.error_code(), "rate_limited");
        assert!(too_soon.is_rate_limited());

        let failed = HandlerError::from(GateError::SendFailed(TransportError::Closed));
        assert_eq!(failed.error_code(), "send_failed");
        assert!(!failed.is_rate_limited());

        assert_eq!(HandlerError::from(SampleError::EmptySource).error_code(), "empty_source");
        assert_eq!(HandlerError::Internal("x".into()).error_code(), "internal_error");
    }

    #[test]
    fn test_too_soon_message_reports_times() {
        let err = GateError::TooSoon {
            elapsed: Duration::from_millis(500),
            remaining: Duration::from_millis(1000),
        };
        assert_eq!(err.to_string(), "last message was sent 0.50s ago, 1.00s left");
    }
}
