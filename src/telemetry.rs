//! Tracing setup and standardized spans.

use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber.
///
/// `RUST_LOG` overrides the default `info` level.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();
}

/// Standardized span constructors for bot observability.
pub mod spans {
    use tracing::{Span, info_span};

    /// Span around the whole dispatch loop.
    pub fn session(channel: &str, nick: &str) -> Span {
        info_span!("session", channel = %channel, nick = %nick)
    }

    /// Span around one handler invocation.
    pub fn command(token: &str, origin: &str, kind: &str) -> Span {
        info_span!("command", token = %token, origin = %origin, kind = %kind)
    }
}
