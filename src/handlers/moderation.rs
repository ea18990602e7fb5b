//! Owner-only moderation commands.

use super::{Context, Handler, HandlerResult};
use crate::transport::Outbound;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Timeout length when none is given.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Split `<nick> [seconds]` into a normalised target and a duration.
///
/// A leading `@` on the nick is dropped. A missing, zero or unparsable
/// duration falls back to [`DEFAULT_TIMEOUT`].
pub fn parse_timeout_args(args: &str) -> Option<(String, Duration)> {
    let mut parts = args.split_whitespace();
    let target = parts.next()?.trim_start_matches('@').to_ascii_lowercase();
    if target.is_empty() {
        return None;
    }
    let duration = parts
        .next()
        .and_then(|secs| secs.parse::<u64>().ok())
        .filter(|&secs| secs > 0)
        .map_or(DEFAULT_TIMEOUT, Duration::from_secs);
    Some((target, duration))
}

/// Owner-only: times a user out of the channel.
pub struct TimeoutHandler;

#[async_trait]
impl Handler for TimeoutHandler {
    async fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        if !ctx.is_owner() {
            debug!(origin = %ctx.origin(), "Ignoring timeout from non-owner");
            return Ok(());
        }
        let Some((target, duration)) = parse_timeout_args(ctx.args()) else {
            debug!("Timeout without a target");
            return Ok(());
        };
        if target.eq_ignore_ascii_case(ctx.nick())
            || ctx.owner().is_some_and(|owner| owner.eq_ignore_ascii_case(&target))
        {
            debug!(%target, "Refusing to time out the bot or its owner");
            return Ok(());
        }

        let outbound = Outbound::Timeout {
            channel: ctx.channel().to_string(),
            target,
            duration,
        };
        ctx.send(outbound).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target_and_seconds() {
        assert_eq!(
            parse_timeout_args("Spammer 300"),
            Some(("spammer".to_string(), Duration::from_secs(300)))
        );
        assert_eq!(
            parse_timeout_args("@spammer"),
            Some(("spammer".to_string(), DEFAULT_TIMEOUT))
        );
    }

    #[test]
    fn test_bad_duration_uses_default() {
        assert_eq!(parse_timeout_args("x soon").map(|(_, d)| d), Some(DEFAULT_TIMEOUT));
        assert_eq!(parse_timeout_args("x 0").map(|(_, d)| d), Some(DEFAULT_TIMEOUT));
        assert_eq!(parse_timeout_args("x -5").map(|(_, d)| d), Some(DEFAULT_TIMEOUT));
    }

    #[test]
    fn test_missing_target() {
        assert_eq!(parse_timeout_args(""), None);
        assert_eq!(parse_timeout_args("   "), None);
        assert_eq!(parse_timeout_args("@ 30"), None);
    }
}
