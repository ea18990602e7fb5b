//! Informational commands: `bot`, `time` and the channel link.

use super::{Context, Handler, HandlerError, HandlerResult};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};

/// Replies with the bot's identity line.
pub struct BotHandler;

#[async_trait]
impl Handler for BotHandler {
    async fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let text = format!(
            "I'm {}, version {} by {}, see {}",
            crate::NAME,
            crate::VERSION,
            crate::AUTHOR,
            crate::URL
        );
        ctx.reply(text).await
    }
}

/// Replies with the current time at the configured UTC offset.
pub struct TimeHandler;

#[async_trait]
impl Handler for TimeHandler {
    async fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let offset = ctx.utc_offset();
        let text = format_time(Utc::now(), offset)
            .ok_or_else(|| HandlerError::Internal(format!("utc offset {offset} out of range")))?;
        ctx.reply(text).await
    }
}

/// `Current time: HH:MM (GMT+N)` for `now` shifted by `offset_hours`.
///
/// Returns `None` if the offset is not a valid timezone offset.
pub fn format_time(now: DateTime<Utc>, offset_hours: i32) -> Option<String> {
    let offset = FixedOffset::east_opt(offset_hours.checked_mul(3600)?)?;
    let local = now.with_timezone(&offset);
    Some(format!(
        "Current time: {} (GMT{:+})",
        local.format("%H:%M"),
        offset_hours
    ))
}

/// Replies with a fixed link.
pub struct LinkHandler {
    url: String,
}

impl LinkHandler {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl Handler for LinkHandler {
    async fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        ctx.reply(self.url.clone()).await
    }
}
