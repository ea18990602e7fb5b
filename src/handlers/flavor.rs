//! Flavor commands backed by the line sampler.

use super::{Context, Handler, HandlerResult};
use crate::transport::Outbound;
use async_trait::async_trait;
use tracing::debug;

/// Fallback: answers any unknown command with a random phrase.
///
/// Sampler errors propagate so the dispatcher logs them; nothing is sent.
pub struct PhraseHandler;

#[async_trait]
impl Handler for PhraseHandler {
    async fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let phrase = ctx.sample_phrase()?;
        ctx.reply(phrase).await
    }
}

/// Owner-only: switches the bot's chat color to a random one.
pub struct ColorHandler;

#[async_trait]
impl Handler for ColorHandler {
    async fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        if !ctx.is_owner() {
            debug!(origin = %ctx.origin(), "Ignoring color change from non-owner");
            return Ok(());
        }
        let Some(color) = ctx.sample_color() else {
            debug!("No colors file configured");
            return Ok(());
        };
        let color = color?;
        let outbound = Outbound::channel(ctx.channel(), format!("/color {color}"));
        ctx.send(outbound).await
    }
}
