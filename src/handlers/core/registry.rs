//! Command registry.
//!
//! Maps command tokens to handlers. Lookup is exact and ordered: the first
//! registration of a token wins. Anything that matches nothing goes to the
//! fallback handler, so every resolution yields exactly one handler.

use super::context::Handler;
use crate::handlers::{
    BotHandler, ColorHandler, LinkHandler, PhraseHandler, TimeHandler, TimeoutHandler,
};
use crate::session::Session;
use std::sync::atomic::{AtomicU64, Ordering};

/// Label used for the fallback route in stats and spans.
pub const FALLBACK_LABEL: &str = "<fallback>";

/// A registered handler with its usage counter.
pub struct Route {
    token: String,
    handler: Box<dyn Handler>,
    uses: AtomicU64,
}

impl Route {
    fn new(token: String, handler: Box<dyn Handler>) -> Self {
        Self {
            token,
            handler,
            uses: AtomicU64::new(0),
        }
    }

    /// The registered token, or [`FALLBACK_LABEL`].
    pub fn label(&self) -> &str {
        &self.token
    }

    pub fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }

    /// Count one invocation.
    pub fn mark_used(&self) {
        self.uses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn uses(&self) -> u64 {
        self.uses.load(Ordering::Relaxed)
    }
}

/// Registry of command handlers.
pub struct Registry {
    routes: Vec<Route>,
    fallback: Route,
}

impl Registry {
    /// Empty registry that sends everything to `fallback`.
    pub fn new(fallback: impl Handler + 'static) -> Self {
        Self {
            routes: Vec::new(),
            fallback: Route::new(FALLBACK_LABEL.to_string(), Box::new(fallback)),
        }
    }

    /// The built-in command set for `session`.
    ///
    /// Tokens carry the session's command prefix. The link command is only
    /// present when a link is configured.
    pub fn standard(session: &Session) -> Self {
        let prefix = session.command_prefix();
        let token = |name: &str| format!("{prefix}{name}");

        let mut registry = Self::new(PhraseHandler)
            .with(token("bot"), BotHandler)
            .with(token("time"), TimeHandler);

        if let Some(url) = session.youtube() {
            registry = registry
                .with(token("youtube"), LinkHandler::new(url))
                .with(token("yt"), LinkHandler::new(url));
        }

        registry
            .with(token("color"), ColorHandler)
            .with(token("timeout"), TimeoutHandler)
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, token: impl Into<String>, handler: impl Handler + 'static) -> Self {
        self.register(token, handler);
        self
    }

    /// Append a handler for `token`.
    ///
    /// Registering a token twice keeps both entries, but only the first one
    /// is ever resolved.
    pub fn register(&mut self, token: impl Into<String>, handler: impl Handler + 'static) {
        self.routes.push(Route::new(token.into(), Box::new(handler)));
    }

    /// Find the route for `token`. Never fails.
    pub fn resolve(&self, token: &str) -> &Route {
        self.routes
            .iter()
            .find(|route| route.token == token)
            .unwrap_or(&self.fallback)
    }

    /// Registered tokens in lookup order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|route| route.token.as_str())
    }

    /// Invocation counts per route, fallback last.
    pub fn command_stats(&self) -> Vec<(String, u64)> {
        self.routes
            .iter()
            .chain(std::iter::once(&self.fallback))
            .map(|route| (route.token.clone(), route.uses()))
            .collect()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("tokens", &self.tokens().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HandlerResult;
    use crate::handlers::Context;
    use async_trait::async_trait;

    struct Noop;

    #[async_trait]
    impl Handler for Noop {
        async fn handle(&self, _ctx: &mut Context<'_>) -> HandlerResult {
            Ok(())
        }
    }

    #[test]
    fn test_exact_match_resolves_registered_route() {
        let registry = Registry::new(Noop).with("!bot", Noop).with("!time", Noop);
        assert_eq!(registry.resolve("!time").label(), "!time");
        assert_eq!(registry.resolve("!bot").label(), "!bot");
    }

    #[test]
    fn test_unknown_or_partial_token_falls_back() {
        let registry = Registry::new(Noop).with("!time", Noop);
        assert_eq!(registry.resolve("!tim").label(), FALLBACK_LABEL);
        assert_eq!(registry.resolve("!timer").label(), FALLBACK_LABEL);
        assert_eq!(registry.resolve("!TIME").label(), FALLBACK_LABEL);
        assert_eq!(registry.resolve("").label(), FALLBACK_LABEL);
    }

    #[test]
    fn test_first_registration_wins() {
        let registry = Registry::new(Noop).with("!bot", Noop).with("!bot", Noop);
        registry.resolve("!bot").mark_used();

        let stats = registry.command_stats();
        assert_eq!(stats[0], ("!bot".to_string(), 1));
        assert_eq!(stats[1], ("!bot".to_string(), 0));
    }

    #[test]
    fn test_stats_include_fallback_last() {
        let registry = Registry::new(Noop).with("!bot", Noop);
        registry.resolve("!nope").mark_used();
        registry.resolve("!nope").mark_used();

        let stats = registry.command_stats();
        assert_eq!(stats.last(), Some(&(FALLBACK_LABEL.to_string(), 2)));
        assert_eq!(registry.tokens().collect::<Vec<_>>(), vec!["!bot"]);
    }
}
