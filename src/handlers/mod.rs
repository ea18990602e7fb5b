//! Chat command handlers.
//!
//! Each command is a unit struct (or a small struct with its fixed
//! configuration) implementing [`Handler`]. The [`Registry`] maps tokens to
//! them.

mod core;
mod flavor;
mod info;
mod moderation;

pub use self::core::{Context, FALLBACK_LABEL, Handler, Registry, Route};
pub use crate::error::{HandlerError, HandlerResult};
pub use flavor::{ColorHandler, PhraseHandler};
pub use info::{BotHandler, LinkHandler, TimeHandler, format_time};
pub use moderation::{DEFAULT_TIMEOUT, TimeoutHandler, parse_timeout_args};
