//! kaulmate - a rate-limited Twitch chat bot.
//!
//! The crate is organised around the response dispatch core:
//!
//! - [`clock`]: monotonic time source used for send pacing
//! - [`sampler`]: uniform random line selection from flavor text files
//! - [`gate`]: single-slot rate gate in front of every outbound send
//! - [`handlers`]: command handlers and the ordered command registry
//! - [`dispatch`]: turns inbound events into handler invocations
//!
//! Everything else ([`config`], [`transport`], [`telemetry`]) supports that core.

pub mod clock;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod sampler;
pub mod session;
pub mod telemetry;
pub mod transport;

pub use dispatch::{Dispatcher, LinkState};
pub use session::Session;

/// Bot name as announced by `!bot`.
pub const NAME: &str = "kaulmate";
/// Original author of the bot.
pub const AUTHOR: &str = "domsson";
/// Project home page.
pub const URL: &str = "https://github.com/domsson/kaulmate";
/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
