//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: raw config structs as read from TOML, and validated [`Settings`]
//! - [`defaults`]: default values for optional keys
//! - [`profile`]: locating a profile directory on disk
//! - [`validation`]: startup checks that refuse incomplete configurations
//!
//! A profile is a directory holding two files: [`CONFIG_FILE`] with general
//! settings and [`LOGIN_FILE`] with account credentials. Both deserialize into
//! the same all-optional [`Config`]; values from the login file win.

mod defaults;
mod profile;
mod types;
mod validation;

pub use profile::{CONFIG_FILE, LOGIN_FILE, resolve_profile};
pub use types::{
    AccountConfig, BotConfig, Config, ConfigError, FlavorConfig, ServerConfig, Settings,
};
pub use validation::{ValidationError, validate};
