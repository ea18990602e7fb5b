//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

// =============================================================================
// Server Defaults
// =============================================================================

pub fn default_port() -> u16 {
    6667
}

// =============================================================================
// Bot Defaults
// =============================================================================

pub fn default_command_prefix() -> char {
    '!'
}

/// UTC offset in hours used by `!time`.
pub fn default_timezone() -> i32 {
    0
}

/// Minimum seconds between two outgoing messages.
pub fn default_message_interval() -> f64 {
    1.5
}

// =============================================================================
// Flavor Defaults
// =============================================================================

/// Phrases file, relative to the profile directory.
pub fn default_phrases_file() -> &'static str {
    "random"
}
