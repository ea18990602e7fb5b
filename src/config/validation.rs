//! Configuration validation.
//!
//! Validates configuration at startup so the bot refuses to run with
//! missing credentials or nonsensical values.

use super::Config;
use std::time::Duration;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("server.host is required")]
    MissingHost,
    #[error("server.port must not be 0")]
    InvalidPort,
    #[error("account.nick is required")]
    MissingNick,
    #[error("account.pass is required")]
    MissingPass,
    #[error("bot.channel is required")]
    MissingChannel,
    #[error("bot.command_prefix must be a single non-whitespace character, got '{0}'")]
    InvalidCommandPrefix(String),
    #[error("bot.timezone must be between -12 and 14, got {0}")]
    InvalidTimezone(i32),
    #[error("bot.message_interval must be a non-negative number of seconds in range, got {0}")]
    InvalidMessageInterval(f64),
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // Required fields
    if is_blank(&config.server.host) {
        errors.push(ValidationError::MissingHost);
    }
    if config.server.port == Some(0) {
        errors.push(ValidationError::InvalidPort);
    }
    if is_blank(&config.account.nick) {
        errors.push(ValidationError::MissingNick);
    }
    if is_blank(&config.account.pass) {
        errors.push(ValidationError::MissingPass);
    }
    if config
        .bot
        .channel
        .as_deref()
        .is_none_or(|c| c.trim().trim_start_matches('#').is_empty())
    {
        errors.push(ValidationError::MissingChannel);
    }

    if let Some(ref prefix) = config.bot.command_prefix {
        let mut chars = prefix.chars();
        let valid = matches!((chars.next(), chars.next()), (Some(c), None) if !c.is_whitespace());
        if !valid {
            errors.push(ValidationError::InvalidCommandPrefix(prefix.clone()));
        }
    }

    if let Some(offset) = config.bot.timezone
        && !(-12..=14).contains(&offset)
    {
        errors.push(ValidationError::InvalidTimezone(offset));
    }

    if let Some(interval) = config.bot.message_interval
        && Duration::try_from_secs_f64(interval).is_err()
    {
        errors.push(ValidationError::InvalidMessageInterval(interval));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_valid_config() -> String {
        r##"
[server]
host = "irc.chat.twitch.tv"

[account]
nick = "kaulmate"
pass = "oauth:token"

[bot]
channel = "#domsson"
"##
        .to_string()
    }

    #[test]
    fn test_valid_config_passes() {
        let config: Config = toml::from_str(&minimal_valid_config()).unwrap();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_config_reports_every_missing_field() {
        let errors = validate(&Config::default()).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::MissingHost,
                ValidationError::MissingNick,
                ValidationError::MissingPass,
                ValidationError::MissingChannel,
            ]
        );
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let toml = r##"
[server]
host = "irc.chat.twitch.tv"

[account]
nick = "  "
pass = "oauth:token"

[bot]
channel = "#"
"##;
        let config: Config = toml::from_str(toml).unwrap();
        let errors = validate(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::MissingNick));
        assert!(errors.contains(&ValidationError::MissingChannel));
    }

    #[test]
    fn test_multi_char_prefix_fails() {
        let mut config: Config = toml::from_str(&minimal_valid_config()).unwrap();
        config.bot.command_prefix = Some("!!".into());
        let errors = validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, ValidationError::InvalidCommandPrefix(_))));

        config.bot.command_prefix = Some(" ".into());
        assert!(validate(&config).is_err());

        config.bot.command_prefix = Some("?".into());
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_timezone_range() {
        let mut config: Config = toml::from_str(&minimal_valid_config()).unwrap();
        config.bot.timezone = Some(15);
        assert_eq!(
            validate(&config).unwrap_err(),
            vec![ValidationError::InvalidTimezone(15)]
        );
        config.bot.timezone = Some(-12);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_negative_interval_fails() {
        let mut config: Config = toml::from_str(&minimal_valid_config()).unwrap();
        config.bot.message_interval = Some(-1.0);
        assert!(validate(&config).is_err());
        config.bot.message_interval = Some(f64::NAN);
        assert!(validate(&config).is_err());
        config.bot.message_interval = Some(f64::INFINITY);
        assert!(validate(&config).is_err());
        config.bot.message_interval = Some(0.0);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_interval_too_large_for_duration_fails() {
        let mut config: Config = toml::from_str(&minimal_valid_config()).unwrap();
        config.bot.message_interval = Some(1e20);
        assert_eq!(
            validate(&config).unwrap_err(),
            vec![ValidationError::InvalidMessageInterval(1e20)]
        );
    }
}
