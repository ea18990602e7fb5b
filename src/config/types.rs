//! Core configuration types and loading.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use super::defaults::{
    default_command_prefix, default_message_interval, default_phrases_file, default_port,
    default_timezone,
};
use super::profile::{CONFIG_FILE, LOGIN_FILE};
use super::validation::{ValidationError, validate};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("could not determine the user config directory")]
    NoConfigDir,
    #[error("profile directory does not exist: {}", .0.display())]
    ProfileNotFound(PathBuf),
    #[error("invalid configuration: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Raw configuration, as read from one or more TOML files.
///
/// Every key is optional here so that a profile can spread its settings over
/// several files. [`Config::into_settings`] checks that the result is usable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Chat server address.
    #[serde(default)]
    pub server: ServerConfig,
    /// Bot account credentials.
    #[serde(default)]
    pub account: AccountConfig,
    /// Channel and behaviour settings.
    #[serde(default)]
    pub bot: BotConfig,
    /// Flavor text sources.
    #[serde(default)]
    pub flavor: FlavorConfig,
}

/// Chat server address.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Server host name (e.g., "irc.chat.twitch.tv").
    pub host: Option<String>,
    /// Server port (default: 6667).
    pub port: Option<u16>,
}

/// Bot account credentials.
#[derive(Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountConfig {
    /// Login nick of the bot account.
    pub nick: Option<String>,
    /// OAuth token (`oauth:...`).
    pub pass: Option<String>,
}

impl std::fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountConfig")
            .field("nick", &self.nick)
            .field("pass", &self.pass.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Channel and behaviour settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Channel to join, with or without the leading `#`.
    pub channel: Option<String>,
    /// The one user allowed to run privileged commands.
    pub owner: Option<String>,
    /// Single character that starts a command (default: "!").
    pub command_prefix: Option<String>,
    /// UTC offset in hours used by the time command (default: 0).
    pub timezone: Option<i32>,
    /// Minimum seconds between two outgoing messages (default: 1.5).
    pub message_interval: Option<f64>,
    /// YouTube link; enables the youtube commands when set.
    pub youtube: Option<String>,
}

/// Flavor text sources. Relative paths resolve against the profile directory.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlavorConfig {
    /// One phrase per line, used for unknown commands (default: "random").
    pub phrases: Option<PathBuf>,
    /// One color name per line; enables the color command when set.
    pub colors: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load and merge the general and login files of a profile directory.
    pub fn load_profile(dir: &Path) -> Result<Self, ConfigError> {
        let general = Self::load(dir.join(CONFIG_FILE))?;
        let login = Self::load(dir.join(LOGIN_FILE))?;
        Ok(general.merge(login))
    }

    /// Overlay `other` on top of `self`; keys set in `other` win.
    pub fn merge(self, other: Config) -> Config {
        Config {
            server: ServerConfig {
                host: other.server.host.or(self.server.host),
                port: other.server.port.or(self.server.port),
            },
            account: AccountConfig {
                nick: other.account.nick.or(self.account.nick),
                pass: other.account.pass.or(self.account.pass),
            },
            bot: BotConfig {
                channel: other.bot.channel.or(self.bot.channel),
                owner: other.bot.owner.or(self.bot.owner),
                command_prefix: other.bot.command_prefix.or(self.bot.command_prefix),
                timezone: other.bot.timezone.or(self.bot.timezone),
                message_interval: other.bot.message_interval.or(self.bot.message_interval),
                youtube: other.bot.youtube.or(self.bot.youtube),
            },
            flavor: FlavorConfig {
                phrases: other.flavor.phrases.or(self.flavor.phrases),
                colors: other.flavor.colors.or(self.flavor.colors),
            },
        }
    }

    /// Validate and turn into typed [`Settings`].
    ///
    /// `base_dir` anchors relative flavor file paths.
    pub fn into_settings(self, base_dir: &Path) -> Result<Settings, ConfigError> {
        validate(&self).map_err(ConfigError::Invalid)?;

        let required =
            |value: Option<String>| value.map(|v| v.trim().to_string()).unwrap_or_default();
        let resolve = |path: PathBuf| {
            if path.is_absolute() {
                path
            } else {
                base_dir.join(path)
            }
        };

        let interval = self
            .bot
            .message_interval
            .unwrap_or_else(default_message_interval);
        let message_interval = Duration::try_from_secs_f64(interval).map_err(|_| {
            ConfigError::Invalid(vec![ValidationError::InvalidMessageInterval(interval)])
        })?;

        let channel = required(self.bot.channel).to_lowercase();
        let channel = if channel.starts_with('#') {
            channel
        } else {
            format!("#{}", channel)
        };

        Ok(Settings {
            host: required(self.server.host),
            port: self.server.port.unwrap_or_else(default_port),
            nick: required(self.account.nick).to_lowercase(),
            pass: required(self.account.pass),
            channel,
            owner: self
                .bot
                .owner
                .map(|o| o.trim().to_lowercase())
                .filter(|o| !o.is_empty()),
            command_prefix: self
                .bot
                .command_prefix
                .and_then(|p| p.chars().next())
                .unwrap_or_else(default_command_prefix),
            utc_offset: self.bot.timezone.unwrap_or_else(default_timezone),
            message_interval,
            youtube: self
                .bot
                .youtube
                .map(|y| y.trim().to_string())
                .filter(|y| !y.is_empty()),
            phrases: resolve(
                self.flavor
                    .phrases
                    .unwrap_or_else(|| PathBuf::from(default_phrases_file())),
            ),
            colors: self.flavor.colors.map(resolve),
        })
    }
}

/// Validated settings the bot runs with.
#[derive(Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Bot nick, lowercased.
    pub nick: String,
    pub pass: String,
    /// Channel with leading `#`, lowercased.
    pub channel: String,
    /// Owner nick, lowercased.
    pub owner: Option<String>,
    pub command_prefix: char,
    /// Hours east of UTC.
    pub utc_offset: i32,
    pub message_interval: Duration,
    pub youtube: Option<String>,
    pub phrases: PathBuf,
    pub colors: Option<PathBuf>,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("nick", &self.nick)
            .field("pass", &"<redacted>")
            .field("channel", &self.channel)
            .field("owner", &self.owner)
            .field("command_prefix", &self.command_prefix)
            .field("utc_offset", &self.utc_offset)
            .field("message_interval", &self.message_interval)
            .field("youtube", &self.youtube)
            .field("phrases", &self.phrases)
            .field("colors", &self.colors)
            .finish()
    }
}
