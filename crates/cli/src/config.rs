//! Configuration loading from idle-notify.toml.

use hook::HandlerOptions;
use notifier::{DesktopNotifier, ERROR_ICON, INFO_ICON, NotifySend, ShellNotifier};
use opencode::{DEFAULT_SERVER_URL, OpencodeClient};
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "idle-notify";
const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Where the OpenCode server listens.
    #[serde(default)]
    pub server: ServerConfig,

    /// What notifications look like.
    #[serde(default)]
    pub notification: NotificationConfig,

    /// How notifications are delivered.
    #[serde(default)]
    pub notifier: NotifierConfig,
}

/// OpenCode server connection.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_url")]
    pub url: String,

    /// Project directory to scope requests to.
    pub directory: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            directory: None,
        }
    }
}

/// Notification presentation.
#[derive(Debug, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_title")]
    pub title: String,

    /// Maximum words in a reply preview. Must be at least 1.
    #[serde(default = "default_word_limit")]
    pub word_limit: usize,

    #[serde(default = "default_icon")]
    pub icon: String,

    #[serde(default = "default_error_icon")]
    pub error_icon: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        let defaults = HandlerOptions::default();
        Self {
            title: defaults.title,
            word_limit: defaults.word_limit.get(),
            icon: defaults.info_icon,
            error_icon: defaults.error_icon,
        }
    }
}

/// Notification command.
#[derive(Debug, Deserialize)]
pub struct NotifierConfig {
    /// Program to run, or a command line prefix when `shell` is set.
    #[serde(default = "default_program")]
    pub program: String,

    /// Extra arguments placed before the title. Ignored when `shell` is set.
    #[serde(default)]
    pub args: Vec<String>,

    /// Run `program` through `sh -c` with quoted arguments appended.
    #[serde(default)]
    pub shell: bool,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: Vec::new(),
            shell: false,
        }
    }
}

fn default_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_title() -> String {
    HandlerOptions::default().title
}

fn default_word_limit() -> usize {
    HandlerOptions::default().word_limit.get()
}

fn default_icon() -> String {
    INFO_ICON.to_string()
}

fn default_error_icon() -> String {
    ERROR_ICON.to_string()
}

fn default_program() -> String {
    "notify-send".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, else from the default location if a file
    /// exists there, else fall back to defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match default_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.notification.word_limit == 0 {
            return Err(ConfigError::Invalid(
                "notification.word_limit must be at least 1".to_string(),
            ));
        }
        if self.notifier.program.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "notifier.program must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Word limit for previews.
    pub fn word_limit(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.notification.word_limit).ok_or_else(|| {
            ConfigError::Invalid("notification.word_limit must be at least 1".to_string())
        })
    }

    /// Build the handler options.
    pub fn handler_options(&self) -> Result<HandlerOptions, ConfigError> {
        Ok(HandlerOptions {
            title: self.notification.title.clone(),
            word_limit: self.word_limit()?,
            info_icon: self.notification.icon.clone(),
            error_icon: self.notification.error_icon.clone(),
        })
    }

    /// Build the notifier.
    pub fn notifier(&self) -> DesktopNotifier {
        let cfg = &self.notifier;
        if cfg.shell {
            DesktopNotifier::Shell(ShellNotifier::new(&cfg.program))
        } else {
            DesktopNotifier::Exec(NotifySend::with_program(&cfg.program).with_args(&cfg.args))
        }
    }

    /// Build the server client. `server_override` takes precedence over the
    /// configured URL.
    pub fn client(&self, server_override: Option<&str>) -> Result<OpencodeClient, opencode::Error> {
        let url = server_override.unwrap_or(&self.server.url);
        let mut builder = OpencodeClient::builder(url);
        if let Some(directory) = &self.server.directory {
            builder = builder.directory(directory);
        }
        builder.build()
    }
}

/// `$XDG_CONFIG_HOME/idle-notify/config.toml`, or `~/.config/...` when unset.
pub fn default_path() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .map(|p| p.join(CONFIG_DIR).join(CONFIG_FILE))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}
