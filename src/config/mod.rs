//! Configuration management

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::chat::DEFAULT_MAX_MESSAGE_LEN;
use crate::connectivity::DEFAULT_HANDSHAKE_TIMEOUT;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] ::config::ConfigError),
    #[error("chat.max_message_len must be at least 1")]
    InvalidMessageLimit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path shown when the shell starts
    #[serde(default = "default_initial_path")]
    pub initial_path: String,

    #[serde(default)]
    pub connectivity: ConnectivityConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub feed: FeedConfig,
}

fn default_initial_path() -> String {
    "/".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_path: default_initial_path(),
            connectivity: ConnectivityConfig::default(),
            chat: ChatConfig::default(),
            feed: FeedConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectivityConfig {
    #[serde(default = "default_handshake_timeout_ms")]
    pub handshake_timeout_ms: u64,
}

fn default_handshake_timeout_ms() -> u64 {
    DEFAULT_HANDSHAKE_TIMEOUT.as_millis() as u64
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            handshake_timeout_ms: default_handshake_timeout_ms(),
        }
    }
}

impl ConnectivityConfig {
    pub fn handshake_timeout(&self) -> Duration {
        Duration::from_millis(self.handshake_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_max_message_len")]
    pub max_message_len: usize,
}

fn default_max_message_len() -> usize {
    DEFAULT_MAX_MESSAGE_LEN
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_message_len: default_max_message_len(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedConfig {
    /// JSON file with an operational snapshot; built-in demo data when unset
    pub path: Option<PathBuf>,
}

/// Directory holding `config.{toml,json,yaml}`
pub fn config_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "v2v-safety", "v2v-shell")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_dir())
}

pub fn load_config_from(dir: &Path) -> Result<Config, ConfigError> {
    load_with_env(dir, environment())
}

/// `V2V_INITIAL_PATH`, `V2V_CONNECTIVITY__HANDSHAKE_TIMEOUT_MS`, etc.
fn environment() -> ::config::Environment {
    ::config::Environment::with_prefix("V2V")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn load_with_env(dir: &Path, env: ::config::Environment) -> Result<Config, ConfigError> {
    let config = ::config::Config::builder()
        // Load from config file if it exists
        .add_source(
            ::config::File::with_name(&dir.join("config").to_string_lossy()).required(false),
        )
        // Override with environment variables
        .add_source(env)
        .build()?;

    let config: Config = config.try_deserialize()?;
    if config.chat.max_message_len == 0 {
        return Err(ConfigError::InvalidMessageLimit);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(dir.path()).unwrap();
        assert_eq!(config.initial_path, "/");
        assert_eq!(
            config.connectivity.handshake_timeout(),
            Duration::from_millis(2000)
        );
        assert_eq!(config.chat.max_message_len, DEFAULT_MAX_MESSAGE_LEN);
        assert!(config.feed.path.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            r#"
initial_path = "/fleet"

[connectivity]
handshake_timeout_ms = 250

[feed]
path = "/tmp/feed.json"
"#,
        )
        .unwrap();

        let config = load_config_from(dir.path()).unwrap();
        assert_eq!(config.initial_path, "/fleet");
        assert_eq!(config.connectivity.handshake_timeout_ms, 250);
        assert_eq!(config.chat.max_message_len, DEFAULT_MAX_MESSAGE_LEN);
        assert_eq!(config.feed.path, Some(PathBuf::from("/tmp/feed.json")));
    }

    #[test]
    fn test_zero_message_limit_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "[chat]\nmax_message_len = 0\n",
        )
        .unwrap();

        assert!(matches!(
            load_config_from(dir.path()),
            Err(ConfigError::InvalidMessageLimit)
        ));
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "initial_path = \"/emergency\"\n\n[connectivity]\nhandshake_timeout_ms = 250\n",
        )
        .unwrap();

        let vars = ::config::Map::from([
            (
                "V2V_CONNECTIVITY__HANDSHAKE_TIMEOUT_MS".to_string(),
                "500".to_string(),
            ),
            ("V2V_INITIAL_PATH".to_string(), "/fleet".to_string()),
            ("OTHER_INITIAL_PATH".to_string(), "/driver".to_string()),
        ]);
        let config = load_with_env(dir.path(), environment().source(Some(vars))).unwrap();
        assert_eq!(config.connectivity.handshake_timeout_ms, 500);
        assert_eq!(config.initial_path, "/fleet");
    }
}
