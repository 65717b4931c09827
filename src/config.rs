//! Tracker configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).
//!
//! | Variable       | Default          |
//! |----------------|------------------|
//! | `LISTEN_ADDR`  | `0.0.0.0:5000`   |
//! | `COUNTER_FILE` | `tea_count.json` |
//! | `LOG_FORMAT`   | `text`           |

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default bind address, kept on the legacy port.
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";

/// Default counter file, relative to the working directory.
const DEFAULT_COUNTER_FILE: &str = "tea_count.json";

/// Configuration errors surfaced at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `LISTEN_ADDR` is not a socket address.
    #[error("invalid LISTEN_ADDR {value:?}: {source}")]
    InvalidListenAddr {
        /// Raw value from the environment.
        value: String,
        /// Parse failure.
        #[source]
        source: std::net::AddrParseError,
    },

    /// `COUNTER_FILE` is set but empty.
    #[error("COUNTER_FILE must not be empty")]
    EmptyCounterFile,

    /// `LOG_FORMAT` is neither `text` nor `json`.
    #[error("invalid LOG_FORMAT {0:?}: expected \"text\" or \"json\"")]
    InvalidLogFormat(String),
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event, for log shippers.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidLogFormat(s.to_string())),
        }
    }
}

/// Top-level tracker configuration.
///
/// Loaded once at startup via [`TrackerConfig::from_env`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:5000`).
    pub listen_addr: SocketAddr,

    /// Canonical location of the counter file.
    pub counter_file: PathBuf,

    /// Log output format.
    pub log_format: LogFormat,
}

impl TrackerConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `LISTEN_ADDR` or `LOG_FORMAT` cannot be
    /// parsed, or `COUNTER_FILE` is empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`TrackerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = raw_addr
            .parse()
            .map_err(|source| ConfigError::InvalidListenAddr {
                value: raw_addr,
                source,
            })?;

        let counter_file = match lookup("COUNTER_FILE") {
            Some(value) if value.trim().is_empty() => return Err(ConfigError::EmptyCounterFile),
            Some(value) => PathBuf::from(value),
            None => PathBuf::from(DEFAULT_COUNTER_FILE),
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(value) => value.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            listen_addr,
            counter_file,
            log_format,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<TrackerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        TrackerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_match_legacy_deployment() {
        let Ok(config) = load(&[]) else {
            panic!("defaults must be valid");
        };
        assert_eq!(config.listen_addr.port(), 5000);
        assert_eq!(config.counter_file, PathBuf::from("tea_count.json"));
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn reads_overrides() {
        let result = load(&[
            ("LISTEN_ADDR", "127.0.0.1:8080"),
            ("COUNTER_FILE", "/var/lib/tea/count.json"),
        ]);
        assert!(matches!(
            result,
            Ok(TrackerConfig { listen_addr, counter_file, .. })
                if listen_addr.port() == 8080
                    && counter_file == PathBuf::from("/var/lib/tea/count.json")
        ));
    }

    #[test]
    fn rejects_bad_listen_addr() {
        let result = load(&[("LISTEN_ADDR", "not-an-addr")]);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidListenAddr { ref value, .. }) if value == "not-an-addr"
        ));
    }

    #[test]
    fn rejects_empty_counter_file() {
        let result = load(&[("COUNTER_FILE", "  ")]);
        assert!(matches!(result, Err(ConfigError::EmptyCounterFile)));
    }

    #[test]
    fn selects_json_logs() {
        let result = load(&[("LOG_FORMAT", "JSON")]);
        assert!(matches!(
            result,
            Ok(TrackerConfig {
                log_format: LogFormat::Json,
                ..
            })
        ));
    }

    #[test]
    fn rejects_unknown_log_format() {
        let result = load(&[("LOG_FORMAT", "xml")]);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidLogFormat(ref value)) if value == "xml"
        ));
    }
}
