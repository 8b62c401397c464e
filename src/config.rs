//! Application configuration loaded from environment variables
//!
//! A `.env` file in the working directory is loaded first when present.
//!
//! | Variable                          | Default    |
//! |-----------------------------------|------------|
//! | `MEOWTRICS_HOST`                  | `0.0.0.0`  |
//! | `MEOWTRICS_APP_PORT`              | `3003`     |
//! | `MEOWTRICS_SHUTDOWN_TIMEOUT_SECS` | `10`       |
//! | `MEOWTRICS_LOG_FILE`              | stdout     |
//! | `MEOWTRICS_LOG_FORMAT`            | `json`     |

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_APP_PORT: u16 = 3003;
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Log line encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Runtime settings for the server binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub app_port: u16,
    /// How long in-flight requests may run after a shutdown signal
    pub shutdown_timeout: Duration,
    pub log_file: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            app_port: DEFAULT_APP_PORT,
            shutdown_timeout: Duration::from_secs(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
            log_file: None,
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load from the process environment (and `.env`)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let app_port = match get("MEOWTRICS_APP_PORT") {
            Some(value) => parse("MEOWTRICS_APP_PORT", value)?,
            None => defaults.app_port,
        };

        let shutdown_timeout = match get("MEOWTRICS_SHUTDOWN_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(parse("MEOWTRICS_SHUTDOWN_TIMEOUT_SECS", value)?),
            None => defaults.shutdown_timeout,
        };

        let log_format = match get("MEOWTRICS_LOG_FORMAT") {
            Some(value) => {
                let normalized = value.trim().to_ascii_lowercase();
                match normalized.as_str() {
                    "json" => LogFormat::Json,
                    "pretty" | "text" => LogFormat::Pretty,
                    _ => {
                        return Err(ConfigError::Invalid {
                            key: "MEOWTRICS_LOG_FORMAT",
                            value,
                        })
                    }
                }
            }
            None => defaults.log_format,
        };

        Ok(Self {
            host: get("MEOWTRICS_HOST").unwrap_or(defaults.host),
            app_port,
            shutdown_timeout,
            log_file: get("MEOWTRICS_LOG_FILE").map(PathBuf::from),
            log_format,
        })
    }

    /// `host:port` to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.app_port)
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}
