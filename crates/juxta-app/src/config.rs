//! Server settings read from the environment.
//!
//! # Design
//! - Every variable is optional; defaults suit a local development server.
//! - Present-but-invalid values fail startup instead of being silently replaced.

use std::net::{AddrParseError, SocketAddr};

use juxta_telemetry::{COMPILED_BUILD_SHA, DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig};
use thiserror::Error;

/// Listener address variable.
pub const BIND_ADDR_ENV: &str = "JUXTA_BIND_ADDR";
/// Log level variable; `RUST_LOG` still takes precedence at runtime.
pub const LOG_LEVEL_ENV: &str = "JUXTA_LOG_LEVEL";
/// Log format variable (`json` or `pretty`).
pub const LOG_FORMAT_ENV: &str = "JUXTA_LOG_FORMAT";
/// Build identifier variable; overrides the one compiled into the binary.
pub const BUILD_SHA_ENV: &str = "JUXTA_BUILD_SHA";
/// Listener address used when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:7080";

/// Invalid server settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The bind address did not parse.
    #[error("invalid bind address")]
    InvalidBindAddr {
        /// Rejected value.
        value: String,
        /// Parse failure.
        source: AddrParseError,
    },
    /// The log format is not one of the supported names.
    #[error("invalid log format")]
    InvalidLogFormat {
        /// Rejected value.
        value: String,
    },
}

/// Resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address the HTTP listener binds.
    pub bind_addr: SocketAddr,
    /// Default tracing filter.
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
    /// Build identifier reported in spans and `/health`.
    pub build_sha: String,
}

impl ServerConfig {
    /// Read settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, treating blank values as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let raw_addr = read(BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: raw_addr.clone(),
                source,
            })?;

        let log_format = match read(LOG_FORMAT_ENV) {
            None => LogFormat::infer(),
            Some(value) => LogFormat::from_name(&value)
                .ok_or(ConfigError::InvalidLogFormat { value })?,
        };

        Ok(Self {
            bind_addr,
            log_level: read(LOG_LEVEL_ENV).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_format,
            build_sha: read(BUILD_SHA_ENV).unwrap_or_else(|| COMPILED_BUILD_SHA.to_string()),
        })
    }

    /// Logging settings derived from this configuration.
    #[must_use]
    pub fn logging(&self) -> LoggingConfig<'_> {
        LoggingConfig {
            level: &self.log_level,
            format: self.log_format,
            build_sha: &self.build_sha,
        }
    }
}
