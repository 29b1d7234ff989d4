//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Invalid base URL.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid duration value.
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// The API key cannot be sent as an HTTP header.
    #[error("Invalid API key: must be visible ASCII without whitespace")]
    InvalidApiKey,

    /// The webhook secret is unusable.
    #[error("Invalid webhook secret: {0}")]
    InvalidSecret(&'static str),

    /// The HTTP transport could not be initialized.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The runtime backing the blocking client could not be started.
    #[error("Failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Environment variable names consulted by [`Settings`](super::Settings).
pub mod env {
    /// API key.
    pub const API_KEY: &str = "NOPE_API_KEY";
    /// Base URL override for self-hosted deployments.
    pub const BASE_URL: &str = "NOPE_BASE_URL";
    /// Request timeout in seconds.
    pub const TIMEOUT: &str = "NOPE_TIMEOUT";
    /// Webhook signing secret.
    pub const WEBHOOK_SECRET: &str = "NOPE_WEBHOOK_SECRET";
}

impl ConfigError {
    /// Creates an `InvalidDuration` error.
    #[must_use]
    pub fn duration(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidDuration {
            field,
            reason: reason.into(),
        }
    }
}
