//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from a TOML file.
///
/// All fields are optional so a file can be partial and be completed by
/// the environment or by defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// API client section
    #[serde(default)]
    pub client: ClientSection,

    /// Webhook verification section
    #[serde(default)]
    pub webhook: WebhookSection,
}

/// `[client]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    /// API key; omit for demo mode
    pub api_key: Option<String>,

    /// Base URL override
    pub base_url: Option<String>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,

    /// Force demo endpoints
    #[serde(default)]
    pub demo: bool,
}

/// `[webhook]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// Shared signing secret
    pub secret: Option<String>,

    /// Freshness window in seconds (0 disables the check)
    pub max_age: Option<u64>,
}

impl ConfigFile {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a commented configuration file.
#[must_use]
pub fn default_config_template() -> String {
    r#"# NOPE client configuration
# Environment variables (NOPE_API_KEY, NOPE_BASE_URL, NOPE_TIMEOUT,
# NOPE_WEBHOOK_SECRET) take precedence over this file.

[client]
# API key. Leave unset to use the demo endpoints.
# api_key = "nope_live_..."

# Base URL (default: https://api.nope.net)
# base_url = "https://api.nope.net"

# Request timeout in seconds (default: 30)
timeout = 30

# Use the demo endpoints even when an API key is set
# demo = false

[webhook]
# Shared secret used to verify X-NOPE-Signature
# secret = "whsec_..."

# Maximum age of a webhook timestamp in seconds (default: 300, 0 disables)
max_age = 300
"#
    .to_string()
}
