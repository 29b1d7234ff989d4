//! Layered configuration: environment over file over defaults.

use std::time::Duration;

use super::client::{ClientConfig, WebhookConfig, WebhookSecret};
use super::error::{ConfigError, env};
use super::toml::ConfigFile;

/// Fully resolved settings for a client and, optionally, a webhook verifier.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Outbound client configuration
    pub client: ClientConfig,

    /// Webhook verification, present only when a secret was configured
    pub webhook: Option<WebhookConfig>,
}

impl Settings {
    /// Resolves settings from the process environment and an optional file.
    ///
    /// # Errors
    ///
    /// Returns an error if any value fails validation.
    pub fn from_env(file: Option<&ConfigFile>) -> Result<Self, ConfigError> {
        Self::resolve(file, |name| std::env::var(name).ok())
    }

    /// Resolves settings with an injected environment lookup.
    ///
    /// Environment values win over file values, which win over defaults.
    /// A blank environment value counts as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout is not a whole number of seconds, or if
    /// the resulting client or webhook configuration is invalid.
    pub fn resolve<F>(file: Option<&ConfigFile>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let client_section = file.map(|f| &f.client);
        let webhook_section = file.map(|f| &f.webhook);

        let mut builder = ClientConfig::builder()
            .maybe_api_key(client_section.and_then(|c| c.api_key.clone()))
            .maybe_api_key(lookup(env::API_KEY))
            .demo(client_section.is_some_and(|c| c.demo));

        if let Some(url) = lookup(env::BASE_URL).or_else(|| client_section?.base_url.clone()) {
            builder = builder.base_url(url);
        }

        let timeout = match lookup(env::TIMEOUT) {
            Some(raw) => Some(parse_secs("timeout", &raw)?),
            None => client_section.and_then(|c| c.timeout),
        };
        if let Some(secs) = timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build()?;

        let secret = lookup(env::WEBHOOK_SECRET).or_else(|| webhook_section?.secret.clone());
        let webhook = secret
            .map(|s| -> Result<WebhookConfig, ConfigError> {
                let mut config = WebhookConfig::new(WebhookSecret::new(s)?);
                if let Some(max_age) = webhook_section.and_then(|w| w.max_age) {
                    config = config.with_max_age(Duration::from_secs(max_age));
                }
                Ok(config)
            })
            .transpose()?;

        Ok(Self { client, webhook })
    }
}

fn parse_secs(field: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::duration(field, format!("'{raw}' is not whole seconds: {e}")))
}
