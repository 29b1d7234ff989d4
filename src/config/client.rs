//! Immutable client and webhook configuration values.

use std::fmt;
use std::time::Duration;

use http::HeaderValue;
use url::Url;

use super::defaults;
use super::error::ConfigError;

/// API key sent as a bearer credential.
///
/// `Debug` and `Display` never reveal the key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a key, rejecting values that cannot appear in an HTTP header.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiKey`] for empty keys or keys with
    /// whitespace or non-visible characters.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() || !key.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(ConfigError::InvalidApiKey);
        }
        Ok(Self(key))
    }

    /// Returns the raw key.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Builds the `Authorization: Bearer ...` header value.
    pub(crate) fn bearer_header(&self) -> HeaderValue {
        let mut value = HeaderValue::try_from(format!("Bearer {}", self.0))
            .unwrap_or_else(|_| HeaderValue::from_static("Bearer"));
        value.set_sensitive(true);
        value
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Settings for one client instance.
///
/// Created once, never mutated, owned by the client.
///
/// # Example
///
/// ```
/// use nope::config::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::builder()
///     .api_key("nope_live_abc123")
///     .base_url("http://localhost:8788/")
///     .timeout(Duration::from_secs(60))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.base_url(), "http://localhost:8788");
/// assert!(!config.is_demo());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: Option<ApiKey>,
    base_url: Url,
    timeout: Duration,
    demo: bool,
}

impl ClientConfig {
    /// Starts a builder with all defaults.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// The configured API key, if any.
    #[must_use]
    pub const fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// True when requests go to the unauthenticated demo endpoints.
    ///
    /// Demo mode is on when requested explicitly or when no key is set.
    #[must_use]
    pub const fn is_demo(&self) -> bool {
        self.demo || self.api_key.is_none()
    }

    /// Resolves an absolute endpoint URL for `path` (e.g. `/v1/evaluate`).
    ///
    /// Any path prefix on the base URL is preserved.
    pub(crate) fn endpoint_url(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path.trim_start_matches('/'))
    }
}

impl fmt::Display for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ClientConfig {{ base_url: {}, timeout: {}s, demo: {}, api_key: {} }}",
            self.base_url(),
            self.timeout.as_secs(),
            self.is_demo(),
            if self.api_key.is_some() { "set" } else { "none" },
        )
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default, Clone)]
pub struct ClientConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    demo: bool,
}

impl ClientConfigBuilder {
    /// Sets the API key. An empty key means "no key" (demo mode).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the API key if one is given.
    #[must_use]
    pub fn maybe_api_key(mut self, key: Option<String>) -> Self {
        if key.is_some() {
            self.api_key = key;
        }
        self
    }

    /// Overrides the production base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Forces demo mode even when a key is configured.
    #[must_use]
    pub const fn demo(mut self, demo: bool) -> Self {
        self.demo = demo;
        self
    }

    /// Validates and freezes the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute http(s) URL,
    /// the timeout is zero, or the API key is not header-safe.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .map(ApiKey::new)
            .transpose()?;

        let raw_url = self.base_url.as_deref().unwrap_or(defaults::BASE_URL);
        let base_url = parse_base_url(raw_url)?;

        let timeout = self.timeout.unwrap_or_else(defaults::timeout);
        if timeout.is_zero() {
            return Err(ConfigError::duration("timeout", "must be greater than zero"));
        }

        Ok(ClientConfig {
            api_key,
            base_url,
            timeout,
            demo: self.demo,
        })
    }
}

/// Parses a base URL and gives it exactly one trailing slash so that
/// relative joins keep any path prefix.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    let normalized = format!("{}/", raw.trim().trim_end_matches('/'));
    let url = Url::parse(&normalized).map_err(|e| invalid(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{other}'"))),
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("base URL must not carry a query or fragment".to_string()));
    }

    Ok(url)
}

/// Shared secret used to sign webhook payloads.
///
/// `Debug` never reveals the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookSecret(Vec<u8>);

impl WebhookSecret {
    /// Wraps a secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSecret`] for an empty secret.
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, ConfigError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(ConfigError::InvalidSecret("must not be empty"));
        }
        Ok(Self(secret.to_vec()))
    }

    /// Returns the raw secret bytes.
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebhookSecret(***)")
    }
}

/// Settings for verifying inbound webhooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    /// Shared signing secret.
    pub secret: WebhookSecret,
    /// Maximum accepted clock distance; zero disables the freshness check.
    pub max_age: Duration,
}

impl WebhookConfig {
    /// Creates webhook settings with the default freshness window.
    #[must_use]
    pub const fn new(secret: WebhookSecret) -> Self {
        Self {
            secret,
            max_age: defaults::webhook_max_age(),
        }
    }

    /// Sets the freshness window.
    #[must_use]
    pub const fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }
}
