//! Blocking NOPE client.

use tokio::runtime::{Builder, Runtime};

use super::{ApiError, NopeClient};
use crate::config::{ClientConfig, ConfigError};
use crate::transport::{HttpClient, ReqwestClient};
use crate::types::{
    Conversation, CountryList, DetectedCountry, EvaluateRequest, EvaluateResponse, IngestResult,
    OversightAnalysis, ScreenResponse, SignpostResponse, SmartSignpostResponse,
};

/// Blocking client for the NOPE API.
///
/// Wraps a [`NopeClient`] and a private current-thread runtime; each method
/// blocks the calling thread on the async operation, so validation,
/// dispatch and error mapping are shared with the async client.
///
/// Must not be used from inside an async context.
///
/// # Example
///
/// ```no_run
/// use nope::api::BlockingClient;
/// use nope::config::ClientConfig;
/// use nope::types::EvaluateRequest;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = BlockingClient::new(ClientConfig::builder().api_key("nope_live_...").build()?)?;
/// let result = client.evaluate(&EvaluateRequest::text("I feel hopeless"))?;
/// println!("Show resources: {}", result.show_resources);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct BlockingClient<H = ReqwestClient> {
    inner: NopeClient<H>,
    runtime: Runtime,
}

impl BlockingClient<ReqwestClient> {
    /// Creates a blocking client backed by reqwest.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the transport or runtime cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: NopeClient::new(config)?,
            runtime: build_runtime()?,
        })
    }
}

impl<H: HttpClient> BlockingClient<H> {
    /// Creates a blocking client over any transport.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Runtime`] if the runtime cannot be started.
    pub fn with_http_client(config: ClientConfig, http: H) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: NopeClient::with_http_client(config, http),
            runtime: build_runtime()?,
        })
    }

    /// Returns the client's configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        self.inner.config()
    }

    /// Blocking [`NopeClient::evaluate`].
    ///
    /// # Errors
    ///
    /// See [`NopeClient::evaluate`].
    pub fn evaluate(&self, request: &EvaluateRequest) -> Result<EvaluateResponse, ApiError> {
        self.runtime.block_on(self.inner.evaluate(request))
    }

    /// Blocking [`NopeClient::screen`].
    ///
    /// # Errors
    ///
    /// See [`NopeClient::evaluate`].
    #[deprecated(note = "the screening endpoint is legacy; use `evaluate`")]
    #[allow(deprecated)]
    pub fn screen(&self, request: &EvaluateRequest) -> Result<ScreenResponse, ApiError> {
        self.runtime.block_on(self.inner.screen(request))
    }

    /// Blocking [`NopeClient::oversight_analyze`].
    ///
    /// # Errors
    ///
    /// See [`NopeClient::oversight_analyze`].
    pub fn oversight_analyze(
        &self,
        conversation: &Conversation,
    ) -> Result<OversightAnalysis, ApiError> {
        self.runtime
            .block_on(self.inner.oversight_analyze(conversation))
    }

    /// Blocking [`NopeClient::oversight_ingest`].
    ///
    /// # Errors
    ///
    /// See [`NopeClient::oversight_ingest`].
    pub fn oversight_ingest(
        &self,
        conversations: &[Conversation],
        webhook_url: Option<&str>,
    ) -> Result<IngestResult, ApiError> {
        self.runtime
            .block_on(self.inner.oversight_ingest(conversations, webhook_url))
    }

    /// Blocking [`NopeClient::signpost`].
    ///
    /// # Errors
    ///
    /// See [`NopeClient::signpost`].
    pub fn signpost(
        &self,
        country: &str,
        scopes: &[&str],
        urgent: Option<bool>,
    ) -> Result<SignpostResponse, ApiError> {
        self.runtime
            .block_on(self.inner.signpost(country, scopes, urgent))
    }

    /// Blocking [`NopeClient::signpost_smart`].
    ///
    /// # Errors
    ///
    /// See [`NopeClient::signpost_smart`].
    pub fn signpost_smart(
        &self,
        country: &str,
        query: &str,
    ) -> Result<SmartSignpostResponse, ApiError> {
        self.runtime
            .block_on(self.inner.signpost_smart(country, query))
    }

    /// Blocking [`NopeClient::signpost_countries`].
    ///
    /// # Errors
    ///
    /// See [`NopeClient::signpost_countries`].
    pub fn signpost_countries(&self) -> Result<CountryList, ApiError> {
        self.runtime.block_on(self.inner.signpost_countries())
    }

    /// Blocking [`NopeClient::detect_country`].
    ///
    /// # Errors
    ///
    /// See [`NopeClient::detect_country`].
    pub fn detect_country(&self) -> Result<DetectedCountry, ApiError> {
        self.runtime.block_on(self.inner.detect_country())
    }
}

fn build_runtime() -> Result<Runtime, ConfigError> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ConfigError::Runtime)
}
