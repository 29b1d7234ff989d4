//! Async NOPE client.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::endpoint::Endpoint;
use super::error::{ApiError, check};
use super::validate;
use crate::config::{ClientConfig, ConfigError};
use crate::transport::{HttpClient, HttpError, HttpRequest, ReqwestClient};
use crate::types::{
    Conversation, CountryList, DetectedCountry, EvaluateRequest, EvaluateResponse, IngestResult,
    OversightAnalysis, ScreenResponse, SignpostResponse, SmartSignpostResponse,
};

/// Async client for the NOPE API.
///
/// Every operation follows the same path: validate locally, build the
/// request (bearer key, or demo path when no key is set), send it with the
/// configured timeout, map the status, decode the body. Nothing is retried.
///
/// The client holds no mutable state; share it freely between tasks.
///
/// Requires a tokio runtime with the time driver enabled.
///
/// # Type Parameters
///
/// - `H`: transport, [`ReqwestClient`] by default
///
/// # Example
///
/// ```no_run
/// use nope::api::NopeClient;
/// use nope::config::ClientConfig;
/// use nope::types::{EvaluateConfig, EvaluateRequest, Message};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = NopeClient::new(ClientConfig::builder().api_key("nope_live_...").build()?)?;
///
/// let request = EvaluateRequest::messages(vec![Message::user("I'm feeling down")])
///     .with_config(EvaluateConfig::default().with_user_country("US"));
/// let result = client.evaluate(&request).await?;
///
/// println!("Severity: {:?}", result.severity());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct NopeClient<H = ReqwestClient> {
    config: ClientConfig,
    http: H,
}

impl NopeClient<ReqwestClient> {
    /// Creates a client backed by reqwest.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the transport cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let http = ReqwestClient::with_timeout(config.timeout()).map_err(ConfigError::HttpClient)?;
        Ok(Self { config, http })
    }
}

impl<H> NopeClient<H> {
    /// Creates a client over any transport.
    #[must_use]
    pub const fn with_http_client(config: ClientConfig, http: H) -> Self {
        Self { config, http }
    }

    /// Returns the client's configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }
}

/// Wire body of an oversight analysis request.
#[derive(Serialize)]
struct AnalyzeBody<'a> {
    conversation: &'a Conversation,
}

/// Wire body of an oversight ingest request.
#[derive(Serialize)]
struct IngestBody<'a> {
    conversations: &'a [Conversation],
    #[serde(skip_serializing_if = "Option::is_none")]
    webhook_url: Option<&'a str>,
}

/// Wire body of a smart signpost request.
#[derive(Serialize)]
struct SmartBody<'a> {
    country: &'a str,
    query: &'a str,
}

impl<H: HttpClient> NopeClient<H> {
    /// Classifies risk in a conversation or free text.
    ///
    /// `config.dry_run` and every other option are forwarded unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] without sending anything if not
    /// exactly one of `messages` and `text` is set, or any [`ApiError`]
    /// for a failed call.
    pub async fn evaluate(&self, request: &EvaluateRequest) -> Result<EvaluateResponse, ApiError> {
        validate::evaluate_request(request)?;
        self.send(Endpoint::Evaluate, &[], Some(request)).await
    }

    /// Legacy screening endpoint.
    ///
    /// Emits a `tracing` warning on every call and still completes it.
    ///
    /// # Errors
    ///
    /// Same as [`evaluate`](Self::evaluate).
    #[deprecated(note = "the screening endpoint is legacy; use `evaluate`")]
    pub async fn screen(&self, request: &EvaluateRequest) -> Result<ScreenResponse, ApiError> {
        tracing::warn!("screen() calls the legacy /v1/screen endpoint; migrate to evaluate()");
        validate::evaluate_request(request)?;
        self.send(Endpoint::Screen, &[], Some(request)).await
    }

    /// Analyzes how an AI assistant behaved across one conversation.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for an empty id or message list,
    /// or any [`ApiError`] for a failed call.
    pub async fn oversight_analyze(
        &self,
        conversation: &Conversation,
    ) -> Result<OversightAnalysis, ApiError> {
        validate::conversation("conversation", conversation)?;
        self.send(
            Endpoint::OversightAnalyze,
            &[],
            Some(&AnalyzeBody { conversation }),
        )
        .await
    }

    /// Submits a batch of conversations for oversight.
    ///
    /// Partial failure is reported in the result, not as an error.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for an empty batch, an invalid
    /// conversation or callback URL, or a response claiming more processed
    /// than received conversations; [`ApiError::Auth`] in demo mode; or any
    /// [`ApiError`] for a failed call.
    pub async fn oversight_ingest(
        &self,
        conversations: &[Conversation],
        webhook_url: Option<&str>,
    ) -> Result<IngestResult, ApiError> {
        validate::ingest_batch(conversations, webhook_url)?;

        let (status, result): (_, IngestResult) = self
            .send_with_status(
                Endpoint::OversightIngest,
                &[],
                Some(&IngestBody {
                    conversations,
                    webhook_url,
                }),
            )
            .await?;

        if result.processed > result.received {
            return Err(ApiError::unexpected_body(
                status,
                format!(
                    "{} conversations processed but only {} received",
                    result.processed, result.received
                ),
            ));
        }
        if result.has_partial_failure() {
            tracing::debug!(
                received = result.received,
                processed = result.processed,
                "Oversight batch partially processed"
            );
        }
        Ok(result)
    }

    /// Looks up crisis resources for a country.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `country` is not a 2-letter code,
    /// or any [`ApiError`] for a failed call.
    pub async fn signpost(
        &self,
        country: &str,
        scopes: &[&str],
        urgent: Option<bool>,
    ) -> Result<SignpostResponse, ApiError> {
        let country = validate::country_code(country)?;

        let mut query = vec![("country", country)];
        if !scopes.is_empty() {
            query.push(("scopes", scopes.join(",")));
        }
        if let Some(urgent) = urgent {
            query.push(("urgent", urgent.to_string()));
        }

        self.send(Endpoint::Signpost, &query, None::<&()>).await
    }

    /// Ranks a country's crisis resources against a free-text need.
    ///
    /// The ranking is returned sorted, with ranks forming 1..=k (ties allowed).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a bad country code, a blank
    /// query, or a ranking with gaps; or any [`ApiError`] for a failed call.
    pub async fn signpost_smart(
        &self,
        country: &str,
        query: &str,
    ) -> Result<SmartSignpostResponse, ApiError> {
        let country = validate::country_code(country)?;
        validate::non_blank("query", query)?;

        let (status, mut response): (_, SmartSignpostResponse) = self
            .send_with_status(
                Endpoint::SignpostSmart,
                &[],
                Some(&SmartBody {
                    country: &country,
                    query,
                }),
            )
            .await?;

        response
            .normalize_ranking()
            .map_err(|reason| ApiError::unexpected_body(status, reason))?;
        Ok(response)
    }

    /// Lists countries with resource coverage.
    ///
    /// # Errors
    ///
    /// Returns any [`ApiError`] for a failed call.
    pub async fn signpost_countries(&self) -> Result<CountryList, ApiError> {
        self.send(Endpoint::SignpostCountries, &[], None::<&()>)
            .await
    }

    /// Infers the caller's country from its network location.
    ///
    /// # Errors
    ///
    /// Returns any [`ApiError`] for a failed call.
    pub async fn detect_country(&self) -> Result<DetectedCountry, ApiError> {
        self.send(Endpoint::DetectCountry, &[], None::<&()>).await
    }

    async fn send<B, T>(
        &self,
        endpoint: Endpoint,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send_with_status(endpoint, query, body)
            .await
            .map(|(_, value)| value)
    }

    /// Runs steps 2-6 of a call and also returns the success status, for
    /// operations that validate the decoded body further.
    async fn send_with_status<B, T>(
        &self,
        endpoint: Endpoint,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<(http::StatusCode, T), ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self.build_request(endpoint, query, body)?;

        tracing::debug!(
            endpoint = endpoint.name(),
            method = %request.method,
            url = %request.url,
            demo = self.config.is_demo(),
            "Dispatching request"
        );

        let response =
            match tokio::time::timeout(self.config.timeout(), self.http.send(request)).await {
                Ok(result) => result?,
                Err(_elapsed) => return Err(HttpError::Timeout.into()),
            };

        if let Err(e) = check(&response) {
            tracing::debug!(endpoint = endpoint.name(), status = %response.status, error = %e, "Request failed");
            return Err(e);
        }

        let value = response
            .json()
            .map_err(|e| ApiError::unexpected_body(response.status, e))?;
        Ok((response.status, value))
    }

    fn build_request<B>(
        &self,
        endpoint: Endpoint,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<HttpRequest, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let demo = self.config.is_demo();
        let path = if demo {
            endpoint.demo_path().ok_or_else(|| ApiError::Auth {
                status: None,
                message: format!("{} requires an API key", endpoint.name()),
            })?
        } else {
            endpoint.path()
        };

        let url = self
            .config
            .endpoint_url(path)
            .map_err(|e| HttpError::InvalidUrl(e.to_string()))?;

        let mut request = HttpRequest::new(endpoint.method(), url)
            .with_query(query)
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("application/json"),
            );

        if let Some(key) = self.config.api_key().filter(|_| !demo) {
            request = request.with_header(http::header::AUTHORIZATION, key.bearer_header());
        }

        if let Some(body) = body {
            request = request.with_json(body).map_err(|e| {
                ApiError::invalid_field("body", format!("could not encode request: {e}"))
            })?;
        }

        Ok(request)
    }
}
