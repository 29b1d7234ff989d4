//! The reqwest-backed transport.

use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// User agent sent with every request.
const USER_AGENT: &str = concat!("nope-rust/", env!("CARGO_PKG_VERSION"));

/// [`HttpClient`] over a pooled `reqwest::Client` (rustls).
///
/// Clones share the connection pool, so one transport can back many
/// NOPE clients.
///
/// # Example
///
/// ```no_run
/// use nope::transport::{HttpClient, HttpRequest, ReqwestClient};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = ReqwestClient::with_timeout(Duration::from_secs(10))?;
/// let url = url::Url::parse("https://api.nope.net/v1/signpost/countries")?;
/// let response = transport.send(HttpRequest::new(http::Method::GET, url)).await?;
/// println!("{}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Transport with reqwest defaults and no timeout of its own.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Transport whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns the reqwest error if the TLS backend cannot be initialized.
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { inner })
    }

    /// Wraps a caller-configured client (proxies, custom roots).
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = req;

        let mut builder = self.inner.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(classify)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(classify)?;

        Ok(HttpResponse::new(status, headers, body.to_vec()))
    }
}

pub(super) fn classify(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else if e.is_builder() {
        HttpError::InvalidUrl(e.to_string())
    } else {
        HttpError::Connection(Box::new(e))
    }
}
