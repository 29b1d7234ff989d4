//! Transport-level request and response values, and the [`HttpClient`] seam.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::HttpError;

/// One outbound call, fully resolved: absolute URL with query, headers and
/// an already-encoded body.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: http::Method,
    pub url: url::Url,
    pub headers: http::HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Starts a request with no headers and no body.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// Appends `pairs` to the URL's query string, in order.
    #[must_use]
    pub fn with_query(mut self, pairs: &[(&str, String)]) -> Self {
        if !pairs.is_empty() {
            self.url
                .query_pairs_mut()
                .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())));
        }
        self
    }

    /// Sets a header, replacing any previous value.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Encodes `body` as JSON and sets `Content-Type: application/json`.
    ///
    /// # Errors
    ///
    /// Returns the encoder error if `body` cannot be represented as JSON.
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_vec(body)?);
        self.headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );
        Ok(self)
    }
}

/// A response with any status and a fully buffered body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: http::StatusCode,
    pub headers: http::HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// True for 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The body as UTF-8, if it is.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// A header as a string, if present and visible ASCII.
    #[must_use]
    pub fn header_str(&self, name: impl http::header::AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the decoder error if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Sends requests on behalf of the NOPE clients.
///
/// [`ReqwestClient`](super::ReqwestClient) talks to the network; tests
/// plug in a recording mock. Implementations must not interpret the
/// status: a 500 is a successful send.
///
/// # Example
///
/// ```
/// use nope::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};
///
/// struct Offline;
///
/// impl HttpClient for Offline {
///     async fn send(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Err(HttpError::Timeout)
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Sends `req` and buffers the response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when no response was received.
    fn send(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}

impl<T: HttpClient> HttpClient for std::sync::Arc<T> {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).send(req).await
    }
}
