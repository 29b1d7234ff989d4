//! Error taxonomy for outbound calls and the status-to-error mapper.

use std::time::Duration;

use http::StatusCode;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::defaults;
use crate::transport::{HttpError, HttpResponse};

/// A problem with one input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Path of the offending field, e.g. `conversations[1].messages`.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl FieldIssue {
    /// Creates a field issue.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error type for every outbound NOPE operation.
///
/// Exactly one variant describes each failure. The client never retries;
/// use [`is_retryable`](Self::is_retryable) and
/// [`retry_after`](Self::retry_after) to drive a retry policy.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The credential is missing, invalid or not allowed to call this endpoint.
    #[error("Authentication failed: {message}")]
    Auth {
        /// HTTP status, or `None` when rejected locally (demo mode)
        status: Option<StatusCode>,
        /// Explanation from the service or the client
        message: String,
    },

    /// The credential is valid but its plan lacks a feature.
    #[error("Feature '{feature}' requires {required_access} access")]
    Feature {
        /// Feature that was requested
        feature: String,
        /// Access tier needed to use it
        required_access: String,
        /// Service message, if any
        message: Option<String>,
    },

    /// Too many requests.
    #[error("Rate limit exceeded; retry after {retry_after}s")]
    RateLimit {
        /// Seconds to wait before retrying
        retry_after: u64,
        /// Service message, if any
        message: Option<String>,
    },

    /// The request (or, for malformed success bodies, the response) is invalid.
    #[error("Validation failed: {message}")]
    Validation {
        /// HTTP status, or `None` when detected locally
        status: Option<StatusCode>,
        /// Summary of the problem
        message: String,
        /// Field-level detail, possibly empty
        details: Vec<FieldIssue>,
    },

    /// The service failed, or answered with a status the client does not expect.
    #[error("Server error ({status})")]
    Server {
        /// HTTP status as received
        status: StatusCode,
        /// Service message, if any
        message: Option<String>,
    },

    /// No response was received.
    #[error("Connection failed: {0}")]
    Connection(#[from] HttpError),
}

impl ApiError {
    /// Creates a locally detected validation error for one field.
    #[must_use]
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let issue = FieldIssue::new(field, message);
        Self::Validation {
            status: None,
            message: format!("{}: {}", issue.field, issue.message),
            details: vec![issue],
        }
    }

    /// Creates a validation error for a success body that does not match
    /// the expected shape.
    pub(crate) fn unexpected_body(status: StatusCode, reason: impl std::fmt::Display) -> Self {
        Self::Validation {
            status: Some(status),
            message: format!("unexpected response body: {reason}"),
            details: Vec::new(),
        }
    }

    /// Maps a non-success response onto the taxonomy.
    ///
    /// | Status | Variant |
    /// |---|---|
    /// | 401 | `Auth` |
    /// | 403 naming a feature and access tier | `Feature` |
    /// | 403 otherwise | `Auth` |
    /// | 429 | `RateLimit` |
    /// | 400, 422 | `Validation` |
    /// | anything else | `Server` |
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        let status = response.status;
        let body = ErrorBody::parse(response);

        match status {
            StatusCode::UNAUTHORIZED => Self::Auth {
                status: Some(status),
                message: body.message_or_reason(status),
            },
            StatusCode::FORBIDDEN => match (body.feature.clone(), body.required_access.clone()) {
                (Some(feature), Some(required_access)) => Self::Feature {
                    feature,
                    required_access,
                    message: body.message,
                },
                _ => Self::Auth {
                    status: Some(status),
                    message: body.message_or_reason(status),
                },
            },
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimit {
                retry_after: retry_after_header(response)
                    .or_else(|| body.retry_after.and_then(secs_from_f64))
                    .unwrap_or(defaults::RATE_LIMIT_RETRY_AFTER_SECS),
                message: body.message,
            },
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Self::Validation {
                status: Some(status),
                message: body.message_or_reason(status),
                details: body.details,
            },
            _ => Self::Server {
                status,
                message: body.message,
            },
        }
    }

    /// HTTP status of the response that caused this error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Auth { status, .. } | Self::Validation { status, .. } => *status,
            Self::Feature { .. } => Some(StatusCode::FORBIDDEN),
            Self::RateLimit { .. } => Some(StatusCode::TOO_MANY_REQUESTS),
            Self::Server { status, .. } => Some(*status),
            Self::Connection(_) => None,
        }
    }

    /// How long the service asked the caller to wait, for `RateLimit`.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimit { retry_after, .. } => Some(Duration::from_secs(*retry_after)),
            _ => None,
        }
    }

    /// True if repeating the same call later may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimit { .. } => true,
            Self::Server { status, .. } => status.is_server_error(),
            Self::Connection(e) => !matches!(e, HttpError::InvalidUrl(_)),
            Self::Auth { .. } | Self::Feature { .. } | Self::Validation { .. } => false,
        }
    }
}

/// Returns `Ok` for 2xx responses and the mapped error otherwise.
pub(crate) fn check(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        Ok(())
    } else {
        Err(ApiError::from_response(response))
    }
}

/// Best-effort view of an error body. Every field is optional and a body
/// that is not JSON at all still yields its text as the message.
#[derive(Debug, Default)]
struct ErrorBody {
    message: Option<String>,
    feature: Option<String>,
    required_access: Option<String>,
    retry_after: Option<f64>,
    details: Vec<FieldIssue>,
}

/// Keys that name the access tier a feature requires.
const REQUIRED_ACCESS_KEYS: &[&str] = &["required_access", "required_tier", "required_access_level"];

/// Upper bound on how much raw body text is carried into an error message.
const MAX_RAW_MESSAGE_LEN: usize = 200;

impl ErrorBody {
    /// Reads each field on its own, so one field of an unexpected type
    /// never hides the others. Fields may sit at the top level or inside
    /// an `error` object; the top level wins.
    fn parse(response: &HttpResponse) -> Self {
        let Ok(Value::Object(root)) = serde_json::from_slice::<Value>(&response.body) else {
            return Self::from_text(response);
        };
        let nested = root.get("error").and_then(Value::as_object);
        let sources: Vec<&Map<String, Value>> = std::iter::once(&root).chain(nested).collect();

        let message = root
            .get("error")
            .and_then(non_empty_str)
            .or_else(|| nested?.get("message").and_then(non_empty_str))
            .or_else(|| root.get("message").and_then(non_empty_str));

        Self {
            message,
            feature: find(&sources, &["feature"], non_empty_str),
            required_access: find(&sources, REQUIRED_ACCESS_KEYS, non_empty_str),
            retry_after: find(&sources, &["retry_after"], lenient_secs),
            details: find(&sources, &["details"], |v| Some(parse_details(v))).unwrap_or_default(),
        }
    }

    /// A body that is not a JSON object keeps its text as the message.
    fn from_text(response: &HttpResponse) -> Self {
        let message = response
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| t.chars().take(MAX_RAW_MESSAGE_LEN).collect());
        Self {
            message,
            ..Self::default()
        }
    }

    fn message_or_reason(&self, status: StatusCode) -> String {
        self.message.clone().unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("no message")
                .to_string()
        })
    }
}

/// First value under any of `keys` that `pick` accepts, searching each
/// source in order.
fn find<T>(
    sources: &[&Map<String, Value>],
    keys: &[&str],
    pick: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    sources
        .iter()
        .find_map(|source| keys.iter().find_map(|key| source.get(*key).and_then(&pick)))
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// A number, or a string holding one (`"42"`).
fn lenient_secs(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Accepts either `[{"field": .., "message": ..}]` or `{"field": "message"}`.
fn parse_details(value: &Value) -> Vec<FieldIssue> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| {
                let field = item
                    .get("field")
                    .or_else(|| item.get("path"))
                    .and_then(Value::as_str)?;
                let message = item.get("message").and_then(Value::as_str).unwrap_or("");
                Some(FieldIssue::new(field, message))
            })
            .collect(),
        Value::Object(map) => map
            .iter()
            .map(|(field, message)| {
                let message = match message {
                    Value::String(s) => s.clone(),
                    Value::Array(parts) => parts
                        .iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<_>>()
                        .join("; "),
                    other => other.to_string(),
                };
                FieldIssue::new(field.clone(), message)
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn retry_after_header(response: &HttpResponse) -> Option<u64> {
    let raw = response.header_str(http::header::RETRY_AFTER)?;
    secs_from_f64(raw.trim().parse::<f64>().ok()?)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn secs_from_f64(secs: f64) -> Option<u64> {
    (secs.is_finite() && secs >= 0.0).then(|| secs.ceil() as u64)
}
