//! Error types for webhook verification.

use thiserror::Error;

/// Why a webhook was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureFailure {
    /// The timestamp header is missing or not an integer.
    #[error("timestamp is missing or not a Unix time")]
    MalformedTimestamp,

    /// The timestamp is too far from the current time.
    #[error("timestamp is {age_secs}s away from now (limit {max_age_secs}s)")]
    Stale {
        /// Distance between the timestamp and now
        age_secs: u64,
        /// Configured limit
        max_age_secs: u64,
    },

    /// The signature does not match the payload and secret.
    #[error("signature does not match")]
    Mismatch,

    /// The signature matched but the payload is not a valid event.
    #[error("payload is not a valid event: {0}")]
    MalformedPayload(String),

    /// The MAC could not be keyed with the secret.
    #[error("secret cannot key the MAC")]
    InvalidSecret,
}

/// Error returned when a webhook fails verification.
///
/// Every rejection has the same error type; [`reason`](Self::reason)
/// tells them apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Webhook signature rejected: {reason}")]
pub struct SignatureError {
    reason: SignatureFailure,
}

impl SignatureError {
    /// The specific reason for the rejection.
    #[must_use]
    pub const fn reason(&self) -> &SignatureFailure {
        &self.reason
    }

    /// True if the signature was valid but too old (or too far in the future).
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        matches!(self.reason, SignatureFailure::Stale { .. })
    }
}

impl From<SignatureFailure> for SignatureError {
    fn from(reason: SignatureFailure) -> Self {
        Self { reason }
    }
}
