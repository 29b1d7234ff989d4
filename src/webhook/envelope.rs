//! The signed parts of an inbound webhook request.

use http::HeaderMap;

/// Header carrying the hex signature.
pub const SIGNATURE_HEADER: &str = "x-nope-signature";

/// Header carrying the Unix timestamp the signature covers.
pub const TIMESTAMP_HEADER: &str = "x-nope-timestamp";

/// Raw payload plus the signature and timestamp header values, borrowed
/// from the inbound request for the duration of one verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebhookEnvelope<'a> {
    payload: &'a [u8],
    signature: &'a str,
    timestamp: &'a str,
}

impl<'a> WebhookEnvelope<'a> {
    /// Creates an envelope from already-extracted values.
    #[must_use]
    pub const fn new(payload: &'a [u8], signature: &'a str, timestamp: &'a str) -> Self {
        Self {
            payload,
            signature,
            timestamp,
        }
    }

    /// Extracts the signature and timestamp headers.
    ///
    /// A missing or non-ASCII header is read as empty, which later fails
    /// verification as a malformed timestamp or a mismatch.
    #[must_use]
    pub fn from_headers(headers: &'a HeaderMap, payload: &'a [u8]) -> Self {
        let header = move |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
        };
        Self::new(payload, header(SIGNATURE_HEADER), header(TIMESTAMP_HEADER))
    }

    /// Raw body bytes, exactly as received.
    #[must_use]
    pub const fn payload(&self) -> &'a [u8] {
        self.payload
    }

    #[must_use]
    pub const fn signature(&self) -> &'a str {
        self.signature
    }

    #[must_use]
    pub const fn timestamp(&self) -> &'a str {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_headers_case_insensitively() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::HeaderName::from_bytes(b"X-NOPE-Signature").unwrap(),
            "abc123".parse().unwrap(),
        );
        headers.insert(
            http::HeaderName::from_bytes(b"X-NOPE-Timestamp").unwrap(),
            "1700000000".parse().unwrap(),
        );

        let envelope = WebhookEnvelope::from_headers(&headers, b"{}");

        assert_eq!(envelope.signature(), "abc123");
        assert_eq!(envelope.timestamp(), "1700000000");
        assert_eq!(envelope.payload(), b"{}");
    }

    #[test]
    fn missing_headers_are_empty() {
        let headers = HeaderMap::new();

        let envelope = WebhookEnvelope::from_headers(&headers, b"{}");

        assert_eq!(envelope.signature(), "");
        assert_eq!(envelope.timestamp(), "");
    }
}
