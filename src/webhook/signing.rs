//! HMAC-SHA256 over the canonical `"{timestamp}.{payload}"` material.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::error::SignatureFailure;
use crate::config::WebhookSecret;

type HmacSha256 = Hmac<Sha256>;

/// Optional scheme prefix accepted on the signature header.
const SCHEME_PREFIX: &str = "sha256=";

/// A signature and the timestamp it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPayload {
    /// Lowercase hex HMAC-SHA256, without a scheme prefix.
    pub signature: String,
    /// Unix seconds the payload was signed at.
    pub timestamp: i64,
}

/// Computes the raw MAC over `timestamp`, `.` and `payload`.
pub(super) fn compute(
    secret: &WebhookSecret,
    timestamp: &str,
    payload: &[u8],
) -> Result<Vec<u8>, SignatureFailure> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret.expose())
        .map_err(|_| SignatureFailure::InvalidSecret)?;

    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);

    Ok(mac.finalize().into_bytes().to_vec())
}

/// Signs `payload` as of `timestamp`.
pub(super) fn sign_at(
    secret: &WebhookSecret,
    timestamp: i64,
    payload: &[u8],
) -> Result<SignedPayload, SignatureFailure> {
    let tag = compute(secret, &timestamp.to_string(), payload)?;
    Ok(SignedPayload {
        signature: hex::encode(tag),
        timestamp,
    })
}

/// Checks a supplied hex signature in constant time.
///
/// Undecodable signatures are a mismatch.
pub(super) fn check(
    secret: &WebhookSecret,
    timestamp: &str,
    payload: &[u8],
    supplied: &str,
) -> Result<(), SignatureFailure> {
    let supplied = supplied.trim();
    let supplied = supplied.strip_prefix(SCHEME_PREFIX).unwrap_or(supplied);
    let Ok(supplied) = hex::decode(supplied) else {
        return Err(SignatureFailure::Mismatch);
    };

    let expected = compute(secret, timestamp, payload)?;
    if bool::from(expected.as_slice().ct_eq(supplied.as_slice())) {
        Ok(())
    } else {
        Err(SignatureFailure::Mismatch)
    }
}
