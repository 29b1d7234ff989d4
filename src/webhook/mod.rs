//! Verification of inbound NOPE webhooks.
//!
//! This module provides:
//! - Signature and freshness checks ([`WebhookVerifier`], [`verify`])
//! - Signing for test fixtures ([`sign`], [`SignedPayload`])
//! - Header extraction ([`WebhookEnvelope`])
//! - Decoded events ([`VerifiedEvent`], [`EventPayload`])
//!
//! A payload is signed as HMAC-SHA256 over `"{timestamp}.{payload}"` and
//! the signature travels hex-encoded in the `X-NOPE-Signature` header,
//! next to the Unix timestamp in `X-NOPE-Timestamp`.
//!
//! # Example
//!
//! ```
//! use nope::config::WebhookSecret;
//! use nope::webhook::{WebhookEnvelope, WebhookVerifier};
//!
//! let secret = WebhookSecret::new("whsec_test").unwrap();
//! let verifier = WebhookVerifier::new(secret);
//!
//! let body = br#"{"event":"risk.elevated","data":{"severity":"high"}}"#;
//! let signed = verifier.sign(body).unwrap();
//! let timestamp = signed.timestamp.to_string();
//!
//! let envelope = WebhookEnvelope::new(body, &signed.signature, &timestamp);
//! let event = verifier.verify(&envelope).unwrap();
//! assert_eq!(event.event_type(), "risk.elevated");
//! ```

mod envelope;
mod error;
mod event;
mod signing;
mod verifier;


pub use envelope::{SIGNATURE_HEADER, TIMESTAMP_HEADER, WebhookEnvelope};
pub use error::{SignatureError, SignatureFailure};
pub use event::{EventPayload, OversightSummary, RiskSummary, VerifiedEvent};
pub use signing::SignedPayload;
pub use verifier::{WebhookVerifier, sign, verify};
