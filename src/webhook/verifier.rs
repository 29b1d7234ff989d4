//! Signature and freshness checks for inbound webhooks.

use std::time::Duration;

use super::envelope::WebhookEnvelope;
use super::error::{SignatureError, SignatureFailure};
use super::event::VerifiedEvent;
use super::signing::{self, SignedPayload};
use crate::config::{WebhookConfig, WebhookSecret, defaults};
use crate::time::{Clock, SystemClock};

/// Verifies and signs webhook payloads with one shared secret.
///
/// Each call is independent; the verifier keeps no history. Replay
/// protection beyond the freshness window is up to the caller.
///
/// # Type Parameters
///
/// - `C`: source of the current time, [`SystemClock`] by default
#[derive(Debug, Clone)]
pub struct WebhookVerifier<C = SystemClock> {
    secret: WebhookSecret,
    max_age: Duration,
    clock: C,
}

impl WebhookVerifier<SystemClock> {
    /// Creates a verifier with the default freshness window.
    #[must_use]
    pub const fn new(secret: WebhookSecret) -> Self {
        Self {
            secret,
            max_age: defaults::webhook_max_age(),
            clock: SystemClock,
        }
    }

    /// Creates a verifier from webhook settings.
    #[must_use]
    pub fn from_config(config: &WebhookConfig) -> Self {
        Self::new(config.secret.clone()).with_max_age(config.max_age)
    }
}

impl<C: Clock> WebhookVerifier<C> {
    /// Sets the freshness window. Zero disables the check.
    ///
    /// Timestamps have whole-second resolution, so a fractional window is
    /// rounded up to the next second.
    #[must_use]
    pub const fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock<C2: Clock>(self, clock: C2) -> WebhookVerifier<C2> {
        WebhookVerifier {
            secret: self.secret,
            max_age: self.max_age,
            clock,
        }
    }

    /// The freshness window.
    #[must_use]
    pub const fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Verifies an inbound webhook and decodes its event.
    ///
    /// Checks run in order: timestamp syntax, freshness, signature, then
    /// payload decoding. The payload is only parsed after the signature
    /// matches.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError`] whose [`reason`](SignatureError::reason)
    /// names the first check that failed.
    pub fn verify(&self, envelope: &WebhookEnvelope<'_>) -> Result<VerifiedEvent, SignatureError> {
        self.check(envelope).map_err(|reason| {
            tracing::debug!(reason = %reason, "Webhook rejected");
            SignatureError::from(reason)
        })
    }

    /// Signs `payload` as of the clock's current time.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureFailure::InvalidSecret`] if the MAC cannot be keyed.
    pub fn sign(&self, payload: &[u8]) -> Result<SignedPayload, SignatureError> {
        self.sign_at(payload, self.clock.unix_seconds())
    }

    /// Signs `payload` as of `timestamp` (Unix seconds).
    ///
    /// # Errors
    ///
    /// Returns [`SignatureFailure::InvalidSecret`] if the MAC cannot be keyed.
    pub fn sign_at(&self, payload: &[u8], timestamp: i64) -> Result<SignedPayload, SignatureError> {
        signing::sign_at(&self.secret, timestamp, payload).map_err(SignatureError::from)
    }

    fn check(&self, envelope: &WebhookEnvelope<'_>) -> Result<VerifiedEvent, SignatureFailure> {
        let timestamp = envelope.timestamp().trim();
        let signed_at: i64 = timestamp
            .parse()
            .map_err(|_| SignatureFailure::MalformedTimestamp)?;

        if !self.max_age.is_zero() {
            let age_secs = self.clock.unix_seconds().abs_diff(signed_at);
            let max_age_secs = whole_secs_ceil(self.max_age);
            if age_secs > max_age_secs {
                return Err(SignatureFailure::Stale {
                    age_secs,
                    max_age_secs,
                });
            }
        }

        signing::check(
            &self.secret,
            timestamp,
            envelope.payload(),
            envelope.signature(),
        )?;

        VerifiedEvent::decode(envelope.payload(), signed_at, self.clock.now())
    }
}

fn whole_secs_ceil(duration: Duration) -> u64 {
    duration
        .as_secs()
        .saturating_add(u64::from(duration.subsec_nanos() > 0))
}

/// Verifies a webhook against `secret` using the system clock.
///
/// `max_age` of zero disables the freshness check.
///
/// # Errors
///
/// See [`WebhookVerifier::verify`].
pub fn verify(
    payload: &[u8],
    signature: &str,
    timestamp: &str,
    secret: &WebhookSecret,
    max_age: Duration,
) -> Result<VerifiedEvent, SignatureError> {
    WebhookVerifier::new(secret.clone())
        .with_max_age(max_age)
        .verify(&WebhookEnvelope::new(payload, signature, timestamp))
}

/// Signs `payload` with `secret` as of now, for building test webhooks.
///
/// # Errors
///
/// See [`WebhookVerifier::sign`].
pub fn sign(payload: &[u8], secret: &WebhookSecret) -> Result<SignedPayload, SignatureError> {
    WebhookVerifier::new(secret.clone()).sign(payload)
}
