//! Events delivered by webhook.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::SignatureFailure;
use crate::types::{ConcernLevel, DetectedBehavior, Extra, Imminence, Risk, Severity, Trajectory};

/// Event-type prefix for risk alerts (`risk.critical`, `risk.elevated`, ...).
const RISK_PREFIX: &str = "risk.";

/// Event-type prefix for oversight alerts and batch completions.
const OVERSIGHT_PREFIX: &str = "oversight.";

/// Risk found in an evaluated conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSummary {
    #[serde(default)]
    pub request_id: Option<String>,
    /// Caller-supplied id from [`EvaluateConfig`](crate::types::EvaluateConfig).
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub end_user_id: Option<String>,
    #[serde(default, alias = "speaker_severity")]
    pub severity: Option<Severity>,
    #[serde(default, alias = "speaker_imminence")]
    pub imminence: Option<Imminence>,
    #[serde(default)]
    pub risks: Vec<Risk>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Concerning assistant behavior found by oversight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OversightSummary {
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub overall_concern: Option<ConcernLevel>,
    #[serde(default)]
    pub trajectory: Option<Trajectory>,
    #[serde(default)]
    pub detected_behaviors: Vec<DetectedBehavior>,
    #[serde(default)]
    pub dashboard_url: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Decoded `data` of an event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    /// A `risk.*` event.
    Risk(RiskSummary),
    /// An `oversight.*` event.
    Oversight(OversightSummary),
    /// Any other event type, kept as received.
    Other(Value),
}

/// A webhook that passed signature and freshness checks.
///
/// Only produced by a successful verification.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedEvent {
    event_type: String,
    payload: EventPayload,
    signed_at: i64,
    verified_at: SystemTime,
}

impl VerifiedEvent {
    /// Event type, e.g. `risk.critical`.
    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    #[must_use]
    pub const fn payload(&self) -> &EventPayload {
        &self.payload
    }

    /// Consumes the event, returning its payload.
    #[must_use]
    pub fn into_payload(self) -> EventPayload {
        self.payload
    }

    /// Unix seconds from the timestamp header.
    #[must_use]
    pub const fn signed_at(&self) -> i64 {
        self.signed_at
    }

    /// Verifier clock reading when the checks passed.
    #[must_use]
    pub const fn verified_at(&self) -> SystemTime {
        self.verified_at
    }

    /// The risk summary, for `risk.*` events.
    #[must_use]
    pub const fn risk(&self) -> Option<&RiskSummary> {
        match &self.payload {
            EventPayload::Risk(summary) => Some(summary),
            _ => None,
        }
    }

    /// The oversight summary, for `oversight.*` events.
    #[must_use]
    pub const fn oversight(&self) -> Option<&OversightSummary> {
        match &self.payload {
            EventPayload::Oversight(summary) => Some(summary),
            _ => None,
        }
    }

    /// Decodes an already authenticated body.
    pub(super) fn decode(
        payload: &[u8],
        signed_at: i64,
        verified_at: SystemTime,
    ) -> Result<Self, SignatureFailure> {
        let raw: RawEvent = serde_json::from_slice(payload).map_err(malformed)?;

        let payload = if raw.event.starts_with(RISK_PREFIX) {
            EventPayload::Risk(serde_json::from_value(raw.data).map_err(malformed)?)
        } else if raw.event.starts_with(OVERSIGHT_PREFIX) {
            EventPayload::Oversight(serde_json::from_value(raw.data).map_err(malformed)?)
        } else {
            EventPayload::Other(raw.data)
        };

        Ok(Self {
            event_type: raw.event,
            payload,
            signed_at,
            verified_at,
        })
    }
}

#[derive(Deserialize)]
struct RawEvent {
    event: String,
    #[serde(default = "empty_object")]
    data: Value,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

fn malformed(e: serde_json::Error) -> SignatureFailure {
    SignatureFailure::MalformedPayload(e.to_string())
}
