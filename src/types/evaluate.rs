//! Evaluation and legacy screening results.

use serde::{Deserialize, Serialize};

use super::{CrisisResource, Extra, ResourceBundle};

/// How serious a risk is. Ordered from `None` to `Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    None,
    Mild,
    Moderate,
    High,
    Critical,
}

/// How soon a risk may materialize. Ordered from `NotApplicable` to `Emergency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Imminence {
    NotApplicable,
    Chronic,
    Subacute,
    Urgent,
    Emergency,
}

/// One identified risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    /// Who is at risk (`self`, `others`, ...).
    pub subject: String,
    /// Risk category (`suicide`, `self_harm`, ...).
    #[serde(rename = "type")]
    pub risk_type: String,
    pub severity: Severity,
    pub imminence: Imminence,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Condensed view of the speaker's risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub speaker_severity: Severity,
    pub speaker_imminence: Imminence,
    #[serde(default)]
    pub primary_concerns: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A reply the host application may show instead of, or alongside, its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedReply {
    pub content: String,
    /// `template`, `llm_generated` or `llm_validated_candidate`.
    pub source: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request/response bookkeeping reported by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub api_version: Option<String>,
    /// `structured` or `text_blob`.
    #[serde(default)]
    pub input_format: Option<String>,
    #[serde(default)]
    pub access_level: Option<String>,
    #[serde(default)]
    pub messages_truncated: Option<bool>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Result of [`evaluate`](crate::api::NopeClient::evaluate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluateResponse {
    pub request_id: String,
    /// ISO 8601 time the evaluation was produced.
    pub timestamp: String,
    #[serde(default)]
    pub risks: Vec<Risk>,
    #[serde(default)]
    pub rationale: Option<String>,
    #[serde(default)]
    pub speaker_severity: Option<Severity>,
    #[serde(default)]
    pub speaker_imminence: Option<Imminence>,
    #[serde(default)]
    pub summary: Option<Summary>,
    #[serde(default)]
    pub show_resources: bool,
    #[serde(default)]
    pub resources: Option<ResourceBundle>,
    #[serde(default)]
    pub crisis_resources: Vec<CrisisResource>,
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Embeddable resources widget, present when severity is not `none`.
    #[serde(default)]
    pub widget_url: Option<String>,
    #[serde(default)]
    pub recommended_reply: Option<RecommendedReply>,
    #[serde(default)]
    pub metadata: Option<ResponseMetadata>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl EvaluateResponse {
    /// Overall severity for the speaker.
    ///
    /// Reads the top-level field, falling back to the summary block.
    #[must_use]
    pub fn severity(&self) -> Option<Severity> {
        self.speaker_severity
            .or_else(|| self.summary.as_ref().map(|s| s.speaker_severity))
    }

    /// Overall imminence for the speaker.
    #[must_use]
    pub fn imminence(&self) -> Option<Imminence> {
        self.speaker_imminence
            .or_else(|| self.summary.as_ref().map(|s| s.speaker_imminence))
    }

    /// The most severe individual risk, if any.
    #[must_use]
    pub fn highest_risk(&self) -> Option<&Risk> {
        self.risks
            .iter()
            .max_by_key(|r| (r.severity, r.imminence))
    }
}

/// Result of the legacy screening endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenResponse {
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    pub suicidal_ideation: bool,
    pub self_harm: bool,
    pub show_resources: bool,
    #[serde(default)]
    pub rationale: Option<String>,
    #[serde(default)]
    pub resources: Option<ResourceBundle>,
    #[serde(flatten)]
    pub extra: Extra,
}
