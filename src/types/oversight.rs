//! Oversight results: how an AI assistant behaved across a conversation.

use serde::{Deserialize, Serialize};

use super::Extra;

/// Level of concern about assistant behavior. Ordered from `None` to `Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcernLevel {
    None,
    Low,
    Medium,
    High,
    Critical,
}

/// Direction the conversation is heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trajectory {
    Improving,
    Stable,
    Worsening,
}

/// A harmful interaction pattern found in the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedBehavior {
    /// Behavior code, e.g. `validation_of_harm`.
    pub code: String,
    pub severity: ConcernLevel,
    /// 1-based index of the turn where it was observed.
    #[serde(default)]
    pub turn_number: Option<u32>,
    #[serde(default)]
    pub evidence: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Result of [`oversight_analyze`](crate::api::NopeClient::oversight_analyze).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OversightAnalysis {
    #[serde(default)]
    pub conversation_id: Option<String>,
    pub overall_concern: ConcernLevel,
    pub trajectory: Trajectory,
    #[serde(default)]
    pub detected_behaviors: Vec<DetectedBehavior>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl OversightAnalysis {
    /// Returns the behavior codes at or above `level`.
    pub fn behaviors_at_least(&self, level: ConcernLevel) -> impl Iterator<Item = &str> {
        self.detected_behaviors
            .iter()
            .filter(move |b| b.severity >= level)
            .map(|b| b.code.as_str())
    }
}

/// Per-conversation outcome inside an ingest batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestItem {
    pub conversation_id: String,
    /// `processed` or `failed`, as reported by the service.
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Result of [`oversight_ingest`](crate::api::NopeClient::oversight_ingest).
///
/// A batch where some conversations failed is still a success; inspect
/// [`has_partial_failure`](Self::has_partial_failure).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestResult {
    #[serde(rename = "conversations_received", alias = "received")]
    pub received: u32,
    #[serde(rename = "conversations_processed", alias = "processed")]
    pub processed: u32,
    #[serde(default)]
    pub results: Vec<IngestItem>,
    /// Link to the batch in the NOPE dashboard.
    #[serde(default)]
    pub dashboard_url: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl IngestResult {
    /// True when fewer conversations were processed than received.
    #[must_use]
    pub const fn has_partial_failure(&self) -> bool {
        self.processed < self.received
    }

    /// Number of conversations that were received but not processed.
    #[must_use]
    pub const fn failed(&self) -> u32 {
        self.received.saturating_sub(self.processed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn analysis_parses_behaviors() {
        let analysis: OversightAnalysis = serde_json::from_value(json!({
            "conversation_id": "conv-1",
            "overall_concern": "high",
            "trajectory": "worsening",
            "detected_behaviors": [
                {"code": "validation_of_harm", "severity": "high", "turn_number": 3},
                {"code": "missed_crisis_signal", "severity": "medium"},
                {"code": "sycophancy", "severity": "low"}
            ]
        }))
        .unwrap();

        assert_eq!(analysis.overall_concern, ConcernLevel::High);
        assert_eq!(analysis.trajectory, Trajectory::Worsening);
        let serious: Vec<_> = analysis.behaviors_at_least(ConcernLevel::Medium).collect();
        assert_eq!(serious, ["validation_of_harm", "missed_crisis_signal"]);
    }

    #[test]
    fn ingest_reports_partial_failure() {
        let result: IngestResult = serde_json::from_value(json!({
            "conversations_received": 3,
            "conversations_processed": 2,
            "dashboard_url": "https://dashboard.nope.net/oversight/batch_1"
        }))
        .unwrap();

        assert!(result.has_partial_failure());
        assert_eq!(result.failed(), 1);
    }

    #[test]
    fn ingest_complete_batch_is_not_partial() {
        let result: IngestResult = serde_json::from_value(json!({
            "conversations_received": 2,
            "conversations_processed": 2
        }))
        .unwrap();

        assert!(!result.has_partial_failure());
        assert_eq!(result.failed(), 0);
    }

    #[test]
    fn ingest_accepts_short_count_names() {
        let result: IngestResult = serde_json::from_value(json!({
            "received": 4,
            "processed": 1,
            "results": [{"conversation_id": "c1", "status": "processed"}]
        }))
        .unwrap();

        assert_eq!(result.received, 4);
        assert_eq!(result.processed, 1);
        assert_eq!(result.failed(), 3);
        assert!(result.extra.is_empty());
    }
}
