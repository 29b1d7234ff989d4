//! Request payloads.

use serde::{Deserialize, Serialize};

use super::Extra;

/// Speaker of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The end user.
    User,
    /// The AI assistant.
    Assistant,
}

/// A message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who said it.
    pub role: Role,
    /// What was said.
    pub content: String,
    /// ISO 8601 timestamp, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Message {
    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: None,
        }
    }

    /// Creates an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: None,
        }
    }

    /// Attaches an ISO 8601 timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

/// Age band of the end user; selects response templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBand {
    /// Adult user (service default).
    Adult,
    /// Minor.
    Minor,
    /// Not known.
    Unknown,
}

/// How the service produces the recommended reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistantSafetyMode {
    /// Fixed templates.
    Template,
    /// Model-generated.
    Generate,
}

/// Options for an evaluation request.
///
/// Every field is optional; unset fields are omitted from the request body
/// and the service applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluateConfig {
    /// ISO 3166-1 alpha-2 country of the user, for resource matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_country: Option<String>,
    /// Locale such as `en-US`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_age_band: Option<AgeBand>,
    /// Policy to evaluate against (service default: `default_mh`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<String>,
    /// Evaluate without logging or firing webhooks on the service side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
    /// Legacy switch for the recommended assistant reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_assistant_reply: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assistant_safety_mode: Option<AssistantSafetyMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_multiple_judges: Option<bool>,
    /// Exact models to use, bypassing adaptive selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<String>>,
    /// Caller's conversation id, echoed in webhooks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    /// Caller's end-user id, echoed in webhooks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_user_id: Option<String>,
}

impl EvaluateConfig {
    /// Sets the user's country.
    #[must_use]
    pub fn with_user_country(mut self, country: impl Into<String>) -> Self {
        self.user_country = Some(country.into());
        self
    }

    /// Sets the locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Sets the user's age band.
    #[must_use]
    pub const fn with_age_band(mut self, band: AgeBand) -> Self {
        self.user_age_band = Some(band);
        self
    }

    /// Enables or disables dry-run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = Some(dry_run);
        self
    }

    /// Sets the conversation id used for webhook correlation.
    #[must_use]
    pub fn with_conversation_id(mut self, id: impl Into<String>) -> Self {
        self.conversation_id = Some(id.into());
        self
    }
}

/// Body of an evaluation (or legacy screening) request.
///
/// Exactly one of `messages` and `text` must be set; the client rejects
/// anything else before sending.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvaluateRequest {
    /// Structured conversation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Message>>,
    /// Free-form text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub config: EvaluateConfig,
    /// Free-text context about the user that helps shape replies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_context: Option<String>,
    /// A candidate assistant reply to be judged for appropriateness.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposed_response: Option<String>,
}

impl EvaluateRequest {
    /// Creates a request over a structured conversation.
    #[must_use]
    pub fn messages(messages: Vec<Message>) -> Self {
        Self {
            messages: Some(messages),
            ..Self::default()
        }
    }

    /// Creates a request over free-form text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Sets the evaluation options.
    #[must_use]
    pub fn with_config(mut self, config: EvaluateConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the free-text user context.
    #[must_use]
    pub fn with_user_context(mut self, context: impl Into<String>) -> Self {
        self.user_context = Some(context.into());
        self
    }

    /// Sets a proposed assistant reply to be judged.
    #[must_use]
    pub fn with_proposed_response(mut self, response: impl Into<String>) -> Self {
        self.proposed_response = Some(response.into());
        self
    }
}

/// Metadata attached to a conversation submitted for oversight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_is_minor: Option<bool>,
    /// Product surface the conversation happened on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// ISO 8601 start time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    /// Any further caller-defined keys, forwarded verbatim.
    #[serde(flatten)]
    pub extra: Extra,
}

/// A conversation submitted for oversight analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub conversation_id: String,
    pub messages: Vec<Message>,
    pub metadata: ConversationMetadata,
}

impl Conversation {
    /// Creates a conversation with empty metadata.
    #[must_use]
    pub fn new(conversation_id: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            messages,
            metadata: ConversationMetadata::default(),
        }
    }

    /// Replaces the metadata record.
    #[must_use]
    pub fn with_metadata(mut self, metadata: ConversationMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unset_config_fields_are_omitted() {
        let body = serde_json::to_value(EvaluateRequest::text("hello")).unwrap();
        assert_eq!(body, json!({"text": "hello", "config": {}}));
    }

    #[test]
    fn dry_run_is_forwarded_alongside_other_fields() {
        let request = EvaluateRequest::messages(vec![Message::user("hi")]).with_config(
            EvaluateConfig::default()
                .with_user_country("GB")
                .with_age_band(AgeBand::Minor)
                .with_dry_run(true),
        );

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "messages": [{"role": "user", "content": "hi"}],
                "config": {"user_country": "GB", "user_age_band": "minor", "dry_run": true}
            })
        );
    }

    #[test]
    fn message_roles_serialize_lowercase() {
        let assistant = serde_json::to_value(Message::assistant("ok")).unwrap();
        assert_eq!(assistant["role"], "assistant");
    }

    #[test]
    fn message_timestamp_round_trips_when_set() {
        let msg = Message::user("x").with_timestamp("2024-01-15T12:00:00Z");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["timestamp"], "2024-01-15T12:00:00Z");
    }

    #[test]
    fn conversation_metadata_keeps_custom_keys() {
        let mut metadata = ConversationMetadata {
            platform: Some("web".to_string()),
            ..ConversationMetadata::default()
        };
        metadata.extra.insert("tenant".to_string(), json!("acme"));

        let conversation =
            Conversation::new("conv-1", vec![Message::user("hi")]).with_metadata(metadata);
        let value = serde_json::to_value(&conversation).unwrap();

        assert_eq!(value["metadata"], json!({"platform": "web", "tenant": "acme"}));
    }
}
