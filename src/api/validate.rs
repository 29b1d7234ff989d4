//! Local input checks run before anything touches the network.

use url::Url;

use super::ApiError;
use crate::types::{Conversation, EvaluateRequest, Message};

/// Exactly one of `messages` and `text`, neither of them empty.
pub(crate) fn evaluate_request(request: &EvaluateRequest) -> Result<(), ApiError> {
    match (&request.messages, &request.text) {
        (Some(_), Some(_)) => {
            return Err(ApiError::invalid_field(
                "messages",
                "only one of 'messages' or 'text' may be provided",
            ));
        }
        (None, None) => {
            return Err(ApiError::invalid_field(
                "messages",
                "either 'messages' or 'text' must be provided",
            ));
        }
        (Some(messages), None) => non_empty_messages("messages", messages)?,
        (None, Some(text)) => {
            if text.trim().is_empty() {
                return Err(ApiError::invalid_field("text", "must not be empty"));
            }
        }
    }

    if let Some(country) = &request.config.user_country {
        country_code_at("config.user_country", country)?;
    }
    Ok(())
}

/// Non-empty id, non-empty messages. `path` prefixes field names.
pub(crate) fn conversation(path: &str, conversation: &Conversation) -> Result<(), ApiError> {
    if conversation.conversation_id.trim().is_empty() {
        return Err(ApiError::invalid_field(
            format!("{path}.conversation_id"),
            "must not be empty",
        ));
    }
    non_empty_messages(&format!("{path}.messages"), &conversation.messages)
}

/// At least one conversation, each valid, plus an optional http(s) callback.
pub(crate) fn ingest_batch(
    conversations: &[Conversation],
    webhook_url: Option<&str>,
) -> Result<(), ApiError> {
    if conversations.is_empty() {
        return Err(ApiError::invalid_field(
            "conversations",
            "at least one conversation is required",
        ));
    }
    for (i, c) in conversations.iter().enumerate() {
        conversation(&format!("conversations[{i}]"), c)?;
    }

    if let Some(raw) = webhook_url {
        let url = Url::parse(raw)
            .map_err(|e| ApiError::invalid_field("webhook_url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::invalid_field(
                "webhook_url",
                "must be an http or https URL",
            ));
        }
    }
    Ok(())
}

/// Two ASCII letters; returned upper-cased.
pub(crate) fn country_code(country: &str) -> Result<String, ApiError> {
    country_code_at("country", country)
}

fn country_code_at(field: &str, country: &str) -> Result<String, ApiError> {
    if country.len() == 2 && country.bytes().all(|b| b.is_ascii_alphabetic()) {
        Ok(country.to_ascii_uppercase())
    } else {
        Err(ApiError::invalid_field(
            field,
            format!("'{country}' is not a 2-letter country code"),
        ))
    }
}

pub(crate) fn non_blank(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::invalid_field(field, "must not be empty"))
    } else {
        Ok(())
    }
}

fn non_empty_messages(field: &str, messages: &[Message]) -> Result<(), ApiError> {
    if messages.is_empty() {
        Err(ApiError::invalid_field(field, "must contain at least one message"))
    } else {
        Ok(())
    }
}
