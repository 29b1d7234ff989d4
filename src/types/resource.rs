//! Crisis resources returned by evaluation and signposting.

use serde::{Deserialize, Serialize};

use super::Extra;

/// Kind of contact channel a resource offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    EmergencyNumber,
    CrisisLine,
    TextLine,
    ChatService,
    SupportService,
    /// A channel type this client version does not know.
    #[serde(other)]
    Other,
}

/// A helpline, text line, chat service or similar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisResource {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
    pub name: String,
    /// Name in the native script, for non-English resources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_local: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_24_7: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Why the service picked this resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_tier: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Primary resource plus alternatives, as returned by evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceBundle {
    #[serde(default)]
    pub primary: Option<CrisisResource>,
    #[serde(default)]
    pub secondary: Vec<CrisisResource>,
}

impl ResourceBundle {
    /// Iterates the primary resource (if any) followed by the secondary ones.
    pub fn iter(&self) -> impl Iterator<Item = &CrisisResource> {
        self.primary.iter().chain(self.secondary.iter())
    }

    /// Returns the total number of resources in the bundle.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.primary.is_some()) + self.secondary.len()
    }

    /// Returns true if the bundle carries no resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
