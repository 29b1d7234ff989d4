//! Request and response types for the NOPE API.
//!
//! Response types are deliberately lenient: fields the client does not
//! model are kept in an `extra` map rather than rejected or dropped, so a
//! newer service version never breaks an older client.

mod evaluate;
mod oversight;
mod request;
mod resource;
mod signpost;

pub use evaluate::{
    EvaluateResponse, Imminence, RecommendedReply, ResponseMetadata, Risk, ScreenResponse,
    Severity, Summary,
};
pub use oversight::{
    ConcernLevel, DetectedBehavior, IngestItem, IngestResult, OversightAnalysis, Trajectory,
};
pub use request::{
    AgeBand, AssistantSafetyMode, Conversation, ConversationMetadata, EvaluateConfig,
    EvaluateRequest, Message, Role,
};
pub use resource::{CrisisResource, ResourceBundle, ResourceType};
pub use signpost::{
    Country, CountryList, DetectedCountry, RankedResource, SignpostResponse, SmartSignpostResponse,
};

/// Unknown fields captured during deserialization.
pub type Extra = serde_json::Map<String, serde_json::Value>;
