//! Wire payloads for the persona service and the comparison snapshot.
//!
//! Field names match the service's JSON (snake_case) exactly.

use serde::{Deserialize, Serialize};

use crate::memory::{Memory, StoredMemory};
use crate::message::Message;

/// Fixed user identifier sent with every request when none is configured.
pub const DEFAULT_USER_ID: &str = "default_user";

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    pub personality: String,
    pub user_id: String,
}

/// Response of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The reply appended to the conversation.
    pub response: String,
    /// Persona the service actually used.
    pub personality: String,
    /// Reply generated under the default persona.
    #[serde(default)]
    pub before_response: String,
    /// Reply generated under the selected persona.
    #[serde(default)]
    pub after_response: String,
    #[serde(default)]
    pub extracted_memory: Option<Memory>,
}

/// Body of `POST /api/extract-memory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractMemoryRequest {
    pub messages: Vec<Message>,
    pub user_id: String,
}

/// Response of `POST /api/extract-memory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractMemoryResponse {
    #[serde(default)]
    pub extracted_memory: Option<Memory>,
    /// Everything the service has accumulated for the user so far.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_memory: Option<StoredMemory>,
}

/// Response of `GET /api/memory/{user_id}`.
///
/// The service answers with a bare `{"message": ...}` object when it holds
/// nothing for the user. `Missing` is listed first because every field of
/// [`StoredMemory`] is optional and would otherwise match anything.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MemoryLookup {
    Missing { message: String },
    Found(StoredMemory),
}

impl MemoryLookup {
    pub fn into_stored(self) -> Option<StoredMemory> {
        match self {
            MemoryLookup::Missing { .. } => None,
            MemoryLookup::Found(stored) => Some(stored),
        }
    }
}

/// Response of `GET /`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub message: String,
}

/// Before/after snapshot of the last successful chat exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub personality: String,
    pub response: String,
    pub before_response: String,
    pub after_response: String,
}

impl From<&ChatResponse> for Comparison {
    fn from(resp: &ChatResponse) -> Self {
        Self {
            personality: resp.personality.clone(),
            response: resp.response.clone(),
            before_response: resp.before_response.clone(),
            after_response: resp.after_response.clone(),
        }
    }
}
