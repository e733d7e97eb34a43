//! Client configuration types for Persona.
//!
//! `ClientConfig` represents the `config.toml` that points the client at a
//! persona service and fixes the user identifier sent with every request.

use serde::{Deserialize, Serialize};

use crate::chat::DEFAULT_USER_ID;

/// Service endpoint used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Top-level configuration for the Persona client.
///
/// Loaded from `~/.persona/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the persona service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User identifier the service keys stored memory by.
    #[serde(default = "default_user_id")]
    pub user_id: String,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_id() -> String {
    DEFAULT_USER_ID.to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_id: default_user_id(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
