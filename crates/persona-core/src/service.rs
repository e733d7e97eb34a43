//! PersonaService trait definition.
//!
//! The port through which the session controller reaches the remote persona
//! service. Uses native async fn in traits (RPITIT, Rust 2024 edition).
//!
//! Implementations live in persona-infra (e.g., `HttpPersonaClient`).

use std::future::Future;
use std::sync::Arc;

use persona_types::chat::{ChatRequest, ChatResponse, ExtractMemoryRequest, ExtractMemoryResponse};
use persona_types::error::ClientError;

/// Remote chat and memory-extraction operations.
pub trait PersonaService: Send + Sync {
    /// Generate a persona reply (plus default-persona comparison and extracted
    /// memory) for the full conversation.
    fn chat(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<ChatResponse, ClientError>> + Send;

    /// Extract structured memory from the full conversation.
    fn extract_memory(
        &self,
        request: &ExtractMemoryRequest,
    ) -> impl Future<Output = Result<ExtractMemoryResponse, ClientError>> + Send;
}

impl<T: PersonaService> PersonaService for Arc<T> {
    fn chat(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<ChatResponse, ClientError>> + Send {
        (**self).chat(request)
    }

    fn extract_memory(
        &self,
        request: &ExtractMemoryRequest,
    ) -> impl Future<Output = Result<ExtractMemoryResponse, ClientError>> + Send {
        (**self).extract_memory(request)
    }
}
