use thiserror::Error;

use crate::message::MAX_MESSAGES;

/// Errors from the persona service client.
///
/// Callers treat every variant as a uniform failure; the variants exist for
/// logging.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}

/// Errors returned by the session controller's operations.
///
/// Validation errors are raised before any state change or remote call.
/// Remote failures display as a generic user-facing notice; the underlying
/// [`ClientError`] is kept as the error source.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("conversation is full ({max} messages)")]
    ConversationFull { max: usize },

    #[error("a request is already in flight")]
    Busy,

    #[error("no messages to extract memory from")]
    NothingToExtract,

    #[error("error sending message")]
    SendFailed(#[source] ClientError),

    #[error("error extracting memory")]
    ExtractFailed(#[source] ClientError),
}

impl SessionError {
    pub fn conversation_full() -> Self {
        SessionError::ConversationFull { max: MAX_MESSAGES }
    }

    /// Whether the operation was refused up front (no remote call was made).
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            SessionError::SendFailed(_) | SessionError::ExtractFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_client_error_display() {
        let err = ClientError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: boom");
    }

    #[test]
    fn test_remote_failures_show_generic_notice() {
        let send = SessionError::SendFailed(ClientError::Transport("refused".to_string()));
        assert_eq!(send.to_string(), "error sending message");
        assert!(send.source().unwrap().to_string().contains("refused"));

        let extract = SessionError::ExtractFailed(ClientError::Decode("eof".to_string()));
        assert_eq!(extract.to_string(), "error extracting memory");
    }

    #[test]
    fn test_validation_classification() {
        assert!(SessionError::Busy.is_validation());
        assert!(SessionError::EmptyMessage.is_validation());
        assert!(SessionError::NothingToExtract.is_validation());
        assert!(SessionError::conversation_full().is_validation());
        assert!(!SessionError::SendFailed(ClientError::Decode(String::new())).is_validation());
    }

    #[test]
    fn test_conversation_full_mentions_cap() {
        assert_eq!(
            SessionError::conversation_full().to_string(),
            "conversation is full (30 messages)"
        );
    }
}
