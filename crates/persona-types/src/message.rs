//! Conversation message types.
//!
//! A conversation is an ordered, append-only list of [`Message`]s exchanged
//! between the user and the persona service. The list is bounded by
//! [`MAX_MESSAGES`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on the number of messages a single conversation may hold.
pub const MAX_MESSAGES: usize = 30;

/// Author of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single message in the conversation. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_display() {
        assert_eq!(MessageRole::User.to_string(), "user");
        assert_eq!(MessageRole::Assistant.to_string(), "assistant");
    }

    #[test]
    fn test_message_role_rejects_unknown_on_the_wire() {
        let result = serde_json::from_str::<MessageRole>("\"system\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_message_wire_shape() {
        let json = serde_json::to_value(Message::user("I love hiking")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "role": "user", "content": "I love hiking" })
        );
    }

    #[test]
    fn test_message_constructors() {
        assert_eq!(Message::assistant("Nice!").role, MessageRole::Assistant);
        assert_eq!(Message::user("hi").content, "hi");
    }
}
