use serde::{Deserialize, Serialize};

/// Role type for a conversation message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System role, setting conversation context.
    System,

    /// User role.
    User,

    /// Assistant role.
    Assistant,
}

/// A single role-tagged message in the conversation input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageParam {
    /// The role of the message.
    pub role: MessageRole,

    /// The text content of the message.
    pub content: String,
}

impl MessageParam {
    /// Create a new `MessageParam` with the given role and content.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a new system `MessageParam`.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a new user `MessageParam`.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create a new assistant `MessageParam`.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

impl From<&str> for MessageParam {
    fn from(content: &str) -> Self {
        Self::user(content)
    }
}

impl From<String> for MessageParam {
    fn from(content: String) -> Self {
        Self::user(content)
    }
}
