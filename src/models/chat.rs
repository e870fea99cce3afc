//! Chat Models
//!
//! The narrow conversation interface the orchestrator depends on: ordered
//! turns with a role, identifier, and text content, plus the stream status of
//! the in-flight model response. The message list itself is owned by the
//! external chat component; the orchestrator only reads slices handed to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a conversational turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn in the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Stable identifier, used by the processed-message marker.
    pub id: String,
    /// Who authored the turn.
    pub role: Role,
    /// Text content of the turn.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a user turn with a fresh identifier.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant turn with a fresh identifier.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// Override the generated identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// Status of the model-response stream, as reported by the chat layer.
///
/// Pattern detection only runs while the stream is `Streaming` or `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamStatus {
    /// A request was submitted but no tokens have arrived.
    Submitted,
    /// Assistant tokens are arriving.
    Streaming,
    /// The response is complete.
    Ready,
    /// The stream ended in an error.
    Error,
}
