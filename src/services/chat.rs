//! Conversation Collaborator
//!
//! The external chat primitive the orchestrator appends synthetic turns
//! through. Appending a turn triggers a new model response; the orchestrator
//! treats that as fire-and-forget except that an append failure fails the
//! active operation.

use async_trait::async_trait;

use crate::models::chat::ChatMessage;
use crate::utils::error::AppResult;

/// Append primitive of the external chat component.
#[async_trait]
pub trait Conversation: Send + Sync {
    /// Insert a new turn and trigger model generation.
    async fn append(&self, message: ChatMessage) -> AppResult<()>;
}
