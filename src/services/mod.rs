//! Services
//!
//! Business logic for the orchestrator library. The `api` and `chat` modules
//! define the external collaborator seams; `orchestrator` holds the pattern
//! detection and operation state machine built on top of them.

pub mod api;
pub mod chat;
pub mod orchestrator;

pub use api::{HttpOperationsApi, OperationsApi};
pub use chat::Conversation;
pub use orchestrator::{OrchestratorConfig, PatternOrchestrator};
