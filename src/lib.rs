//! TurboForge Chat - Orchestrator Library
//!
//! Connects a conversational UI to a language model and proxies two
//! long-running external operations (research and implement) through polling.
//! The library watches streamed assistant text for embedded command patterns,
//! launches the matching backend operation, polls it to completion while
//! rotating progress messages, and re-injects results into the conversation
//! as a synthetic user turn.
//!
//! The chat transport and the model itself are external collaborators behind
//! the `Conversation` and `OperationsApi` traits.

pub mod models;
pub mod services;
pub mod utils;

// Re-export the orchestrator surface
pub use services::api::{HttpOperationsApi, OperationsApi};
pub use services::chat::Conversation;
pub use services::orchestrator::{OrchestratorConfig, PatternOrchestrator};

// Re-export models
pub use models::api::{OperationStatusResponse, RemoteStatus, StartOperationResponse};
pub use models::chat::{ChatMessage, Role, StreamStatus};
pub use utils::error::{AppError, AppResult};

// Re-export the core foundation types
pub use turboforge_core::{
    detect, Command, Detection, FailureReason, Operation, OperationKind, OperationPhase,
    OperationView,
};
