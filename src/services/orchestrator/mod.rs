//! Pattern Orchestrator Module
//!
//! Watches assistant messages for embedded commands and drives the resulting
//! backend operation: start request, status polling with progress-message
//! rotation, and reintroduction of results into the conversation.

mod poll_session;
mod reintroduce;
mod service;

pub use reintroduce::{
    implementation_message, research_message, HIDDEN_IMPLEMENTATION_CLOSE,
    HIDDEN_IMPLEMENTATION_OPEN, HIDDEN_RESEARCH_CLOSE, HIDDEN_RESEARCH_OPEN,
};
pub use service::{OrchestratorConfig, PatternOrchestrator};
