//! Integration Tests Module
//!
//! End-to-end tests for the pattern orchestrator: trigger idempotency, the
//! polling state machine, timer cleanup, shutdown behavior, and result
//! reintroduction. External collaborators are scripted test doubles behind
//! the `OperationsApi` and `Conversation` traits.

// Shared test doubles and timing helpers
mod support;
