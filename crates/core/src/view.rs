//! Operation View Types
//!
//! Snapshot of an operation published to the UI layer. The frontend renders
//! these as a status line; it never mutates operation state.

use serde::{Deserialize, Serialize};

use crate::operation::{FailureReason, OperationKind, OperationPhase};

/// Read-only snapshot of the active operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationView {
    /// Which operation kind is running.
    pub kind: OperationKind,
    /// Current lifecycle phase.
    pub phase: OperationPhase,
    /// Progress text to display.
    pub status_message: String,
    /// Remote identifier, once assigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,
    /// Failure discriminant, only in the `Failed` phase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureReason>,
}

impl OperationView {
    /// Whether the UI should treat the operation as still in progress.
    pub fn is_processing(&self) -> bool {
        self.phase != OperationPhase::Completed
    }
}
