//! Operations API Models
//!
//! Wire types for the proxied REST endpoints that start and poll backend
//! operations. The result payloads stay opaque (`serde_json::Value`); only
//! the reintroduction formatter looks inside them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response from `POST /api/research` and `POST /api/implement`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartOperationResponse {
    /// Opaque identifier correlating subsequent status polls.
    pub operation_id: String,
}

/// Remote-reported status of an operation.
///
/// Anything other than `completed` or `failed` keeps the poller running, so
/// unknown strings map to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteStatus {
    Pending,
    Completed,
    Failed,
    #[serde(other)]
    Other,
}

impl RemoteStatus {
    /// Whether the remote considers the operation finished.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RemoteStatus::Completed | RemoteStatus::Failed)
    }
}

/// Response from `GET /api/status/{operationId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationStatusResponse {
    /// Current remote status.
    pub status: RemoteStatus,
    /// Kind-specific result, present once the operation completes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}
