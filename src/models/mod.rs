//! Models
//!
//! Data structures for the chat collaborator interface and the proxied
//! operations REST endpoints.

pub mod api;
pub mod chat;

pub use api::{OperationStatusResponse, RemoteStatus, StartOperationResponse};
pub use chat::{ChatMessage, Role, StreamStatus};
