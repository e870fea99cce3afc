//! TurboForge Core
//!
//! Foundational types for the TurboForge chat front-end: the embedded command
//! grammars, the operation data model, and the view types shared with the UI
//! layer. This crate has zero dependencies on application-level code (HTTP
//! client, async runtime, chat transport).
//!
//! ## Module Organization
//!
//! - `pattern` - Tagged-token scanner for embedded commands (`detect`, `Command`, `Detection`)
//! - `operation` - Operation lifecycle model (`Operation`, `OperationKind`, `OperationPhase`)
//! - `view` - Snapshot types published to the UI layer (`OperationView`)
//!
//! ## Design Principles
//!
//! 1. **Zero external dependencies beyond serde** - keeps build times minimal
//! 2. **Discriminated results over exceptions** - a malformed command payload
//!    is a first-class `Detection` variant, never a thrown error
//! 3. **Unidirectional dependency** - this crate depends on nothing else in
//!    the workspace

pub mod operation;
pub mod pattern;
pub mod view;

// ── Pattern Scanner ────────────────────────────────────────────────────
pub use pattern::{detect, Command, Detection};

// ── Operation Model ────────────────────────────────────────────────────
pub use operation::{FailureReason, Operation, OperationKind, OperationPhase};

// ── View Types ─────────────────────────────────────────────────────────
pub use view::OperationView;
