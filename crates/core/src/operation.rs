//! Operation Lifecycle Model
//!
//! One `Operation` tracks a single long-running backend task (research or
//! implement) from pattern detection through terminal state. All state
//! transitions go through the methods on `Operation`, so the lifecycle stays
//! auditable as a function of (current state, event).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pattern::Command;
use crate::view::OperationView;

/// The two kinds of backend operation a command can launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Industry research for a process type.
    Research,
    /// Creation of a process definition in the target platform.
    Implement,
}

impl OperationKind {
    /// Human-readable name used in failure messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            OperationKind::Research => "Research",
            OperationKind::Implement => "Implementation",
        }
    }

    /// Status message shown the instant a pattern matches.
    pub fn detecting_message(&self) -> &'static str {
        match self {
            OperationKind::Research => "Initiating research request...",
            OperationKind::Implement => "Preparing implementation...",
        }
    }

    /// Status message shown while the start request is in flight.
    pub fn starting_message(&self) -> &'static str {
        match self {
            OperationKind::Research => "Starting research...",
            OperationKind::Implement => "Starting implementation...",
        }
    }

    /// Status message shown when polling begins.
    pub fn initial_polling_message(&self) -> &'static str {
        match self {
            OperationKind::Research => "Researching industry standards...",
            OperationKind::Implement => "Implementing process in ServiceNow...",
        }
    }

    /// Ordered progress phrases cycled while polling, wrapping after the last.
    pub fn rotation_messages(&self) -> [&'static str; 4] {
        match self {
            OperationKind::Research => [
                "Researching industry standards...",
                "Analyzing regulatory requirements...",
                "Processing research results...",
                "Compiling findings...",
            ],
            OperationKind::Implement => [
                "Creating process structure...",
                "Setting up milestones and steps...",
                "Configuring validation rules...",
                "Finalizing implementation...",
            ],
        }
    }

    /// Status message shown when the remote reports completion and result
    /// processing begins.
    pub fn completion_message(&self) -> &'static str {
        match self {
            OperationKind::Research => "Processing research results...",
            OperationKind::Implement => "Completing implementation...",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Lifecycle phase of an operation.
///
/// `Idle` is represented by the absence of an operation, so the enum starts
/// at `Detecting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationPhase {
    /// A pattern matched; the operation exists but no request has been made.
    Detecting,
    /// The start request is in flight.
    Starting,
    /// Status polling is running.
    Polling,
    /// Result formatting and reintroduction are in flight.
    Processing,
    /// Terminal success, displayed briefly before clearing.
    Completed,
    /// Terminal failure, displayed until replaced.
    Failed,
}

impl OperationPhase {
    /// Whether no further transitions happen except clearing.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OperationPhase::Completed | OperationPhase::Failed)
    }
}

impl std::fmt::Display for OperationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationPhase::Detecting => write!(f, "detecting"),
            OperationPhase::Starting => write!(f, "starting"),
            OperationPhase::Polling => write!(f, "polling"),
            OperationPhase::Processing => write!(f, "processing"),
            OperationPhase::Completed => write!(f, "completed"),
            OperationPhase::Failed => write!(f, "failed"),
        }
    }
}

/// Why an operation ended in the `Failed` phase.
///
/// All reasons share the phase; each maps to a distinct status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The start request returned a non-success status or never completed.
    StartRequest,
    /// A status poll returned a non-success status or never completed.
    PollRequest,
    /// The remote system reported the operation as failed.
    RemoteFailed,
    /// The poll-attempt ceiling was reached without a terminal status.
    TimedOut,
    /// Appending the synthetic result turn failed.
    Reintroduction,
}

impl FailureReason {
    /// The status message displayed for this failure.
    pub fn status_message(&self, kind: OperationKind) -> &'static str {
        match self {
            FailureReason::StartRequest | FailureReason::RemoteFailed => match kind {
                OperationKind::Research => "Research failed. Please try again.",
                OperationKind::Implement => "Implementation failed. Please try again.",
            },
            FailureReason::PollRequest => "Operation failed. Please try again.",
            FailureReason::TimedOut => "Operation timed out. Please try again.",
            FailureReason::Reintroduction => "Failed to process results. Please try again.",
        }
    }
}

/// A single tracked backend operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Which endpoints and message templates apply.
    pub kind: OperationKind,
    /// Kind-specific input parameters extracted from the pattern.
    pub payload: Command,
    /// Identifier assigned by the remote system once started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,
    /// Current lifecycle phase.
    pub phase: OperationPhase,
    /// Human-readable progress text, rotated independently of the phase.
    pub status_message: String,
    /// Failure discriminant, populated only in the `Failed` phase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureReason>,
    /// Kind-specific result, populated only once the remote completes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

impl Operation {
    /// Create a freshly detected operation.
    pub fn new(payload: Command) -> Self {
        let kind = payload.kind();
        Self {
            kind,
            payload,
            remote_id: None,
            phase: OperationPhase::Detecting,
            status_message: kind.detecting_message().to_string(),
            failure: None,
            result: None,
        }
    }

    /// Transition: the start request is being issued.
    pub fn begin_start(&mut self) {
        self.phase = OperationPhase::Starting;
        self.status_message = self.kind.starting_message().to_string();
    }

    /// Transition: the start request succeeded and polling begins.
    pub fn begin_polling(&mut self, remote_id: impl Into<String>) {
        self.remote_id = Some(remote_id.into());
        self.phase = OperationPhase::Polling;
        self.status_message = self.kind.initial_polling_message().to_string();
    }

    /// Replace the displayed status message without touching the phase.
    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    /// Transition: the remote completed; result processing begins.
    pub fn begin_processing(&mut self, result: Value) {
        self.result = Some(result);
        self.phase = OperationPhase::Processing;
        self.status_message = self.kind.completion_message().to_string();
    }

    /// Transition: the synthetic result turn was appended.
    pub fn complete(&mut self) {
        self.phase = OperationPhase::Completed;
    }

    /// Transition: terminal failure with its discriminant.
    pub fn fail(&mut self, reason: FailureReason) {
        self.phase = OperationPhase::Failed;
        self.failure = Some(reason);
        self.status_message = reason.status_message(self.kind).to_string();
    }

    /// Snapshot for the UI layer.
    pub fn view(&self) -> OperationView {
        OperationView {
            kind: self.kind,
            phase: self.phase,
            status_message: self.status_message.clone(),
            remote_id: self.remote_id.clone(),
            failure: self.failure,
        }
    }
}
