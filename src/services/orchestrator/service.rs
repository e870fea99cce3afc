//! Pattern Orchestrator Service
//!
//! The operation state machine. Detection runs synchronously against the
//! latest assistant message; a matched command sets the processed-message
//! marker and the single-flight guard in the same locked step, then a spawned
//! drive task carries the operation through start, polling, and result
//! reintroduction. UI layers observe progress through a watch channel of
//! `OperationView` snapshots and never mutate operation state.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use turboforge_core::{detect, Command, Detection, FailureReason, Operation, OperationView};

use crate::models::chat::{ChatMessage, Role, StreamStatus};
use crate::services::api::OperationsApi;
use crate::services::chat::Conversation;

use super::poll_session::{PollOutcome, PollSession};
use super::reintroduce;

/// Configuration for the pattern orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Period of the status poll.
    pub poll_interval: Duration,
    /// Period of the cosmetic progress-phrase rotation.
    pub rotation_interval: Duration,
    /// How long a completed operation stays displayed before clearing.
    pub completed_linger: Duration,
    /// Poll ceiling; exceeding it fails the operation as timed out.
    pub max_poll_attempts: u32,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            rotation_interval: Duration::from_secs(3),
            completed_linger: Duration::from_secs(1),
            max_poll_attempts: 150,
        }
    }
}

impl OrchestratorConfig {
    /// Set the status-poll period.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the progress-rotation period.
    pub fn with_rotation_interval(mut self, interval: Duration) -> Self {
        self.rotation_interval = interval;
        self
    }

    /// Set how long a completed operation lingers before clearing.
    pub fn with_completed_linger(mut self, linger: Duration) -> Self {
        self.completed_linger = linger;
        self
    }

    /// Set the poll-attempt ceiling.
    pub fn with_max_poll_attempts(mut self, attempts: u32) -> Self {
        self.max_poll_attempts = attempts;
        self
    }
}

/// Trigger bookkeeping guarded by one lock so detection stays atomic.
#[derive(Default)]
struct TriggerState {
    /// Id of the last assistant message already inspected for patterns.
    last_processed: Option<String>,
    /// Whether an operation is currently in flight.
    active: bool,
}

/// Watches assistant messages for embedded commands and drives the resulting
/// operations.
pub struct PatternOrchestrator {
    config: OrchestratorConfig,
    api: Arc<dyn OperationsApi>,
    conversation: Arc<dyn Conversation>,
    trigger: Arc<Mutex<TriggerState>>,
    view_tx: watch::Sender<Option<OperationView>>,
    view_rx: watch::Receiver<Option<OperationView>>,
    cancel: CancellationToken,
}

impl PatternOrchestrator {
    /// Create an orchestrator over the given collaborators.
    pub fn new(
        api: Arc<dyn OperationsApi>,
        conversation: Arc<dyn Conversation>,
        config: OrchestratorConfig,
    ) -> Self {
        let (view_tx, view_rx) = watch::channel(None);
        Self {
            config,
            api,
            conversation,
            trigger: Arc::new(Mutex::new(TriggerState::default())),
            view_tx,
            view_rx,
            cancel: CancellationToken::new(),
        }
    }

    /// Inspect the conversation after an update from the chat layer.
    ///
    /// Only the most recent message is considered, only while the model
    /// stream is `Streaming` or `Ready`, and only if it is an assistant turn
    /// not yet marked processed. A match launches the operation on a spawned
    /// task; this method never awaits, so the marker and single-flight guard
    /// are set before the caller can re-enter.
    pub fn handle_update(&self, messages: &[ChatMessage], status: StreamStatus) {
        if !matches!(status, StreamStatus::Streaming | StreamStatus::Ready) {
            return;
        }
        let last = match messages.last() {
            Some(message) => message,
            None => return,
        };
        if last.role != Role::Assistant {
            return;
        }

        let command = {
            let mut trigger = self.trigger.lock().expect("trigger state lock poisoned");
            if trigger.active {
                return;
            }
            if trigger.last_processed.as_deref() == Some(last.id.as_str()) {
                return;
            }
            match detect(&last.content) {
                Detection::None => return,
                Detection::Malformed { reason } => {
                    // Not marked processed: a later revision of the message
                    // may carry valid JSON.
                    tracing::warn!(
                        "Dropping implement command with invalid JSON payload: {}",
                        reason
                    );
                    return;
                }
                Detection::Command(command) => {
                    trigger.last_processed = Some(last.id.clone());
                    trigger.active = true;
                    command
                }
            }
        };

        tracing::debug!("Detected {} command in message {}", command.kind(), last.id);
        let operation = Operation::new(command);
        let _ = self.view_tx.send(Some(operation.view()));

        let task = DriveTask {
            config: self.config.clone(),
            api: Arc::clone(&self.api),
            conversation: Arc::clone(&self.conversation),
            trigger: Arc::clone(&self.trigger),
            view_tx: self.view_tx.clone(),
            cancel: self.cancel.clone(),
        };
        tokio::spawn(task.run(operation));
    }

    /// Snapshot of the active operation, if any.
    pub fn operation(&self) -> Option<OperationView> {
        self.view_rx.borrow().clone()
    }

    /// Subscribe to operation snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Option<OperationView>> {
        self.view_tx.subscribe()
    }

    /// Whether an operation is in progress from the UI's point of view.
    pub fn is_processing(&self) -> bool {
        self.view_rx
            .borrow()
            .as_ref()
            .map(OperationView::is_processing)
            .unwrap_or(false)
    }

    /// Tear down the orchestrator: stops any polling session and prevents
    /// further state mutation, even if an in-flight response resolves later.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for PatternOrchestrator {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Everything the spawned drive task needs to carry one operation to a
/// terminal state.
struct DriveTask {
    config: OrchestratorConfig,
    api: Arc<dyn OperationsApi>,
    conversation: Arc<dyn Conversation>,
    trigger: Arc<Mutex<TriggerState>>,
    view_tx: watch::Sender<Option<OperationView>>,
    cancel: CancellationToken,
}

impl DriveTask {
    async fn run(self, mut op: Operation) {
        op.begin_start();
        self.publish(&op);

        let started = match &op.payload {
            Command::Research {
                process_type,
                industry,
            } => self.api.start_research(process_type, industry).await,
            Command::Implement { process_definition } => {
                self.api.start_implementation(process_definition).await
            }
        };
        let remote_id = match started {
            Ok(response) => response.operation_id,
            Err(err) => {
                tracing::error!("{} start request failed: {}", op.kind, err);
                self.fail(&mut op, FailureReason::StartRequest);
                return;
            }
        };
        if self.cancel.is_cancelled() {
            return;
        }

        op.begin_polling(remote_id.clone());
        self.publish(&op);

        let session = PollSession::new(self.api.as_ref(), &remote_id, op.kind, &self.config);
        let outcome = {
            let view_tx = &self.view_tx;
            let cancel = &self.cancel;
            session
                .run(&self.cancel, |phrase| {
                    op.set_status_message(phrase);
                    if !cancel.is_cancelled() {
                        let _ = view_tx.send(Some(op.view()));
                    }
                })
                .await
        };

        match outcome {
            PollOutcome::Cancelled => {}
            PollOutcome::Completed(result) => {
                op.begin_processing(result.clone());
                self.publish(&op);
                op.set_status_message("Processing results...");
                self.publish(&op);
                match reintroduce::submit_result(self.conversation.as_ref(), op.kind, &result).await
                {
                    Ok(()) => {
                        op.complete();
                        self.publish(&op);
                        tokio::select! {
                            _ = self.cancel.cancelled() => return,
                            _ = tokio::time::sleep(self.config.completed_linger) => {}
                        }
                        self.release_guard();
                        let _ = self.view_tx.send(None);
                    }
                    Err(err) => {
                        tracing::error!("Failed to reintroduce {} results: {}", op.kind, err);
                        self.fail(&mut op, FailureReason::Reintroduction);
                    }
                }
            }
            PollOutcome::RemoteFailed => {
                tracing::error!("{} operation {} reported failure", op.kind, remote_id);
                self.fail(&mut op, FailureReason::RemoteFailed);
            }
            PollOutcome::TransportError(err) => {
                tracing::error!("Polling error for operation {}: {}", remote_id, err);
                self.fail(&mut op, FailureReason::PollRequest);
            }
            PollOutcome::TimedOut => {
                tracing::warn!(
                    "Operation {} exceeded {} poll attempts",
                    remote_id,
                    self.config.max_poll_attempts
                );
                self.fail(&mut op, FailureReason::TimedOut);
            }
        }
    }

    fn publish(&self, op: &Operation) {
        if self.cancel.is_cancelled() {
            return;
        }
        let _ = self.view_tx.send(Some(op.view()));
    }

    fn release_guard(&self) {
        self.trigger
            .lock()
            .expect("trigger state lock poisoned")
            .active = false;
    }

    /// Terminal failure: release the single-flight guard and leave the failed
    /// view displayed until the next pattern match replaces it.
    fn fail(&self, op: &mut Operation, reason: FailureReason) {
        op.fail(reason);
        self.release_guard();
        self.publish(op);
    }
}
