//! Polling Session
//!
//! Owns both cadences of one polling operation: the status poll and the
//! cosmetic rotation of progress phrases. Both timers live inside a single
//! `tokio::select!` loop, so a terminal transition or cancellation stops the
//! pair atomically; neither timer can outlive the other.

use std::time::Duration;

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use turboforge_core::OperationKind;

use crate::models::api::RemoteStatus;
use crate::services::api::OperationsApi;
use crate::utils::error::AppError;

use super::service::OrchestratorConfig;

/// Terminal outcome of a polling session.
pub(super) enum PollOutcome {
    /// The remote reported completion; carries the result payload.
    Completed(Value),
    /// The remote reported failure.
    RemoteFailed,
    /// A status poll failed at the transport level.
    TransportError(AppError),
    /// The attempt ceiling was reached without a terminal status.
    TimedOut,
    /// The orchestrator was shut down mid-session.
    Cancelled,
}

/// One polling run for a started operation.
pub(super) struct PollSession<'a> {
    api: &'a dyn OperationsApi,
    remote_id: &'a str,
    kind: OperationKind,
    poll_interval: Duration,
    rotation_interval: Duration,
    max_poll_attempts: u32,
}

impl<'a> PollSession<'a> {
    pub(super) fn new(
        api: &'a dyn OperationsApi,
        remote_id: &'a str,
        kind: OperationKind,
        config: &OrchestratorConfig,
    ) -> Self {
        Self {
            api,
            remote_id,
            kind,
            poll_interval: config.poll_interval,
            rotation_interval: config.rotation_interval,
            max_poll_attempts: config.max_poll_attempts,
        }
    }

    /// Drive both cadences until a terminal outcome.
    ///
    /// `rotate` receives each new progress phrase; rotation is cosmetic and
    /// never affects the outcome.
    pub(super) async fn run<F>(self, cancel: &CancellationToken, mut rotate: F) -> PollOutcome
    where
        F: FnMut(&'static str),
    {
        let mut poll_timer = tokio::time::interval(self.poll_interval);
        let mut rotation_timer = tokio::time::interval(self.rotation_interval);
        // Consume the immediate first tick so both cadences wait one full
        // period before firing.
        poll_timer.tick().await;
        rotation_timer.tick().await;

        let phrases = self.kind.rotation_messages();
        let mut phrase_index = 0usize;
        let mut attempts = 0u32;

        loop {
            tokio::select! {
                // Cancellation wins over a simultaneously-ready tick, so no
                // poll is issued after shutdown.
                biased;
                _ = cancel.cancelled() => return PollOutcome::Cancelled,
                _ = rotation_timer.tick() => {
                    phrase_index = (phrase_index + 1) % phrases.len();
                    rotate(phrases[phrase_index]);
                }
                _ = poll_timer.tick() => {
                    attempts += 1;
                    match self.api.fetch_status(self.remote_id).await {
                        Ok(response) => match response.status {
                            RemoteStatus::Completed => {
                                return PollOutcome::Completed(response.result.unwrap_or(Value::Null));
                            }
                            RemoteStatus::Failed => return PollOutcome::RemoteFailed,
                            RemoteStatus::Pending | RemoteStatus::Other => {
                                if attempts >= self.max_poll_attempts {
                                    return PollOutcome::TimedOut;
                                }
                            }
                        },
                        Err(err) => return PollOutcome::TransportError(err),
                    }
                }
            }
        }
    }
}
