//! Shared test doubles for the orchestrator integration tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use turboforge_chat::models::api::{OperationStatusResponse, RemoteStatus, StartOperationResponse};
use turboforge_chat::models::chat::ChatMessage;
use turboforge_chat::services::api::OperationsApi;
use turboforge_chat::services::chat::Conversation;
use turboforge_chat::utils::error::{AppError, AppResult};

/// Scripted behavior of the start endpoints.
pub enum ScriptedStart {
    /// Start succeeds with this operation id.
    Ok(&'static str),
    /// Start fails with a transport-level error.
    Fail,
}

/// Scripted behavior of one status poll. When the script runs out, further
/// polls report pending.
pub enum ScriptedStatus {
    Pending,
    Completed(Value),
    Failed,
    Error,
}

/// Operations API double that plays back scripted responses and records all
/// traffic for assertions.
pub struct ScriptedApi {
    start: ScriptedStart,
    start_delay: Duration,
    statuses: Mutex<VecDeque<ScriptedStatus>>,
    pub start_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
    pub research_requests: Mutex<Vec<(String, String)>>,
    pub implement_requests: Mutex<Vec<Value>>,
}

impl ScriptedApi {
    pub fn new(start: ScriptedStart, statuses: Vec<ScriptedStatus>) -> Self {
        Self {
            start,
            start_delay: Duration::ZERO,
            statuses: Mutex::new(statuses.into()),
            start_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
            research_requests: Mutex::new(Vec::new()),
            implement_requests: Mutex::new(Vec::new()),
        }
    }

    /// Delay start responses, keeping the operation in `Starting` long
    /// enough for re-scan tests.
    pub fn with_start_delay(mut self, delay: Duration) -> Self {
        self.start_delay = delay;
        self
    }

    async fn start_response(&self) -> AppResult<StartOperationResponse> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        if !self.start_delay.is_zero() {
            tokio::time::sleep(self.start_delay).await;
        }
        match &self.start {
            ScriptedStart::Ok(operation_id) => Ok(StartOperationResponse {
                operation_id: operation_id.to_string(),
            }),
            ScriptedStart::Fail => Err(AppError::api("start request failed")),
        }
    }
}

#[async_trait]
impl OperationsApi for ScriptedApi {
    async fn start_research(
        &self,
        process_type: &str,
        industry: &str,
    ) -> AppResult<StartOperationResponse> {
        self.research_requests
            .lock()
            .unwrap()
            .push((process_type.to_string(), industry.to_string()));
        self.start_response().await
    }

    async fn start_implementation(
        &self,
        process_definition: &Value,
    ) -> AppResult<StartOperationResponse> {
        self.implement_requests
            .lock()
            .unwrap()
            .push(process_definition.clone());
        self.start_response().await
    }

    async fn fetch_status(&self, _operation_id: &str) -> AppResult<OperationStatusResponse> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.statuses.lock().unwrap().pop_front();
        match next.unwrap_or(ScriptedStatus::Pending) {
            ScriptedStatus::Pending => Ok(OperationStatusResponse {
                status: RemoteStatus::Pending,
                result: None,
            }),
            ScriptedStatus::Completed(result) => Ok(OperationStatusResponse {
                status: RemoteStatus::Completed,
                result: Some(result),
            }),
            ScriptedStatus::Failed => Ok(OperationStatusResponse {
                status: RemoteStatus::Failed,
                result: None,
            }),
            ScriptedStatus::Error => Err(AppError::api("status check failed")),
        }
    }
}

/// Conversation double recording every appended turn.
pub struct RecordingConversation {
    pub appended: Mutex<Vec<ChatMessage>>,
    append_delay: Duration,
    fail: bool,
}

impl RecordingConversation {
    pub fn new() -> Self {
        Self {
            appended: Mutex::new(Vec::new()),
            append_delay: Duration::ZERO,
            fail: false,
        }
    }

    /// Delay appends, keeping the operation visibly in `Processing`.
    pub fn with_append_delay(mut self, delay: Duration) -> Self {
        self.append_delay = delay;
        self
    }

    /// A conversation whose append primitive always fails.
    pub fn failing() -> Self {
        Self {
            appended: Mutex::new(Vec::new()),
            append_delay: Duration::ZERO,
            fail: true,
        }
    }
}

#[async_trait]
impl Conversation for RecordingConversation {
    async fn append(&self, message: ChatMessage) -> AppResult<()> {
        if !self.append_delay.is_zero() {
            tokio::time::sleep(self.append_delay).await;
        }
        if self.fail {
            return Err(AppError::conversation("append failed"));
        }
        self.appended.lock().unwrap().push(message);
        Ok(())
    }
}

/// Poll `pred` every couple of milliseconds until it holds, panicking after
/// two seconds.
pub async fn wait_until<F: Fn() -> bool>(what: &str, pred: F) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !pred() {
        if tokio::time::Instant::now() >= deadline {
            panic!("timed out waiting for {}", what);
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
}
