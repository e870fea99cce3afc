//! Operations API Client
//!
//! The REST surface that starts backend operations and polls their status.
//! The trait seam keeps the orchestrator testable with scripted responses;
//! `HttpOperationsApi` is the production implementation on reqwest.

use async_trait::async_trait;
use serde_json::Value;

use crate::models::api::{OperationStatusResponse, StartOperationResponse};
use crate::utils::error::AppResult;

/// Client for the proxied operation endpoints.
#[async_trait]
pub trait OperationsApi: Send + Sync {
    /// `POST /api/research` with the extracted research parameters.
    async fn start_research(
        &self,
        process_type: &str,
        industry: &str,
    ) -> AppResult<StartOperationResponse>;

    /// `POST /api/implement` with the process definition as the body.
    async fn start_implementation(
        &self,
        process_definition: &Value,
    ) -> AppResult<StartOperationResponse>;

    /// `GET /api/status/{operationId}`.
    async fn fetch_status(&self, operation_id: &str) -> AppResult<OperationStatusResponse>;
}

/// HTTP implementation of the operations API.
pub struct HttpOperationsApi {
    /// Base URL of the chat backend, without a trailing slash.
    base_url: String,
    client: reqwest::Client,
}

impl HttpOperationsApi {
    /// Create a client for the given backend base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl OperationsApi for HttpOperationsApi {
    async fn start_research(
        &self,
        process_type: &str,
        industry: &str,
    ) -> AppResult<StartOperationResponse> {
        let body = serde_json::json!({
            "processType": process_type.trim(),
            "industry": industry.trim(),
        });
        let response = self
            .client
            .post(self.url("/api/research"))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn start_implementation(
        &self,
        process_definition: &Value,
    ) -> AppResult<StartOperationResponse> {
        let response = self
            .client
            .post(self.url("/api/implement"))
            .json(process_definition)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn fetch_status(&self, operation_id: &str) -> AppResult<OperationStatusResponse> {
        let response = self
            .client
            .get(self.url(&format!("/api/status/{}", operation_id)))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}
