use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Body forwarded to the summarization service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub content: String,
}

/// Text summarization backend
///
/// The service's JSON response is passed back to callers untouched.
#[async_trait::async_trait]
pub trait SummaryClient: Send + Sync {
    async fn generate_summary(&self, request: &SummaryRequest) -> AppResult<Value>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}

/// Summarization over HTTP (`POST {base_url}/generate-summary/`)
#[derive(Clone)]
pub struct HttpSummaryClient {
    http_client: HttpClient,
    endpoint: String,
}

impl HttpSummaryClient {
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            endpoint: summary_endpoint(base_url),
        })
    }

    #[cfg(test)]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn summary_endpoint(base_url: &str) -> String {
    format!("{}/generate-summary/", base_url.trim_end_matches('/'))
}

#[async_trait::async_trait]
impl SummaryClient for HttpSummaryClient {
    async fn generate_summary(&self, request: &SummaryRequest) -> AppResult<Value> {
        tracing::debug!(
            endpoint = %self.endpoint,
            content_len = request.content.len(),
            "Requesting summary"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Summary service returned status {}: {}",
                status, body
            )));
        }

        let summary: Value = response.json().await?;
        Ok(summary)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
