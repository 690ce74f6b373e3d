//! HttpRetrievalClient -- concrete [`RetrievalClient`] over HTTP.
//!
//! Sends one JSON POST per ask to the retrieval collaborator and maps
//! failures to the typed [`RetrievalError`] taxonomy. The client enforces
//! the call timeout; there is no retry and no partial-result handling.

use std::time::Duration;

use newsrag_core::retrieval::{RetrievalClient, RetrievalRequest, RetrievalResponse};
use newsrag_types::config::RetrievalConfig;
use newsrag_types::error::RetrievalError;

/// HTTP client for the answer-generation service.
pub struct HttpRetrievalClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRetrievalClient {
    /// Create a client against the given endpoint with a hard per-call
    /// timeout.
    pub fn new(endpoint: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create reqwest client");

        Self { client, endpoint }
    }

    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self::new(
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RetrievalClient for HttpRetrievalClient {
    async fn answer(
        &self,
        request: &RetrievalRequest,
    ) -> Result<RetrievalResponse, RetrievalError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RetrievalError::Timeout
                } else {
                    RetrievalError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RetrievalError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<RetrievalResponse>()
            .await
            .map_err(|e| RetrievalError::Deserialization(format!("failed to parse response: {e}")))
    }
}
