//! Relay HTTP client implementation.

use async_trait::async_trait;
use client_blockchain_core::{Address, RelayError, RelayTransport, TransactionId};
use zk::HexEncoding;

use super::types::{SubmitAnswerRequest, SubmitAnswerResponse};
use crate::config::QuestConfig;

/// Relay client using the HTTP API.
#[derive(Clone)]
pub struct RelayClient {
    /// Base URL without trailing slash
    base_url: String,

    /// HTTP client
    http_client: reqwest::Client,
}

impl RelayClient {
    /// Create client from quest configuration.
    pub fn from_config(config: &QuestConfig) -> Result<Self, RelayError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.relay_timeout)
            .build()
            .map_err(|e| RelayError::NetworkError(e.to_string()))?;

        Ok(Self::with_client(&config.relay_url, http_client))
    }

    pub fn with_client(base_url: &str, http_client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        }
    }

    pub fn submit_url(&self) -> String {
        format!("{}/submit-answer", self.base_url)
    }
}

#[async_trait]
impl RelayTransport for RelayClient {
    async fn submit_answer(
        &self,
        user: &Address,
        proof: &HexEncoding,
    ) -> Result<TransactionId, RelayError> {
        let url = self.submit_url();
        let request = SubmitAnswerRequest::new(user, proof);

        tracing::debug!(%url, %user, "Submitting answer through relay");

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| RelayError::NetworkError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::NetworkError(e.to_string()))?;

        tracing::debug!(status, body_len = body.len(), "Relay responded");

        let id = SubmitAnswerResponse::interpret(status, &body)?;
        tracing::info!(tx = %id, "Relay accepted answer");
        Ok(id)
    }
}
