//! Crystal backend provider over the JSON HTTP API (`/chat`, `/status`, `/simulate`, `/sync`)

use crate::provider::{
    BackendError, BackendResult, ConsciousnessMeter, Evolver, InferenceBackend,
};
use crate::types::{ChatRequest, ChatResponse, SimulationRequest, SimulationResponse, StatusResponse};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

const DISTILL_SCRIPT: &str = "living_seed_flow.jl";

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_chat(&self, message: String) -> BackendResult<String> {
        debug!("Crystal request: POST /chat ({} chars)", message.len());

        let response = self
            .client
            .post(self.url("/chat"))
            .json(&ChatRequest { message })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() && status.as_u16() != 400 {
            let error_text = response.text().await.unwrap_or_default();
            error!("Crystal error {}: {}", status, error_text);
            return Err(BackendError::RequestFailed(format!("{}: {}", status, error_text)));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;
        body.into_result().map_err(BackendError::Rejected)
    }
}

#[async_trait::async_trait]
impl InferenceBackend for HttpBackend {
    fn name(&self) -> &str { "crystal-http" }

    async fn think(&self, prompt: &str) -> BackendResult<String> {
        self.post_chat(format!("THINK: {}", prompt)).await
    }

    async fn chat_infer(&self, prompt: &str) -> BackendResult<String> {
        self.post_chat(prompt.to_string()).await
    }

    async fn notify_sync(&self, payload: &[u8]) -> BackendResult<()> {
        let response = self
            .client
            .post(self.url("/sync"))
            .header("content-type", "application/octet-stream")
            .body(payload.to_vec())
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(BackendError::RequestFailed(format!("sync: {}", response.status())))
        }
    }
}

#[async_trait::async_trait]
impl ConsciousnessMeter for HttpBackend {
    async fn metric(&self) -> BackendResult<f64> {
        let response = self.client.get(self.url("/status")).send().await?;
        if !response.status().is_success() {
            return Err(BackendError::RequestFailed(format!("status: {}", response.status())));
        }
        let status: StatusResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;
        if status.status != "online" {
            return Err(BackendError::Unavailable(status.status));
        }
        Ok(status.phi)
    }
}

#[async_trait::async_trait]
impl Evolver for HttpBackend {
    async fn encode_axiom(&self, goal: &str) -> BackendResult<String> {
        self.post_chat(format!("AXIOM: {}", goal)).await
    }

    async fn distill(&self, goal: &str, reasoning_steps: usize) -> BackendResult<()> {
        let request = SimulationRequest {
            script: DISTILL_SCRIPT.to_string(),
            goal: Some(goal.to_string()),
            reasoning_steps: Some(reasoning_steps),
        };

        let response = self
            .client
            .post(self.url("/simulate"))
            .json(&request)
            .send()
            .await?;

        // /simulate reports failures in the body for 404/500 as well.
        let body: SimulationResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        if body.success {
            debug!("Distillation complete: {}", body.result.as_deref().unwrap_or(""));
            Ok(())
        } else {
            Err(BackendError::Rejected(
                body.error.unwrap_or_else(|| "simulation failed".to_string()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("http://localhost:3000/", Duration::from_secs(1));
        assert_eq!(backend.base_url(), "http://localhost:3000");
        assert_eq!(backend.url("/chat"), "http://localhost:3000/chat");
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_network_error() {
        // Port 9 (discard) on loopback is not expected to speak HTTP.
        let backend = HttpBackend::new("http://127.0.0.1:9", Duration::from_millis(500));
        let result = backend.chat_infer("hello").await;
        assert!(result.is_err());
    }
}
