//! Collaborator traits

use abrasax_core::KnowledgeVector;

/// Result type for collaborator calls
pub type BackendResult<T> = Result<T, BackendError>;

/// Collaborator error types
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("backend rejected request: {0}")]
    Rejected(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("unavailable: {0}")]
    Unavailable(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// The inference/training backend.
#[async_trait::async_trait]
pub trait InferenceBackend: Send + Sync {
    fn name(&self) -> &str;

    /// Advisory deliberation on a prompt. Output is informational only.
    async fn think(&self, prompt: &str) -> BackendResult<String>;

    /// Produce the user-facing response for an assembled prompt.
    async fn chat_infer(&self, prompt: &str) -> BackendResult<String>;

    /// Notify the backend that a message was processed. Callers ignore failures.
    async fn notify_sync(&self, payload: &[u8]) -> BackendResult<()>;
}

/// Retrieval engine. Ranking is opaque; only the context string matters.
#[async_trait::async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(&self, message: &str, knowledge: &KnowledgeVector) -> BackendResult<String>;
}

/// Web/vision tool search.
#[async_trait::async_trait]
pub trait ToolSearch: Send + Sync {
    async fn search(&self, query: &str) -> BackendResult<String>;
}

/// Fast external reasoner consulted once per autonomous cycle.
#[async_trait::async_trait]
pub trait Reasoner: Send + Sync {
    async fn reason(&self, prompt: &str) -> BackendResult<String>;
}

/// Consciousness telemetry (phi).
#[async_trait::async_trait]
pub trait ConsciousnessMeter: Send + Sync {
    async fn metric(&self) -> BackendResult<f64>;
}

/// Hardware coupling that receives the consciousness metric.
#[async_trait::async_trait]
pub trait HardwareSync: Send + Sync {
    async fn sync(&self, phi: f64) -> BackendResult<()>;
}

/// Logic-axiom encoder and seed distillation used by the reasoning action.
#[async_trait::async_trait]
pub trait Evolver: Send + Sync {
    /// Encode a goal as a logical axiom. Advisory.
    async fn encode_axiom(&self, goal: &str) -> BackendResult<String>;

    /// Distill a goal into the living seed. Success advances the evolution counter.
    async fn distill(&self, goal: &str, reasoning_steps: usize) -> BackendResult<()>;
}
