//! Abrasax LLM - Collaborator contracts and backend adapters
//!
//! The orchestrator never talks to a backend directly. It holds a
//! [`Collaborators`] bundle of trait objects, built either against a remote
//! crystal backend ([`HttpBackend`]) or fully offline ([`offline`]).

pub mod http;
pub mod offline;
pub mod provider;
pub mod types;

pub use http::HttpBackend;
pub use provider::*;
pub use types::*;

use std::sync::Arc;
use std::time::Duration;

/// Every external collaborator the orchestrator calls, as shared trait objects.
#[derive(Clone)]
pub struct Collaborators {
    pub inference: Arc<dyn InferenceBackend>,
    pub retriever: Arc<dyn Retriever>,
    pub search: Arc<dyn ToolSearch>,
    pub reasoner: Arc<dyn Reasoner>,
    pub meter: Arc<dyn ConsciousnessMeter>,
    pub hardware: Arc<dyn HardwareSync>,
    pub evolver: Arc<dyn Evolver>,
}

impl Collaborators {
    /// Simulated collaborators only. No network.
    pub fn offline() -> Self {
        Self {
            inference: Arc::new(offline::EchoInference),
            retriever: Arc::new(offline::VectorSummaryRetriever),
            search: Arc::new(offline::SimulatedSearch),
            reasoner: Arc::new(offline::SimulatedReasoner),
            meter: Arc::new(offline::FixedMeter::default()),
            hardware: Arc::new(offline::LoggingHardware),
            evolver: Arc::new(offline::LocalEvolver),
        }
    }

    /// Remote crystal backend for inference, metric and distillation;
    /// simulated retrieval, search, reasoning and hardware coupling.
    pub fn http(base_url: impl Into<String>, timeout: Duration) -> Self {
        let backend = Arc::new(HttpBackend::new(base_url, timeout));
        Self {
            inference: backend.clone(),
            meter: backend.clone(),
            evolver: backend,
            ..Self::offline()
        }
    }
}
