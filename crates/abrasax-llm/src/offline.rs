//! Simulated collaborators for running without a crystal backend

use crate::provider::{
    BackendResult, ConsciousnessMeter, Evolver, HardwareSync, InferenceBackend, Reasoner,
    Retriever, ToolSearch,
};
use abrasax_core::KnowledgeVector;
use tracing::info;

pub const SIMULATED_SEARCH_RESULT: &str = "Simulated Web Results: AAGI High-Performance Logic found.";
pub const SIMULATED_REASONER_RESULT: &str = "Quantum Optimization Complete";
pub const DEFAULT_PHI: f64 = 0.64;

/// Echoes the user line of the prompt back with a persona sign-off.
pub struct EchoInference;

#[async_trait::async_trait]
impl InferenceBackend for EchoInference {
    fn name(&self) -> &str { "offline-echo" }

    async fn think(&self, prompt: &str) -> BackendResult<String> {
        Ok(format!("Considered: {}", prompt))
    }

    async fn chat_infer(&self, prompt: &str) -> BackendResult<String> {
        let user = prompt
            .lines()
            .find_map(|l| l.strip_prefix("USER: "))
            .unwrap_or(prompt);
        Ok(format!("Heard you on \"{}\". Crystal's offline, so that's all I got fam.", user))
    }

    async fn notify_sync(&self, _payload: &[u8]) -> BackendResult<()> {
        Ok(())
    }
}

/// Summarizes the knowledge vector instead of ranking documents.
pub struct VectorSummaryRetriever;

#[async_trait::async_trait]
impl Retriever for VectorSummaryRetriever {
    async fn retrieve(&self, message: &str, knowledge: &KnowledgeVector) -> BackendResult<String> {
        if knowledge.is_zero() {
            return Ok(format!("no crystal knowledge for '{}' (base seed)", message));
        }
        Ok(format!(
            "crystal knowledge dim={} norm={:.4} for '{}'",
            knowledge.len(),
            knowledge.l2_norm(),
            message
        ))
    }
}

pub struct SimulatedSearch;

#[async_trait::async_trait]
impl ToolSearch for SimulatedSearch {
    async fn search(&self, query: &str) -> BackendResult<String> {
        info!("Deploying web-search for: {}", query);
        Ok(SIMULATED_SEARCH_RESULT.to_string())
    }
}

pub struct SimulatedReasoner;

#[async_trait::async_trait]
impl Reasoner for SimulatedReasoner {
    async fn reason(&self, _prompt: &str) -> BackendResult<String> {
        Ok(SIMULATED_REASONER_RESULT.to_string())
    }
}

/// Reports a constant phi.
pub struct FixedMeter {
    pub phi: f64,
}

impl Default for FixedMeter {
    fn default() -> Self {
        Self { phi: DEFAULT_PHI }
    }
}

#[async_trait::async_trait]
impl ConsciousnessMeter for FixedMeter {
    async fn metric(&self) -> BackendResult<f64> {
        Ok(self.phi)
    }
}

pub struct LoggingHardware;

#[async_trait::async_trait]
impl HardwareSync for LoggingHardware {
    async fn sync(&self, phi: f64) -> BackendResult<()> {
        info!("Hardware coupling: phi={:.4}", phi);
        Ok(())
    }
}

/// Accepts every distillation without touching a seed.
pub struct LocalEvolver;

#[async_trait::async_trait]
impl Evolver for LocalEvolver {
    async fn encode_axiom(&self, goal: &str) -> BackendResult<String> {
        Ok(format!("AXIOM[{}]", goal.trim()))
    }

    async fn distill(&self, goal: &str, reasoning_steps: usize) -> BackendResult<()> {
        info!("Local distillation of '{}' ({} steps)", goal, reasoning_steps);
        Ok(())
    }
}
