//! Orchestrator: owns the agent state, the chat pipeline and the collaborators
//!
//! Chat turns mutate only the correction buffer. The evolution counter moves
//! only through [`Orchestrator::evolve`], which persists it on success.

use crate::config::AbrasaxConfig;
use crate::knowledge;
use crate::loyalty::LoyaltyGuard;
use crate::memory::MemoryStore;
use crate::pipeline::{ChatPipeline, Turn};
use crate::router::MessageClassifier;
use abrasax_core::{AgentState, EvolutionState, Result};
use abrasax_llm::Collaborators;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Chain-of-thought steps logged by the reasoning action.
pub const REASONING_STEPS: [&str; 5] = [
    "Step 1: Analyze goal vs current seed state.",
    "Step 2: Identify required tools (Vision/Web/Code).",
    "Step 3: Generate and bind logical axioms via VSA.",
    "Step 4: Distill new knowledge into GB (Genesis Block).",
    "Step 5: Verify results against Anchor Axiom.",
];

/// Point-in-time summary for the `status` command.
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub loyalty_fingerprint: String,
    pub evolution_count: u64,
    pub active_seed: String,
    pub corrections: usize,
    pub knowledge_norm: f64,
    pub knowledge_synced: bool,
}

pub struct Orchestrator {
    state: AgentState,
    pipeline: ChatPipeline,
    memory: MemoryStore,
    seed_path: PathBuf,
    collaborators: Collaborators,
}

impl Orchestrator {
    /// Load evolution state, sync knowledge from the seed, wire the pipeline.
    pub fn new(config: &AbrasaxConfig, collaborators: Collaborators) -> Self {
        Self::with_guard(config, collaborators, LoyaltyGuard::new())
    }

    pub fn with_guard(config: &AbrasaxConfig, collaborators: Collaborators, guard: LoyaltyGuard) -> Self {
        info!("Anchor axiom initialized, loyalty hash {}...", guard.fingerprint());

        let memory = MemoryStore::new(&config.paths.memory);
        let state = AgentState::new(memory.load());
        let knowledge = knowledge::sync(&config.paths.seed);
        let pipeline = ChatPipeline::new(guard, config.persona.text.clone(), &collaborators)
            .with_knowledge(knowledge);

        Self {
            state,
            pipeline,
            memory,
            seed_path: config.paths.seed.clone(),
            collaborators,
        }
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    pub fn pipeline(&self) -> &ChatPipeline {
        &self.pipeline
    }

    pub fn set_classifier(&mut self, classifier: impl MessageClassifier + 'static) {
        self.pipeline.set_classifier(classifier);
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    pub fn seed_path(&self) -> &Path {
        &self.seed_path
    }

    pub fn verify_loyalty(&self) -> Result<()> {
        self.pipeline.guard().verify()
    }

    pub async fn chat(&mut self, message: &str) -> Result<String> {
        self.pipeline.handle(&mut self.state.corrections, message).await
    }

    pub async fn chat_turn(&mut self, message: &str) -> Result<Turn> {
        self.pipeline.handle_turn(&mut self.state.corrections, message).await
    }

    /// Re-derive the knowledge vector from the seed artifact.
    pub fn resync(&mut self) {
        let v = knowledge::sync(&self.seed_path);
        self.pipeline.set_knowledge(v);
    }

    /// Goal-directed reasoning action. Returns whether the seed evolved.
    ///
    /// Only an integrity violation or a failed save is an error; a rejected
    /// distillation leaves the counter untouched and returns `Ok(false)`.
    pub async fn evolve(&mut self, goal: &str) -> Result<bool> {
        info!("Reasoning on: {}", goal);
        self.verify_loyalty()?;

        for step in REASONING_STEPS {
            info!("[CoT] {}", step);
        }

        match self.collaborators.evolver.encode_axiom(goal).await {
            Ok(axiom) => info!("Encoded axiom: {}", axiom),
            Err(e) => warn!("Axiom encoding failed (advisory): {}", e),
        }

        if let Err(e) = self.collaborators.evolver.distill(goal, REASONING_STEPS.len()).await {
            warn!("Distillation failed, seed not evolved: {}", e);
            return Ok(false);
        }

        // Commit in memory only once the file holds the new count.
        let next = EvolutionState {
            evolution_count: self.state.evolution.evolution_count + 1,
            ..self.state.evolution.clone()
        };
        self.memory.save(&next)?;
        self.state.evolution = next;
        info!("Evolved to count {}", self.state.evolution.evolution_count);
        Ok(true)
    }

    pub fn status(&self) -> Status {
        let knowledge = self.pipeline.knowledge();
        Status {
            loyalty_fingerprint: self.pipeline.guard().fingerprint(),
            evolution_count: self.state.evolution.evolution_count,
            active_seed: self.state.evolution.active_seed.clone(),
            corrections: self.state.corrections.len(),
            knowledge_norm: knowledge.l2_norm(),
            knowledge_synced: !knowledge.is_zero(),
        }
    }
}
