//! Core types for Abrasax

use serde::{Deserialize, Serialize};

/// Number of f64 lanes in a knowledge vector.
pub const KNOWLEDGE_DIM: usize = 4096;

/// Seed identifier used when no evolution state has been persisted yet.
pub const DEFAULT_ACTIVE_SEED: &str = "Living_Seed";

/// Persisted evolution counter and the seed it applies to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionState {
    pub evolution_count: u64,
    pub active_seed: String,
}

impl Default for EvolutionState {
    fn default() -> Self {
        Self {
            evolution_count: 0,
            active_seed: DEFAULT_ACTIVE_SEED.to_string(),
        }
    }
}

/// Fixed-length vector distilled from a seed artifact.
///
/// Always exactly [`KNOWLEDGE_DIM`] values long.
#[derive(Clone, Debug, PartialEq)]
pub struct KnowledgeVector(Box<[f64]>);

impl KnowledgeVector {
    pub fn zeros() -> Self {
        Self(vec![0.0; KNOWLEDGE_DIM].into_boxed_slice())
    }

    /// Build from exactly [`KNOWLEDGE_DIM`] values. Returns `None` on any other length.
    pub fn from_values(values: Vec<f64>) -> Option<Self> {
        if values.len() == KNOWLEDGE_DIM {
            Some(Self(values.into_boxed_slice()))
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }

    pub fn l2_norm(&self) -> f64 {
        self.0.iter().map(|v| v * v).sum::<f64>().sqrt()
    }
}

impl Default for KnowledgeVector {
    fn default() -> Self {
        Self::zeros()
    }
}

/// Ordered, append-only log of user corrections.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorrectionBuffer {
    entries: Vec<String>,
}

impl CorrectionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push(message.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }
}

/// Mutable state carried across turns. Owned by a single orchestrator.
#[derive(Clone, Debug, Default)]
pub struct AgentState {
    pub evolution: EvolutionState,
    pub corrections: CorrectionBuffer,
}

impl AgentState {
    pub fn new(evolution: EvolutionState) -> Self {
        Self {
            evolution,
            corrections: CorrectionBuffer::new(),
        }
    }
}
