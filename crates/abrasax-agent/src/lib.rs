//! Abrasax Agent - Loyalty-gated orchestration of the crystal chat pipeline
//!
//! Layers, leaf-first:
//! - knowledge: seed artifact → 4096-lane knowledge vector
//! - memory: evolution state persistence
//! - loyalty: anchor axiom hash check, fatal on mismatch
//! - router: keyword classification of incoming messages
//! - pipeline: one chat turn (correction, retrieval, tools, inference)
//! - orchestrator: owns state + pipeline, hosts the reasoning action
//! - autonomy: self-prompting loop driving the orchestrator until cancelled

pub mod autonomy;
pub mod config;
pub mod knowledge;
pub mod loyalty;
pub mod memory;
pub mod orchestrator;
pub mod pipeline;
pub mod router;

pub use autonomy::{AutonomousLoop, LoopReport};
pub use config::AbrasaxConfig;
pub use loyalty::LoyaltyGuard;
pub use memory::MemoryStore;
pub use orchestrator::{Orchestrator, Status};
pub use pipeline::{ChatPipeline, Turn, CORRECTION_ACK};
pub use router::{KeywordRouter, MessageClassifier, Route};
pub use tokio_util::sync::CancellationToken;
