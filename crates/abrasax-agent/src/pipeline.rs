//! Chat pipeline: one loyalty-gated conversational turn
//!
//! Strict order per turn:
//!   loyalty → classification → retrieval → trace → tool search →
//!   prompt assembly → inference → sync notification
//!
//! Corrections short-circuit after classification. Collaborator failures
//! degrade the turn instead of failing it; only an integrity violation
//! propagates.

use crate::loyalty::LoyaltyGuard;
use crate::router::{KeywordRouter, MessageClassifier, Route};
use abrasax_core::{CorrectionBuffer, KnowledgeVector, Result};
use abrasax_llm::{Collaborators, InferenceBackend, Retriever, ToolSearch};
use std::sync::Arc;
use tracing::{info, warn};

pub const CORRECTION_ACK: &str = "Aight user-root, I see you. My bad fam, I'm fixin' that in the \
    Crystal right now. We keep it 100 on this side. What's next?";

/// Outcome of a single turn.
#[derive(Debug, Clone)]
pub struct Turn {
    pub route: Route,
    /// Observability lines, in emission order. Empty for corrections.
    pub trace: Vec<String>,
    pub response: String,
}

pub struct ChatPipeline {
    guard: LoyaltyGuard,
    knowledge: KnowledgeVector,
    persona: String,
    classifier: Box<dyn MessageClassifier>,
    inference: Arc<dyn InferenceBackend>,
    retriever: Arc<dyn Retriever>,
    search: Arc<dyn ToolSearch>,
}

impl ChatPipeline {
    pub fn new(guard: LoyaltyGuard, persona: impl Into<String>, collaborators: &Collaborators) -> Self {
        Self {
            guard,
            knowledge: KnowledgeVector::zeros(),
            persona: persona.into(),
            classifier: Box::new(KeywordRouter::default()),
            inference: collaborators.inference.clone(),
            retriever: collaborators.retriever.clone(),
            search: collaborators.search.clone(),
        }
    }

    pub fn with_knowledge(mut self, knowledge: KnowledgeVector) -> Self {
        self.knowledge = knowledge;
        self
    }

    pub fn with_classifier(mut self, classifier: impl MessageClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    pub fn set_classifier(&mut self, classifier: impl MessageClassifier + 'static) {
        self.classifier = Box::new(classifier);
    }

    pub fn guard(&self) -> &LoyaltyGuard {
        &self.guard
    }

    pub fn knowledge(&self) -> &KnowledgeVector {
        &self.knowledge
    }

    pub fn set_knowledge(&mut self, knowledge: KnowledgeVector) {
        self.knowledge = knowledge;
    }

    pub fn persona(&self) -> &str {
        &self.persona
    }

    /// Run a turn and return only the response text.
    pub async fn handle(&self, corrections: &mut CorrectionBuffer, message: &str) -> Result<String> {
        Ok(self.handle_turn(corrections, message).await?.response)
    }

    pub async fn handle_turn(&self, corrections: &mut CorrectionBuffer, message: &str) -> Result<Turn> {
        self.guard.verify()?;

        let route = self.classifier.classify(message);
        if route == Route::Correction {
            info!("Correction received, updating seed buffer");
            corrections.push(message);
            return Ok(Turn {
                route,
                trace: Vec::new(),
                response: CORRECTION_ACK.to_string(),
            });
        }

        let rag_context = match self.retriever.retrieve(message, &self.knowledge).await {
            Ok(ctx) => ctx,
            Err(e) => {
                warn!("Retrieval failed: {}", e);
                format!("[retrieval unavailable: {}]", e)
            }
        };

        let trace = trace_lines(corrections.len(), &rag_context, &self.persona);
        for line in &trace {
            info!("{}", line);
        }

        let mut user_message = message.to_string();
        if route == Route::ToolSearch {
            let search_result = match self.search.search(message).await {
                Ok(r) => r,
                Err(e) => {
                    warn!("Tool search failed: {}", e);
                    format!("[search unavailable: {}]", e)
                }
            };
            user_message = format!("{} (Context: {} | RAG: {})", message, search_result, rag_context);
        }

        let prompt = build_prompt(&self.persona, &rag_context, &user_message);
        let response = match self.inference.chat_infer(&prompt).await {
            Ok(r) => r,
            Err(e) => {
                warn!("Inference via {} failed: {}", self.inference.name(), e);
                format!("[inference error] {}", e)
            }
        };

        if let Err(e) = self.inference.notify_sync(user_message.as_bytes()).await {
            warn!("Sync notification failed (ignored): {}", e);
        }

        Ok(Turn { route, trace, response })
    }
}

/// Deterministic observability lines for a non-correction turn.
pub fn trace_lines(corrections: usize, rag_context: &str, persona: &str) -> Vec<String> {
    vec![
        "> Accessing Abrasax-Crystal VSA memory...".to_string(),
        format!("> Evaluating user intent vs Anchor Axiom (Correction Buffer: {})...", corrections),
        format!("> Performing Holographic RAG: {}", rag_context),
        "> Running Expert Routing (MoE ACTIVE)...".to_string(),
        "> Applying Grail Rail (Stability Guardrails: UP)...".to_string(),
        format!("> Unfolding persona layer: {}", persona),
    ]
}

pub fn build_prompt(persona: &str, rag_context: &str, message: &str) -> String {
    format!("IDENTITY: {}\nRAG_DATA: {}\nUSER: {}\nABRASAX:", persona, rag_context, message)
}
