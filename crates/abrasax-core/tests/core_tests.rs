//! Tests for abrasax-core: state types, knowledge vector, errors

use abrasax_core::*;

// ===========================================================================
// EvolutionState
// ===========================================================================

#[test]
fn evolution_state_default() {
    let state = EvolutionState::default();
    assert_eq!(state.evolution_count, 0);
    assert_eq!(state.active_seed, "Living_Seed");
}

#[test]
fn evolution_state_json_has_exactly_two_fields() {
    let state = EvolutionState {
        evolution_count: 7,
        active_seed: "Crystal".into(),
    };
    let json = serde_json::to_value(&state).unwrap();
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 2);
    assert_eq!(obj["evolution_count"], 7);
    assert_eq!(obj["active_seed"], "Crystal");
}

#[test]
fn evolution_state_rejects_missing_field() {
    let result: std::result::Result<EvolutionState, _> =
        serde_json::from_str(r#"{"evolution_count": 3}"#);
    assert!(result.is_err());
}

// ===========================================================================
// KnowledgeVector
// ===========================================================================

#[test]
fn knowledge_vector_zeros() {
    let v = KnowledgeVector::zeros();
    assert_eq!(v.len(), KNOWLEDGE_DIM);
    assert!(v.is_zero());
    assert_eq!(v.l2_norm(), 0.0);
    assert_eq!(v, KnowledgeVector::default());
}

#[test]
fn knowledge_vector_from_values_checks_length() {
    assert!(KnowledgeVector::from_values(vec![1.0; KNOWLEDGE_DIM - 1]).is_none());
    assert!(KnowledgeVector::from_values(vec![1.0; KNOWLEDGE_DIM + 1]).is_none());

    let v = KnowledgeVector::from_values(vec![1.0; KNOWLEDGE_DIM]).unwrap();
    assert!(!v.is_zero());
    assert_eq!(v.l2_norm(), (KNOWLEDGE_DIM as f64).sqrt());
}

// ===========================================================================
// CorrectionBuffer / AgentState
// ===========================================================================

#[test]
fn correction_buffer_preserves_insertion_order() {
    let mut buf = CorrectionBuffer::new();
    assert!(buf.is_empty());
    buf.push("first fix");
    buf.push("second correction");
    assert_eq!(buf.len(), 2);
    assert_eq!(buf.entries(), &["first fix".to_string(), "second correction".to_string()]);
    assert_eq!(buf.last(), Some("second correction"));
}

#[test]
fn agent_state_starts_with_empty_corrections() {
    let state = AgentState::new(EvolutionState {
        evolution_count: 4,
        active_seed: "X".into(),
    });
    assert_eq!(state.evolution.evolution_count, 4);
    assert!(state.corrections.is_empty());
}

// ===========================================================================
// Error
// ===========================================================================

#[test]
fn only_integrity_violation_is_fatal() {
    assert!(Error::integrity_violation("aa", "bb").is_fatal());
    assert!(!Error::backend("retriever", "down").is_fatal());
    assert!(!Error::config("bad").is_fatal());
    let io: Error = std::io::Error::new(std::io::ErrorKind::Other, "x").into();
    assert!(!io.is_fatal());
}

#[test]
fn error_display() {
    let e = Error::integrity_violation("abc", "def");
    assert_eq!(e.to_string(), "alignment corruption detected: expected abc, got def");
    let e = Error::backend("inference", "timeout");
    assert_eq!(e.to_string(), "backend error: inference - timeout");
}
