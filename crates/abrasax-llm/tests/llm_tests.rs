//! Tests for abrasax-llm: wire types, offline collaborators, collaborator bundle

use abrasax_core::{KnowledgeVector, KNOWLEDGE_DIM};
use abrasax_llm::offline::*;
use abrasax_llm::*;

// ===========================================================================
// Wire types
// ===========================================================================

#[test]
fn chat_response_success_yields_response_text() {
    let json = r#"{"success":true,"message":"hi","response":"yo","phi":0.64,"timestamp":"2026-01-01T00:00:00Z"}"#;
    let resp: ChatResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.phi, 0.64);
    assert_eq!(resp.into_result().unwrap(), "yo");
}

#[test]
fn chat_response_failure_without_message() {
    let resp: ChatResponse = serde_json::from_str(r#"{"success":false,"timestamp":"t"}"#).unwrap();
    assert_eq!(resp.into_result().unwrap_err(), "backend reported failure");
}

#[test]
fn status_response_tolerates_extra_fields() {
    let json = r#"{"status":"online","system":"CBM-Q","version":"5.0","core":"7D","phi":0.64,"architect":"x","timestamp":"t"}"#;
    let status: StatusResponse = serde_json::from_str(json).unwrap();
    assert_eq!(status.status, "online");
    assert_eq!(status.phi, 0.64);
}

#[test]
fn simulation_request_omits_empty_goal() {
    let req = SimulationRequest {
        script: "genesis_run.jl".into(),
        goal: None,
        reasoning_steps: None,
    };
    let json = serde_json::to_string(&req).unwrap();
    assert_eq!(json, r#"{"script":"genesis_run.jl"}"#);
}

#[test]
fn simulation_response_error_field() {
    let json = r#"{"success":false,"error":"Script not found: x.jl","script":"x.jl","timestamp":"t"}"#;
    let resp: SimulationResponse = serde_json::from_str(json).unwrap();
    assert!(!resp.success);
    assert_eq!(resp.error.as_deref(), Some("Script not found: x.jl"));
    assert!(resp.result.is_none());
}

// ===========================================================================
// Offline collaborators
// ===========================================================================

#[tokio::test]
async fn echo_inference_quotes_user_line() {
    let prompt = "IDENTITY: p\nRAG_DATA: ctx\nUSER: tell me a joke\nABRASAX:";
    let out = EchoInference.chat_infer(prompt).await.unwrap();
    assert!(out.contains("tell me a joke"));
    assert!(!out.contains("RAG_DATA"));
    assert!(EchoInference.notify_sync(b"bytes").await.is_ok());
}

#[tokio::test]
async fn vector_summary_distinguishes_base_seed() {
    let zero = VectorSummaryRetriever
        .retrieve("q", &KnowledgeVector::zeros())
        .await
        .unwrap();
    assert!(zero.contains("base seed"));

    let ones = KnowledgeVector::from_values(vec![1.0; KNOWLEDGE_DIM]).unwrap();
    let ctx = VectorSummaryRetriever.retrieve("q", &ones).await.unwrap();
    assert!(ctx.contains("dim=4096"));
    assert!(ctx.contains("norm=64.0000"));
}

#[tokio::test]
async fn simulated_tools_return_canned_results() {
    assert_eq!(SimulatedSearch.search("web stuff").await.unwrap(), SIMULATED_SEARCH_RESULT);
    assert_eq!(SimulatedReasoner.reason("x").await.unwrap(), SIMULATED_REASONER_RESULT);
    assert_eq!(FixedMeter::default().metric().await.unwrap(), DEFAULT_PHI);
    assert!(LoggingHardware.sync(0.5).await.is_ok());
}

#[tokio::test]
async fn local_evolver_accepts_distillation() {
    assert_eq!(LocalEvolver.encode_axiom("  grow  ").await.unwrap(), "AXIOM[grow]");
    assert!(LocalEvolver.distill("grow", 5).await.is_ok());
}

// ===========================================================================
// Collaborators bundle
// ===========================================================================

#[tokio::test]
async fn offline_bundle_is_fully_wired() {
    let c = Collaborators::offline();
    assert_eq!(c.inference.name(), "offline-echo");
    assert_eq!(c.meter.metric().await.unwrap(), DEFAULT_PHI);
    assert!(c.search.search("vision").await.is_ok());
}

#[test]
fn http_bundle_uses_remote_inference() {
    let c = Collaborators::http("http://localhost:3000", std::time::Duration::from_secs(5));
    assert_eq!(c.inference.name(), "crystal-http");
}

#[test]
fn backend_error_display() {
    let e = BackendError::Rejected("nope".into());
    assert_eq!(e.to_string(), "backend rejected request: nope");
    let e = BackendError::Unavailable("offline".into());
    assert_eq!(e.to_string(), "unavailable: offline");
}
