//! Integration tests for the drafting pipeline.
//!
//! These tests drive the full flow through the public API:
//! 1. Form fields are joined and screened by the content classifier
//! 2. A strict request is assembled and sent to the (mock) backend
//! 3. The reply is recovered into ordered fields and interpreted
//! 4. Successful drafts are rendered and exported
//!
//! Uses `MockAIProvider` so no network or credential is required.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;

use powerdash_medical::adapters::ai::{MockAIProvider, MockError};
use powerdash_medical::adapters::document::UnavailableExportService;
use powerdash_medical::application::{
    DraftDocumentCommand, DraftDocumentHandler, ExportDocumentHandler,
};
use powerdash_medical::config::AppConfig;
use powerdash_medical::domain::document::RenderedDocument;
use powerdash_medical::domain::generation::{
    FailureKind, GenerationResult, CLASSIFIER_NEXT_STEP, PERSONA, RULES,
};
use powerdash_medical::domain::safety::ContentClassifier;

// =============================================================================
// Test Infrastructure
// =============================================================================

const NARRATIVE: &str = "Scientific Narrative Generator";

fn handler_with(provider: &MockAIProvider) -> DraftDocumentHandler {
    DraftDocumentHandler::from_config(&AppConfig::default(), Arc::new(provider.clone()))
        .expect("default configuration builds")
}

fn narrative(fields: &[&str]) -> DraftDocumentCommand {
    DraftDocumentCommand::new(NARRATIVE, fields.iter().map(|f| f.to_string()).collect())
}

// =============================================================================
// Success path
// =============================================================================

#[tokio::test]
async fn clean_input_drafts_a_single_section_document() {
    let provider =
        MockAIProvider::new().with_response(r#"{"core_scientific_narrative": "..."}"#);

    let outcome = handler_with(&provider)
        .handle(narrative(&["Our MOA data shows..."]))
        .await;

    assert_eq!(provider.call_count(), 1);
    assert!(outcome.result.is_success());

    let doc = RenderedDocument::from_result(NARRATIVE, &outcome.result).unwrap();
    assert_eq!(doc.sections.len(), 1);
    assert_eq!(doc.sections[0].heading, "Core Scientific Narrative");
    assert_eq!(doc.sections[0].body, "...");
}

#[tokio::test]
async fn request_puts_rules_before_tool_schema() {
    let provider = MockAIProvider::new().with_response("{}");

    handler_with(&provider)
        .handle(narrative(&["Oncology", "Molecule Z"]))
        .await;

    let request = &provider.get_calls()[0];
    let system = &request.system_instructions;
    let persona_at = system.find(PERSONA).unwrap();
    let rules_at = system.find(RULES).unwrap();
    let schema_at = system.find("core_scientific_narrative").unwrap();
    assert!(persona_at < rules_at);
    assert!(rules_at < schema_at);
    assert!(request.user_content.ends_with("Oncology\nMolecule Z"));
}

#[tokio::test]
async fn prose_wrapped_reply_is_recovered_in_schema_order() {
    let provider = MockAIProvider::new().with_response(
        "Sure! Here is the draft:\n```json\n\
         {\"core_scientific_narrative\": \"A\", \"disease_state_overview\": \"B\", \
          \"short_form_variants\": {\"msl_conversation\": \"C\"}}\n```\nLet me know.",
    );

    let outcome = handler_with(&provider).handle(narrative(&["MOA"])).await;

    let fields = outcome.result.fields().expect("success");
    let keys: Vec<_> = fields.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "core_scientific_narrative",
            "disease_state_overview",
            "short_form_variants"
        ]
    );
    assert_eq!(fields["short_form_variants"], json!({"msl_conversation": "C"}));
}

#[tokio::test]
async fn successful_draft_exports_text() {
    let provider = MockAIProvider::new().with_response(
        r#"{"core_scientific_narrative": "X", "disease_state_overview": "Y"}"#,
    );
    let outcome = handler_with(&provider).handle(narrative(&["MOA"])).await;

    let exporter = ExportDocumentHandler::new(Arc::new(UnavailableExportService));
    let bundle = exporter
        .handle(&outcome.tool.unwrap(), &outcome.result)
        .unwrap();

    let text = String::from_utf8(bundle.text.content).unwrap();
    let core = text.find("Core Scientific Narrative").unwrap();
    let overview = text.find("Disease State Overview").unwrap();
    assert!(core < overview);
    assert!(bundle.text.filename.starts_with("scientific-narrative-generator-"));
    assert!(bundle.paginated.is_none());
}

// =============================================================================
// Safety gate
// =============================================================================

#[tokio::test]
async fn patient_identifiers_block_before_backend_call() {
    let provider = MockAIProvider::new();

    let outcome = handler_with(&provider)
        .handle(narrative(&["The patient's date of birth is 01/02/1960"]))
        .await;

    assert!(outcome.result.is_blocked());
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn every_field_is_screened() {
    let provider = MockAIProvider::new();

    let outcome = handler_with(&provider)
        .handle(narrative(&["Cardiology", "Drug A", "contact j.doe@example.com"]))
        .await;

    match outcome.result {
        GenerationResult::Blocked { reasons, next_step } => {
            assert!(reasons.iter().any(|r| r.contains("email")));
            assert_eq!(next_step, CLASSIFIER_NEXT_STEP);
        }
        other => panic!("expected Blocked, got {other:?}"),
    }
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn configured_keywords_replace_defaults() {
    let mut config = AppConfig::default();
    config.safety.ae_keywords = vec!["black triangle".to_string()];
    let provider = MockAIProvider::new().with_response("{}");
    let handler = DraftDocumentHandler::from_config(&config, Arc::new(provider.clone())).unwrap();

    let blocked = handler.handle(narrative(&["Black Triangle product"])).await;
    assert!(blocked.result.is_blocked());

    let passed = handler.handle(narrative(&["fatal outcomes in trials"])).await;
    assert!(passed.result.is_success());
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn backend_self_block_is_reported_as_blocked() {
    let provider = MockAIProvider::new().with_response(
        r#"{"blocked": true, "reason": "Case narrative detected", "next_step": "Route to PV"}"#,
    );

    let outcome = handler_with(&provider).handle(narrative(&["MOA"])).await;

    assert_eq!(
        outcome.result,
        GenerationResult::blocked(vec!["Case narrative detected".into()], "Route to PV")
    );
    assert_eq!(provider.call_count(), 1);
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn unparseable_reply_keeps_bounded_raw_text() {
    let reply = "I'm sorry, I can't produce that. ".repeat(500);
    let provider = MockAIProvider::new().with_response(reply.clone());

    let outcome = handler_with(&provider).handle(narrative(&["MOA"])).await;

    match outcome.result {
        GenerationResult::Error { kind, raw, .. } => {
            assert_eq!(kind, FailureKind::ParseFailure);
            let raw = raw.unwrap();
            assert_eq!(raw.chars().count(), 4000);
            assert!(reply.starts_with(&raw));
        }
        other => panic!("expected ParseFailure, got {other:?}"),
    }
}

#[tokio::test]
async fn backend_failures_are_terminal_and_not_retried() {
    let provider = MockAIProvider::new()
        .with_error(MockError::Timeout { timeout_secs: 60 })
        .with_response("{}");

    let outcome = handler_with(&provider).handle(narrative(&["MOA"])).await;

    assert!(matches!(
        outcome.result,
        GenerationResult::Error { kind: FailureKind::BackendFailure, .. }
    ));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn missing_credential_is_its_own_failure() {
    let provider = MockAIProvider::new().with_error(MockError::CredentialMissing);

    let outcome = handler_with(&provider).handle(narrative(&["MOA"])).await;

    assert_eq!(
        outcome.result,
        GenerationResult::error(FailureKind::CredentialMissing, "credential unavailable")
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn independent_requests_run_concurrently() {
    let provider = MockAIProvider::new().with_delay(Duration::from_millis(300));
    let handler = Arc::new(handler_with(&provider));
    let started = Instant::now();

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let handler = Arc::clone(&handler);
            let summary = format!("MOA summary {i}");
            tokio::spawn(async move { handler.handle(narrative(&[summary.as_str()])).await })
        })
        .collect();

    let mut ids = Vec::new();
    for task in tasks {
        let outcome = task.await.unwrap();
        assert!(outcome.result.is_success());
        ids.push(outcome.request_id);
    }

    // Eight sequential calls would take 2.4s
    assert!(started.elapsed() < Duration::from_millis(1500));

    ids.sort_by_key(|id| *id.as_uuid());
    ids.dedup();
    assert_eq!(ids.len(), 8);
    assert_eq!(provider.call_count(), 8);
}

#[test]
fn builtin_classifier_passes_empty_input() {
    let verdict = ContentClassifier::builtin().classify("");
    assert!(!verdict.is_blocked());
    assert!(verdict.reasons().is_empty());
}
