// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

use super::*;
use af_core::test_support as ts;
use af_core::{PromptStatus, ResponseType, SessionCounters, SessionStatus};

fn session_with(counters: SessionCounters) -> Session {
    let mut session = ts::session(af_core::SectionId::new(), af_core::DocumentId::new());
    session.counters = counters;
    session
}

#[test]
fn all_reconciled_when_no_outstanding_counters() {
    let session = session_with(SessionCounters { answered: 2, ..Default::default() });
    let summary = render_summary(&session, &[]);
    assert!(summary.contains("- All prompts reconciled."));
}

#[test]
fn outstanding_items_lists_every_nonzero_counter() {
    let counters = SessionCounters { unresolved_overrides: 1, escalated: 2, deferred: 3, answered: 0 };
    let session = session_with(counters);
    let summary = render_summary(&session, &[]);
    assert!(summary.contains("1 override(s) awaiting resolution."));
    assert!(summary.contains("2 prompt(s) escalated."));
    assert!(summary.contains("3 prompt(s) deferred."));
    assert!(!summary.contains("All prompts reconciled."));
}

#[test]
fn prompts_rendered_in_priority_order() {
    let mut first = ts::prompt("a", 5, vec![]);
    first.heading = "Second Heading".to_string();
    let mut second = ts::prompt("b", 1, vec![]);
    second.heading = "First Heading".to_string();

    let session = session_with(SessionCounters::default());
    let summary = render_summary(&session, &[first, second]);

    let first_pos = summary.find("First Heading").unwrap();
    let second_pos = summary.find("Second Heading").unwrap();
    assert!(first_pos < second_pos);
}

#[test]
fn answer_resolution_single_select_resolves_label() {
    let options = vec![ts::option("risk", "Accept Risk")];
    let mut prompt = ts::prompt("k", 0, options);
    prompt.answer_value = Some("risk".to_string());
    assert_eq!(resolve_answer(&prompt), "Accept Risk");
}

#[test]
fn answer_resolution_multi_select_joins_labels_in_order() {
    let options = vec![ts::option("a", "Alpha"), ts::option("b", "Beta")];
    let mut prompt = ts::prompt("k", 0, options);
    prompt.response_type = ResponseType::MultiSelect;
    prompt.answer_value = Some(r#"["b","a"]"#.to_string());
    assert_eq!(resolve_answer(&prompt), "Beta, Alpha");
}

#[test]
fn answer_resolution_empty_is_not_provided() {
    let prompt = ts::prompt("k", 0, vec![]);
    assert_eq!(resolve_answer(&prompt), "Not provided");
}

#[test]
fn answer_resolution_text_is_trimmed() {
    let mut prompt = ts::prompt("k", 0, vec![]);
    prompt.response_type = ResponseType::Text;
    prompt.answer_value = Some("  hello  ".to_string());
    assert_eq!(resolve_answer(&prompt), "hello");
}

#[test]
fn ai_proposal_body_uses_override_note_for_skipped_prompts() {
    let mut prompt = ts::prompt("k", 0, vec![]);
    prompt.heading = "Security Baseline".to_string();
    prompt.status = PromptStatus::OverrideSkipped;
    prompt.override_justification = Some("Pending review".to_string());

    let body = render_ai_proposal_body(&[prompt]);
    assert!(body.starts_with("## AI Draft Proposal"));
    assert!(body.contains("**Security Baseline**: Pending review"));
}

#[test]
fn manual_proposal_body_falls_back_to_skeleton() {
    let mut prompt = ts::prompt("k", 0, vec![]);
    prompt.heading = "Integration Dependencies".to_string();

    let body = render_manual_proposal_body(&[prompt], None);
    assert!(body.starts_with("## Manual Draft Notes"));
    assert!(body.contains("- Integration Dependencies"));
}

#[test]
fn manual_proposal_body_prefers_caller_override() {
    let body = render_manual_proposal_body(&[], Some("custom content"));
    assert_eq!(body, "custom content");
}

#[test]
fn rationale_preserves_session_order_not_priority_order() {
    let mut first = ts::prompt("a", 5, vec![]);
    first.heading = "First In Session Order".to_string();
    let mut second = ts::prompt("b", 1, vec![]);
    second.heading = "Second In Session Order".to_string();

    let rationale = render_rationale(&[first.clone(), second.clone()]);
    assert_eq!(rationale.len(), 2);
    assert_eq!(rationale[0].assumption_id, first.id.to_string());
    assert!(rationale[0].summary.starts_with("First In Session Order"));
    assert_eq!(rationale[1].assumption_id, second.id.to_string());
}

#[test]
fn session_status_is_reflected_in_summary() {
    let mut session = session_with(SessionCounters::default());
    session.status = SessionStatus::Blocked;
    let summary = render_summary(&session, &[]);
    assert!(summary.contains("- Status: blocked"));
}
