// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

use super::*;
use af_core::test_support as ts;

fn prompt() -> Prompt {
    ts::prompt("k", 0, vec![])
}

#[test]
fn answer_without_value_is_bad_request() {
    let err = apply_action(&prompt(), Action::Answer, ActionPayload::default(), 0).unwrap_err();
    assert!(matches!(err, DomainError::BadRequest(_)));
}

#[test]
fn answer_sets_status_and_clears_override() {
    let payload = ActionPayload { answer: Some("risk".into()), notes: Some("n".into()), override_justification: None };
    let mutation = apply_action(&prompt(), Action::Answer, payload, 0).unwrap();
    assert_eq!(mutation.status, PromptStatus::Answered);
    assert_eq!(mutation.answer_value.as_deref(), Some("risk"));
    assert_eq!(mutation.answer_notes.as_deref(), Some("n"));
    assert!(mutation.override_justification.is_none());
}

#[test]
fn defer_is_always_permitted_and_clears_answer() {
    let payload = ActionPayload { answer: Some("ignored".into()), notes: Some("later".into()), override_justification: None };
    let mutation = apply_action(&prompt(), Action::Defer, payload, 0).unwrap();
    assert_eq!(mutation.status, PromptStatus::Deferred);
    assert!(mutation.answer_value.is_none());
    assert_eq!(mutation.answer_notes.as_deref(), Some("later"));
}

#[test]
fn escalate_allocates_stable_assignee_and_descriptor() {
    let payload = ActionPayload { answer: None, notes: Some("please review".into()), override_justification: None };
    let mutation = apply_action(&prompt(), Action::Escalate, payload, 0).unwrap();
    assert_eq!(mutation.status, PromptStatus::Escalated);
    let descriptor = mutation.escalation.expect("escalation descriptor");
    assert!(!descriptor.assigned_to.is_empty());
    assert_eq!(descriptor.notes.as_deref(), Some("please review"));
}

#[test]
fn skip_override_without_justification_is_bad_request() {
    let err = apply_action(&prompt(), Action::SkipOverride, ActionPayload::default(), 0).unwrap_err();
    assert!(matches!(err, DomainError::BadRequest(_)));
}

#[test]
fn skip_override_with_justification_sets_status() {
    let payload = ActionPayload { answer: None, notes: None, override_justification: Some("Pending security review".into()) };
    let mutation = apply_action(&prompt(), Action::SkipOverride, payload, 0).unwrap();
    assert_eq!(mutation.status, PromptStatus::OverrideSkipped);
    assert_eq!(mutation.override_justification.as_deref(), Some("Pending security review"));
}
