// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Prompt Strategy (§4.A): pure mapping from an author action to a
//! pending prompt mutation.

use af_core::{
    Action, ActionPayload, AssigneeId, DomainError, DomainResult, PendingMutation, Prompt,
    PromptStatus, Timestamp,
};

/// Apply an author action to a prompt, producing a pending mutation.
///
/// This function never touches the Decision Guard, the Repository, or the
/// clock beyond the `now` value already resolved by the caller — it is a
/// pure state-transition function, matching the teacher's `StepStatus`/
/// `DecisionSource` transition helpers.
pub fn apply_action(
    _prompt: &Prompt,
    action: Action,
    payload: ActionPayload,
    now: Timestamp,
) -> DomainResult<PendingMutation> {
    match action {
        Action::Answer => answer(payload),
        Action::Defer => Ok(defer(payload)),
        Action::Escalate => Ok(escalate(payload, now)),
        Action::SkipOverride => skip_override(payload),
    }
}

fn answer(payload: ActionPayload) -> DomainResult<PendingMutation> {
    let answer = payload
        .answer
        .filter(|a| !a.trim().is_empty())
        .ok_or_else(|| DomainError::BadRequest("answer is required".to_string()))?;

    Ok(PendingMutation {
        status: PromptStatus::Answered,
        answer_value: Some(answer),
        answer_notes: payload.notes,
        override_justification: None,
        conflict_decision_id: None,
        conflict_resolved_at: None,
        escalation: None,
    })
}

fn defer(payload: ActionPayload) -> PendingMutation {
    PendingMutation {
        status: PromptStatus::Deferred,
        answer_value: None,
        answer_notes: payload.notes,
        override_justification: None,
        conflict_decision_id: None,
        conflict_resolved_at: None,
        escalation: None,
    }
}

fn escalate(payload: ActionPayload, now: Timestamp) -> PendingMutation {
    // Opaque, stable-per-call assignee identifier (§9 Open Question: no
    // durability or later lookup is assumed).
    let assigned_to = AssigneeId::new().to_string();
    let _ = now;
    PendingMutation {
        status: PromptStatus::Escalated,
        answer_value: None,
        answer_notes: payload.notes.clone(),
        override_justification: None,
        conflict_decision_id: None,
        conflict_resolved_at: None,
        escalation: Some(af_core::EscalationDescriptor {
            assigned_to,
            status: af_core::EscalationStatus::Pending,
            notes: payload.notes,
        }),
    }
}

fn skip_override(payload: ActionPayload) -> DomainResult<PendingMutation> {
    let justification = payload
        .override_justification
        .filter(|j| !j.trim().is_empty())
        .ok_or_else(|| DomainError::BadRequest("overrideJustification is required".to_string()))?;

    Ok(PendingMutation {
        status: PromptStatus::OverrideSkipped,
        answer_value: None,
        answer_notes: None,
        override_justification: Some(justification),
        conflict_decision_id: None,
        conflict_resolved_at: None,
        escalation: None,
    })
}

#[cfg(test)]
#[path = "prompt_strategy_tests.rs"]
mod tests;
