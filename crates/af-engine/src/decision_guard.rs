// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Decision Guard (§4.B): validates a proposed mutation against the
//! document decision snapshot and classifies conflicts.

use af_core::{
    Action, AnswerValue, Decision, DomainError, DomainResult, PendingMutation, Prompt,
    ResponseType, Snapshot, Timestamp,
};

/// Apply the Decision Guard's rules to a pending mutation produced by the
/// Prompt Strategy.
///
/// `snapshot` is `None` when the Decision Provider failed or returned no
/// snapshot — soft-failed upstream per §4.B ("provider failure is logged
/// and treated as no enforcement"); this function never distinguishes
/// "no snapshot" from "snapshot with no matching decision".
pub fn guard(
    prompt: &Prompt,
    action: Action,
    mutation: PendingMutation,
    snapshot: Option<&Snapshot>,
    now: Timestamp,
) -> DomainResult<PendingMutation> {
    let decision = snapshot.and_then(|s| s.find_for_template(&prompt.template_key));

    match decision {
        None => Ok(match action {
            Action::Answer => mutation.clear_conflict(now),
            _ => mutation,
        }),
        Some(decision) => match action {
            Action::Answer => check_alignment(prompt, decision, mutation, now),
            Action::SkipOverride => Err(DomainError::decision_conflict(
                decision.id.to_string(),
                "a documented decision cannot be overridden",
            )),
            Action::Defer | Action::Escalate => Ok(mutation.with_conflict(decision.id.clone())),
        },
    }
}

fn check_alignment(
    prompt: &Prompt,
    decision: &Decision,
    mutation: PendingMutation,
    now: Timestamp,
) -> DomainResult<PendingMutation> {
    if decision.has_no_enforcement_data() {
        return Ok(mutation.clear_conflict(now));
    }

    let raw = mutation.answer_value.as_deref().unwrap_or_default();
    let parsed = AnswerValue::from_wire(prompt.response_type, raw);

    let aligned = match (&parsed, prompt.response_type) {
        (AnswerValue::Multi(items), ResponseType::MultiSelect) => {
            !items.is_empty() && items.iter().all(|item| matches(item, prompt, decision))
        }
        (AnswerValue::Single(value), ResponseType::SingleSelect)
        | (AnswerValue::Text(value), ResponseType::Text) => matches(value, prompt, decision),
        _ => false,
    };

    if aligned {
        Ok(mutation.clear_conflict(now))
    } else {
        Err(DomainError::decision_conflict(
            decision.id.to_string(),
            format!("answer does not align with recorded decision for '{}'", prompt.template_key),
        ))
    }
}

/// A single candidate value matches if its canonical form is in
/// `allowedOptionIds`, `allowedAnswers`, or the option label resolved from
/// its id (§4.B).
fn matches(value: &str, prompt: &Prompt, decision: &Decision) -> bool {
    let canonical = value.trim().to_lowercase();

    let resolved_label = prompt
        .resolve_option(value)
        .map(|opt| opt.label.trim().to_lowercase());

    let id_match = decision
        .allowed_option_ids
        .iter()
        .any(|id| id.trim().to_lowercase() == canonical);
    let answer_match = decision
        .allowed_answers
        .iter()
        .any(|a| a.trim().to_lowercase() == canonical);
    let label_match = resolved_label
        .as_deref()
        .map(|label| {
            decision.allowed_option_ids.iter().any(|id| id.trim().to_lowercase() == label)
                || decision.allowed_answers.iter().any(|a| a.trim().to_lowercase() == label)
        })
        .unwrap_or(false);

    id_match || answer_match || label_match
}

#[cfg(test)]
#[path = "decision_guard_tests.rs"]
mod tests;
