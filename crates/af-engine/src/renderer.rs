// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Summary & Proposal Renderer (§4.C): deterministic markdown rendering
//! from session + prompt state. No I/O, no clock — every output is a pure
//! function of its inputs.

use af_core::{AnswerValue, Prompt, PromptStatus, RationaleEntry, Session};

/// Render the `## Assumption Summary` markdown for a session and its prompts.
///
/// `prompts` is expected in the order the caller wants to display (the
/// Assumption Session Service passes them sorted by `priority`, stable on
/// ties by insertion order — §4.A/§4.D).
pub fn render_summary(session: &Session, prompts: &[Prompt]) -> String {
    let counters = &session.counters;
    let mut out = String::new();

    out.push_str("## Assumption Summary\n\n");
    out.push_str(&format!("- Status: {}\n", session.status));
    out.push_str(&format!("- Overrides Open: {}\n", counters.unresolved_overrides));
    out.push_str(&format!("- Escalated: {}\n", counters.escalated));
    out.push_str(&format!("- Deferred: {}\n", counters.deferred));
    out.push_str(&format!("- Answered: {}\n", counters.answered));
    out.push('\n');

    out.push_str("### Outstanding Items\n\n");
    let mut any_outstanding = false;
    if counters.unresolved_overrides > 0 {
        out.push_str(&format!(
            "- {} override(s) awaiting resolution.\n",
            counters.unresolved_overrides
        ));
        any_outstanding = true;
    }
    if counters.escalated > 0 {
        out.push_str(&format!("- {} prompt(s) escalated.\n", counters.escalated));
        any_outstanding = true;
    }
    if counters.deferred > 0 {
        out.push_str(&format!("- {} prompt(s) deferred.\n", counters.deferred));
        any_outstanding = true;
    }
    if !any_outstanding {
        out.push_str("- All prompts reconciled.\n");
    }
    out.push('\n');

    out.push_str("### Prompts\n\n");
    let mut ordered: Vec<&Prompt> = prompts.iter().collect();
    ordered.sort_by_key(|p| p.priority);
    for prompt in ordered {
        render_prompt_bullet(&mut out, prompt);
    }

    out
}

fn render_prompt_bullet(out: &mut String, prompt: &Prompt) {
    out.push_str(&format!("- **{}**\n", prompt.heading));
    out.push_str(&format!("  - Status: {}\n", prompt.status));
    out.push_str(&format!("  - Answer: {}\n", resolve_answer(prompt)));
    if let Some(notes) = &prompt.answer_notes {
        out.push_str(&format!("  - Notes: {notes}\n"));
    }
    if let Some(justification) = &prompt.override_justification {
        out.push_str(&format!("  - Override: {justification}\n"));
    }
    match prompt.status {
        PromptStatus::Escalated => out.push_str("  - Escalated for review.\n"),
        PromptStatus::Deferred => out.push_str("  - Deferred for later resolution.\n"),
        _ => {}
    }
    if let Some(decision_id) = &prompt.conflict_decision_id {
        out.push_str(&format!("  - Conflict: conflictDecisionId={decision_id}\n"));
    }
}

/// Resolve a prompt's answer to display text (§4.C "Answer resolution").
///
/// Empty resolves to the literal `Not provided`.
pub fn resolve_answer(prompt: &Prompt) -> String {
    let Some(raw) = prompt.answer_value.as_deref() else {
        return "Not provided".to_string();
    };

    let resolved = match AnswerValue::from_wire(prompt.response_type, raw) {
        AnswerValue::Multi(items) => items
            .iter()
            .map(|item| resolve_label(prompt, item))
            .collect::<Vec<_>>()
            .join(", "),
        AnswerValue::Single(value) => resolve_label(prompt, &value),
        AnswerValue::Text(value) => value.trim().to_string(),
    };

    if resolved.trim().is_empty() {
        "Not provided".to_string()
    } else {
        resolved
    }
}

fn resolve_label(prompt: &Prompt, id_or_label: &str) -> String {
    prompt
        .resolve_option(id_or_label)
        .map(|opt| opt.label.clone())
        .unwrap_or_else(|| id_or_label.to_string())
}

/// Build the `## AI Draft Proposal` body (§4.C).
pub fn render_ai_proposal_body(prompts: &[Prompt]) -> String {
    let mut out = String::from("## AI Draft Proposal\n\n");
    for prompt in ordered_by_priority(prompts) {
        let detail = match prompt.status {
            PromptStatus::OverrideSkipped => prompt
                .override_justification
                .clone()
                .unwrap_or_else(|| "skipped".to_string()),
            PromptStatus::Answered => resolve_answer(prompt),
            other => other.to_string(),
        };
        out.push_str(&format!("- **{}**: {detail}\n", prompt.heading));
    }
    out
}

/// Build the `## Manual Draft Notes` skeleton when no override body is
/// supplied (§4.C).
pub fn render_manual_proposal_body(prompts: &[Prompt], draft_override: Option<&str>) -> String {
    if let Some(override_body) = draft_override {
        return override_body.to_string();
    }

    let mut out = String::from("## Manual Draft Notes\n\n");
    for prompt in ordered_by_priority(prompts) {
        out.push_str(&format!("- {}\n", prompt.heading));
    }
    out
}

/// Build the proposal rationale, one entry per prompt in session order
/// (§4.C: "for each prompt in session order").
pub fn render_rationale(prompts: &[Prompt]) -> Vec<RationaleEntry> {
    prompts
        .iter()
        .map(|prompt| RationaleEntry {
            assumption_id: prompt.id.to_string(),
            summary: format!("{}: {}", prompt.heading, resolve_answer(prompt)),
        })
        .collect()
}

fn ordered_by_priority(prompts: &[Prompt]) -> Vec<&Prompt> {
    let mut ordered: Vec<&Prompt> = prompts.iter().collect();
    ordered.sort_by_key(|p| p.priority);
    ordered
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
