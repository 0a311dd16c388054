// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Conflict Resolver (§4.G): detects whether a section draft can be saved
//! cleanly, needs a rebase, or is blocked.

use af_core::{ConflictLogEntry, ConflictOutcome, ConflictState, Draft, SaveRequest, Section, Timestamp};
use tracing::warn;

/// Resolve a draft save request against the section's approved state.
///
/// Returns `None` when no draft record exists — the teacher's convention
/// for "nothing to reconcile, log and move on" (§4.G: "if no draft record
/// is found, log a warning, do not persist").
pub fn resolve(
    section: &Section,
    draft: Option<&Draft>,
    request: &SaveRequest,
    now: Timestamp,
) -> Option<ConflictOutcome> {
    let Some(draft) = draft else {
        warn!(section_id = %section.section_id, "draft save requested with no draft record; skipping");
        return None;
    };

    if draft.conflict_state == ConflictState::Blocked {
        return Some(ConflictOutcome::Blocked);
    }

    if section.approved_version <= request.draft_base_version {
        return Some(ConflictOutcome::Clean);
    }

    let log_entry = ConflictLogEntry {
        section_id: section.section_id.clone(),
        detected_at: now,
        detected_during: request.triggered_by.clone().unwrap_or_else(|| "entry".to_string()),
        previous_draft_base_version: draft.draft_base_version,
        latest_approved_version: section.approved_version,
    };

    let next_version = draft.draft_version.max(request.draft_version) + 1;
    let rebased_draft = Draft {
        draft_id: draft.draft_id.clone(),
        section_id: section.section_id.clone(),
        draft_version: next_version,
        draft_base_version: section.approved_version,
        conflict_state: ConflictState::RebaseRequired,
        conflict_reason: Some(format!(
            "approved version {} advanced past draft base version {}",
            section.approved_version, request.draft_base_version
        )),
        content_markdown: section.approved_content.clone(),
        formatting_annotations: draft.formatting_annotations.clone(),
    };

    Some(ConflictOutcome::RebaseRequired { rebased_draft, log_entry })
}

#[cfg(test)]
#[path = "conflict_resolver_tests.rs"]
mod tests;
