// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Draft version conflict types (§3, §4.G).

use crate::ids::{DraftId, SectionId};
use crate::Timestamp;
use serde::{Deserialize, Serialize};

/// Conflict state of a section draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictState {
    Clean,
    RebaseRequired,
    Rebased,
    Blocked,
}

crate::simple_display! {
    ConflictState {
        Clean => "clean",
        RebaseRequired => "rebase_required",
        Rebased => "rebased",
        Blocked => "blocked",
    }
}

/// A versioned draft of a section's content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    pub draft_id: DraftId,
    pub section_id: SectionId,
    pub draft_version: u64,
    pub draft_base_version: u64,
    pub conflict_state: ConflictState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict_reason: Option<String>,
    pub content_markdown: String,
    #[serde(default)]
    pub formatting_annotations: Vec<String>,
}

/// The section's approved, authoritative state — what a draft's base
/// version is compared against.
#[derive(Debug, Clone)]
pub struct Section {
    pub section_id: SectionId,
    pub approved_version: u64,
    pub approved_content: String,
}

/// Persisted audit trail entry for a detected rebase requirement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictLogEntry {
    pub section_id: SectionId,
    pub detected_at: Timestamp,
    pub detected_during: String,
    pub previous_draft_base_version: u64,
    pub latest_approved_version: u64,
}

/// Input to the Conflict Resolver (§4.G).
#[derive(Debug, Clone)]
pub struct SaveRequest {
    pub draft_base_version: u64,
    pub draft_version: u64,
    pub approved_version: Option<u64>,
    pub triggered_by: Option<String>,
}

/// Outcome of a save conflict check.
#[derive(Debug, Clone)]
pub enum ConflictOutcome {
    Blocked,
    Clean,
    RebaseRequired { rebased_draft: Draft, log_entry: ConflictLogEntry },
}
