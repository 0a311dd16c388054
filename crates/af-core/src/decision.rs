// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Document decision snapshot types (§3, §4.B).

use crate::ids::{DecisionId, SnapshotId};
use crate::prompt::ResponseType;

/// A single previously-recorded document-level decision.
#[derive(Debug, Clone)]
pub struct Decision {
    pub id: DecisionId,
    pub template_key: String,
    pub response_type: ResponseType,
    pub allowed_option_ids: Vec<String>,
    pub allowed_answers: Vec<String>,
    pub value: Option<String>,
    pub status: String,
}

impl Decision {
    /// No enforcement data present: both allow-lists are empty (§4.B, §9
    /// Open Question — permissive by design, confirmed as "aligned").
    pub fn has_no_enforcement_data(&self) -> bool {
        self.allowed_option_ids.is_empty() && self.allowed_answers.is_empty()
    }
}

/// Read-only view of prior document-level decisions, supplied by the
/// Decision Provider.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub snapshot_id: SnapshotId,
    pub decisions: Vec<Decision>,
}

impl Snapshot {
    /// At most one decision governs a given `template_key`.
    pub fn find_for_template(&self, template_key: &str) -> Option<&Decision> {
        self.decisions.iter().find(|d| d.template_key == template_key)
    }
}
