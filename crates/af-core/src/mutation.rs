// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Author action types consumed by the Prompt Strategy and Decision Guard
//! (§4.A, §4.B).

use crate::ids::DecisionId;
use crate::prompt::PromptStatus;
use crate::Timestamp;
use serde::{Deserialize, Serialize};

/// An author-initiated action against a single prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Answer,
    Defer,
    Escalate,
    SkipOverride,
}

crate::simple_display! {
    Action {
        Answer => "answer",
        Defer => "defer",
        Escalate => "escalate",
        SkipOverride => "skip_override",
    }
}

/// Payload accompanying an [`Action`]. Unused fields for a given action are
/// simply ignored (e.g. `answer` is ignored for `defer`).
#[derive(Debug, Clone, Default)]
pub struct ActionPayload {
    pub answer: Option<String>,
    pub notes: Option<String>,
    pub override_justification: Option<String>,
}

/// Status of a freshly-allocated escalation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationStatus {
    Pending,
}

/// Returned to the caller when an `escalate` action is applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscalationDescriptor {
    pub assigned_to: String,
    pub status: EscalationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The Prompt Strategy's pure output: a proposed mutation to a prompt,
/// not yet validated against the Decision Guard or persisted.
#[derive(Debug, Clone)]
pub struct PendingMutation {
    pub status: PromptStatus,
    pub answer_value: Option<String>,
    pub answer_notes: Option<String>,
    pub override_justification: Option<String>,
    /// Set by the Decision Guard, not the Prompt Strategy.
    pub conflict_decision_id: Option<DecisionId>,
    pub conflict_resolved_at: Option<Timestamp>,
    pub escalation: Option<EscalationDescriptor>,
}

impl PendingMutation {
    pub fn clear_conflict(mut self, now: Timestamp) -> Self {
        self.conflict_decision_id = None;
        self.conflict_resolved_at = Some(now);
        self
    }

    pub fn with_conflict(mut self, decision_id: DecisionId) -> Self {
        self.conflict_decision_id = Some(decision_id);
        self.conflict_resolved_at = None;
        self
    }
}
