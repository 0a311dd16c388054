// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Prompt and session types (§3 of the specification).

use crate::ids::{DecisionId, OptionId, PromptId, SectionId, SessionId};
use crate::Timestamp;
use serde::{Deserialize, Serialize};

/// How a prompt expects its answer to be shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    SingleSelect,
    MultiSelect,
    Text,
}

crate::simple_display! {
    ResponseType {
        SingleSelect => "single_select",
        MultiSelect => "multi_select",
        Text => "text",
    }
}

/// Lifecycle state of a single prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptStatus {
    Pending,
    Answered,
    Deferred,
    Escalated,
    OverrideSkipped,
}

crate::simple_display! {
    PromptStatus {
        Pending => "pending",
        Answered => "answered",
        Deferred => "deferred",
        Escalated => "escalated",
        OverrideSkipped => "override_skipped",
    }
}

/// An immutable, session-scoped answer choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptOption {
    pub id: OptionId,
    pub label: String,
    pub description: Option<String>,
    pub default_selected: bool,
}

impl PromptOption {
    pub fn new(id: OptionId, label: impl Into<String>) -> Self {
        Self { id, label: label.into(), description: None, default_selected: false }
    }
}

/// Resolved answer value, kept shape-typed internally; the wire/persisted
/// form for `multi_select` is the JSON-encoded ordered array of option ids
/// (§6), recovered via [`AnswerValue::from_wire`] / [`AnswerValue::to_wire`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    Text(String),
    Single(String),
    Multi(Vec<String>),
}

impl AnswerValue {
    /// Parse a raw wire answer for the given response type.
    ///
    /// For `multi_select`, attempts JSON array decoding first; on failure
    /// the whole string is treated as a single selection (§4.B.1).
    pub fn from_wire(response_type: ResponseType, raw: &str) -> Self {
        match response_type {
            ResponseType::Text => AnswerValue::Text(raw.trim().to_string()),
            ResponseType::MultiSelect => match serde_json::from_str::<Vec<String>>(raw) {
                Ok(items) => AnswerValue::Multi(
                    items.into_iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect(),
                ),
                Err(_) => {
                    let trimmed = raw.trim();
                    if trimmed.is_empty() {
                        AnswerValue::Multi(Vec::new())
                    } else {
                        AnswerValue::Multi(vec![trimmed.to_string()])
                    }
                }
            },
            ResponseType::SingleSelect => AnswerValue::Single(raw.trim().to_string()),
        }
    }

    /// Canonical wire encoding: JSON array for multi-select, plain string otherwise.
    pub fn to_wire(&self) -> String {
        match self {
            AnswerValue::Text(s) | AnswerValue::Single(s) => s.clone(),
            AnswerValue::Multi(items) => {
                serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Text(s) | AnswerValue::Single(s) => s.trim().is_empty(),
            AnswerValue::Multi(items) => items.is_empty(),
        }
    }
}

/// An author interview question, created with the session and mutated only
/// via the Prompt Strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub id: PromptId,
    pub template_key: String,
    pub heading: String,
    pub body: String,
    pub response_type: ResponseType,
    pub options: Vec<PromptOption>,
    pub priority: i64,
    pub status: PromptStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_justification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict_decision_id: Option<DecisionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict_resolved_at: Option<Timestamp>,
}

impl Prompt {
    /// Resolve the option with the given id or label (case-insensitive, §4.B.1).
    pub fn resolve_option(&self, id_or_label: &str) -> Option<&PromptOption> {
        let canonical = id_or_label.trim().to_lowercase();
        self.options.iter().find(|o| {
            o.id.as_str().to_lowercase() == canonical || o.label.trim().to_lowercase() == canonical
        })
    }
}

/// Template supplied by the Prompt Template Provider (§6), used to seed a
/// freshly-started session's prompts.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub template_key: String,
    pub heading: String,
    pub body: String,
    pub response_type: ResponseType,
    pub options: Vec<PromptOption>,
    /// `None` means "use insertion index" (§4 Prompt Template Provider).
    pub priority: Option<i64>,
}

/// Derived, always-recomputed counters (§3 invariant: a pure function of
/// the prompt set).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCounters {
    pub answered: u32,
    pub deferred: u32,
    pub escalated: u32,
    pub unresolved_overrides: u32,
}

impl SessionCounters {
    pub fn from_prompts(prompts: &[Prompt]) -> Self {
        let mut counters = Self::default();
        for p in prompts {
            match p.status {
                PromptStatus::Answered => counters.answered += 1,
                PromptStatus::Deferred => counters.deferred += 1,
                PromptStatus::Escalated => counters.escalated += 1,
                PromptStatus::OverrideSkipped => counters.unresolved_overrides += 1,
                PromptStatus::Pending => {}
            }
        }
        counters
    }
}

/// Session lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    AwaitingDraft,
    Drafting,
    Blocked,
    Ready,
}

crate::simple_display! {
    SessionStatus {
        InProgress => "in_progress",
        AwaitingDraft => "awaiting_draft",
        Drafting => "drafting",
        Blocked => "blocked",
        Ready => "ready",
    }
}

/// A stateful assumption-resolution interview bound to one section of one
/// document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: SessionId,
    pub section_id: SectionId,
    pub document_id: crate::ids::DocumentId,
    pub template_version: String,
    pub started_by: String,
    pub started_at: Timestamp,
    pub status: SessionStatus,
    pub summary_markdown: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_decision_snapshot_id: Option<crate::ids::SnapshotId>,
    pub counters: SessionCounters,
}

impl Session {
    pub fn unresolved_override_count(&self) -> u32 {
        self.counters.unresolved_overrides
    }
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
