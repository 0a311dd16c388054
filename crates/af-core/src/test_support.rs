// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Test builders shared across crates (gated behind `test-support`).

use crate::decision::{Decision, Snapshot};
use crate::ids::{DecisionId, DocumentId, OptionId, PromptId, SectionId, SessionId, SnapshotId};
use crate::prompt::{Prompt, PromptOption, PromptStatus, PromptTemplate, ResponseType, Session, SessionCounters, SessionStatus};

pub fn option(id: &str, label: &str) -> PromptOption {
    PromptOption::new(OptionId::from_string(id), label)
}

pub fn prompt_template(
    template_key: &str,
    response_type: ResponseType,
    options: Vec<PromptOption>,
    priority: Option<i64>,
) -> PromptTemplate {
    PromptTemplate {
        template_key: template_key.to_string(),
        heading: template_key.to_string(),
        body: format!("body for {template_key}"),
        response_type,
        options,
        priority,
    }
}

pub fn prompt(template_key: &str, priority: i64, options: Vec<PromptOption>) -> Prompt {
    Prompt {
        id: PromptId::new(),
        template_key: template_key.to_string(),
        heading: template_key.to_string(),
        body: format!("body for {template_key}"),
        response_type: ResponseType::SingleSelect,
        options,
        priority,
        status: PromptStatus::Pending,
        answer_value: None,
        answer_notes: None,
        override_justification: None,
        conflict_decision_id: None,
        conflict_resolved_at: None,
    }
}

pub fn session(section_id: SectionId, document_id: DocumentId) -> Session {
    Session {
        session_id: SessionId::new(),
        section_id,
        document_id,
        template_version: "v1".to_string(),
        started_by: "author-1".to_string(),
        started_at: 1_700_000_000_000,
        status: SessionStatus::InProgress,
        summary_markdown: String::new(),
        document_decision_snapshot_id: None,
        counters: SessionCounters::default(),
    }
}

pub fn decision(template_key: &str, allowed_option_ids: Vec<String>) -> Decision {
    Decision {
        id: DecisionId::new(),
        template_key: template_key.to_string(),
        response_type: ResponseType::SingleSelect,
        allowed_option_ids,
        allowed_answers: Vec::new(),
        value: None,
        status: "documented".to_string(),
    }
}

pub fn snapshot(decisions: Vec<Decision>) -> Snapshot {
    Snapshot { snapshot_id: SnapshotId::new(), decisions }
}
