// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Proposal types (§3, §4.C, §4.D).

use crate::ids::{ProposalId, SessionId};
use crate::Timestamp;
use serde::{Deserialize, Serialize};

/// API-level request for which kind of proposal to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalRequest {
    AiGenerate,
    ManualSubmit,
}

/// Canonical persisted form of [`ProposalRequest`] (§6: wire uses
/// `ai_generate`/`manual_submit`, persisted as `ai_generated`/`manual_revision`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalSource {
    AiGenerated,
    ManualRevision,
}

crate::simple_display! {
    ProposalSource {
        AiGenerated => "ai_generated",
        ManualRevision => "manual_revision",
    }
}

impl From<ProposalRequest> for ProposalSource {
    fn from(request: ProposalRequest) -> Self {
        match request {
            ProposalRequest::AiGenerate => ProposalSource::AiGenerated,
            ProposalRequest::ManualSubmit => ProposalSource::ManualRevision,
        }
    }
}

/// One line of the proposal's rationale, tying a prompt back to a
/// human-readable justification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RationaleEntry {
    pub assumption_id: String,
    pub summary: String,
}

/// An immutable draft body generated from the current prompt state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    pub proposal_id: ProposalId,
    pub session_id: SessionId,
    pub proposal_index: u32,
    pub source: ProposalSource,
    pub content_markdown: String,
    pub rationale: Vec<RationaleEntry>,
    pub created_at: Timestamp,
    /// Present only for AI-generated proposals (§4.D step 4).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_confidence: Option<f32>,
}
