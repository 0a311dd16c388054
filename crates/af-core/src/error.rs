// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Tagged domain errors (§7 of the specification).
//!
//! Pure-domain errors (Prompt Strategy, Decision Guard, Renderer, Conflict
//! Resolver) propagate with their tag unchanged. Infrastructure errors
//! (repository, decision provider) are either bubbled up as
//! [`DomainError::Infrastructure`] or explicitly softened by the caller
//! (the Decision Provider's failure mode is "softened to no enforcement",
//! never surfaced as an error — see `af-engine::decision_guard`).

use thiserror::Error;

/// Machine-readable conflict tag, carried in the wire error body alongside
/// `details`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictTag {
    DecisionConflict,
    OverridesBlockSubmission,
    NonMonotonicDraftVersion,
}

impl ConflictTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DecisionConflict => "decision_conflict",
            Self::OverridesBlockSubmission => "overrides_block_submission",
            Self::NonMonotonicDraftVersion => "non_monotonic_draft_version",
        }
    }
}

/// Structured detail payload for a [`DomainError::Conflict`].
#[derive(Debug, Clone, Default)]
pub struct ConflictDetails {
    pub decision_id: Option<String>,
    pub assumption_id: Option<String>,
    pub overrides_open: Option<u32>,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict ({}): {}", .tag.as_str(), .details.message)]
    Conflict { tag: ConflictTag, details: ConflictDetails },

    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("stream fault: {0}")]
    StreamFault(String),

    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::NotFound(_) => 404,
            Self::Conflict { .. } => 409,
            Self::PreconditionFailed(_) => 412,
            Self::StreamFault(_) => 500,
            Self::Infrastructure(_) => 502,
        }
    }

    pub fn status_tag(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::NotFound(_) => "not_found",
            Self::Conflict { tag, .. } => tag.as_str(),
            Self::PreconditionFailed(_) => "blocked",
            Self::StreamFault(_) => "stream_fault",
            Self::Infrastructure(_) => "infrastructure_error",
        }
    }

    pub fn decision_conflict(decision_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conflict {
            tag: ConflictTag::DecisionConflict,
            details: ConflictDetails {
                decision_id: Some(decision_id.into()),
                message: message.into(),
                ..Default::default()
            },
        }
    }

    pub fn overrides_block_submission(overrides_open: u32) -> Self {
        Self::Conflict {
            tag: ConflictTag::OverridesBlockSubmission,
            details: ConflictDetails {
                overrides_open: Some(overrides_open),
                message: format!("{overrides_open} unresolved override(s) block submission"),
                ..Default::default()
            },
        }
    }

    pub fn non_monotonic_draft_version(message: impl Into<String>) -> Self {
        Self::Conflict {
            tag: ConflictTag::NonMonotonicDraftVersion,
            details: ConflictDetails { message: message.into(), ..Default::default() },
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
