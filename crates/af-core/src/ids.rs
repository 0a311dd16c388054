// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Identifier newtypes for every domain entity.

crate::define_id! {
    /// Unique identifier for an assumption session.
    pub struct SessionId("sess_");
}

crate::define_id! {
    /// Unique identifier for a section of a document.
    pub struct SectionId("sect_");
}

crate::define_id! {
    /// Unique identifier for a document.
    pub struct DocumentId("doc_");
}

crate::define_id! {
    /// Unique identifier for a prompt within a session.
    pub struct PromptId("prmt_");
}

crate::define_id! {
    /// Unique identifier for an option within a prompt.
    pub struct OptionId("opt_");
}

crate::define_id! {
    /// Unique identifier for a document-level decision.
    pub struct DecisionId("dcn_");
}

crate::define_id! {
    /// Unique identifier for a decision snapshot.
    pub struct SnapshotId("snap_");
}

crate::define_id! {
    /// Unique identifier for a draft proposal.
    pub struct ProposalId("prop_");
}

crate::define_id! {
    /// Unique identifier for a section draft.
    pub struct DraftId("draft_");
}

crate::define_id! {
    /// Opaque handle for a human assignee escalated to.
    pub struct AssigneeId("asgn_");
}
