// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Capability interfaces for every external collaborator (§6, §9).
//!
//! The core depends only on these named traits — never on a concrete
//! database, HTTP client, or AI SDK. Dynamic dispatch / duck-typed
//! providers become explicit capability interfaces (§9).

use crate::decision::Snapshot;
use crate::draft::{ConflictLogEntry, Draft, Section};
use crate::error::DomainResult;
use crate::event::ProviderEvent;
use crate::ids::{DocumentId, PromptId, SectionId, SessionId};
use crate::prompt::{Prompt, PromptTemplate, Session};
use crate::proposal::Proposal;
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Opaque persistence capability. The core never constructs SQL; all
/// transactional atomicity for a single call is the Repository's
/// responsibility (§6, §9 Open Question).
#[async_trait]
pub trait Repository: Send + Sync {
    async fn create_session_with_prompts(
        &self,
        session: Session,
        prompts: Vec<Prompt>,
    ) -> DomainResult<()>;

    async fn update_prompt(&self, prompt: Prompt) -> DomainResult<()>;

    async fn get_prompt_with_session(
        &self,
        prompt_id: &PromptId,
    ) -> DomainResult<Option<(Prompt, Session)>>;

    async fn list_prompts(&self, session_id: &SessionId) -> DomainResult<Vec<Prompt>>;

    async fn get_session_with_prompts(
        &self,
        session_id: &SessionId,
    ) -> DomainResult<Option<(Session, Vec<Prompt>)>>;

    async fn find_session_by_id(&self, session_id: &SessionId) -> DomainResult<Option<Session>>;

    async fn update_session_metadata(&self, session: Session) -> DomainResult<()>;

    async fn create_proposal(&self, proposal: Proposal) -> DomainResult<()>;

    async fn list_proposals(&self, session_id: &SessionId) -> DomainResult<Vec<Proposal>>;

    async fn get_section(&self, section_id: &SectionId) -> DomainResult<Option<Section>>;

    async fn get_draft(&self, section_id: &SectionId) -> DomainResult<Option<Draft>>;

    async fn update_draft(&self, draft: Draft) -> DomainResult<()>;

    async fn append_conflict_log(&self, entry: ConflictLogEntry) -> DomainResult<()>;
}

/// Blanket impl so a Repository can be shared behind a reference — e.g. a
/// single `MemoryRepository` handed to both the Assumption Session Service
/// and the Draft Conflict Service without an `Arc`.
#[async_trait]
impl<T: Repository + ?Sized> Repository for &T {
    async fn create_session_with_prompts(&self, session: Session, prompts: Vec<Prompt>) -> DomainResult<()> {
        (**self).create_session_with_prompts(session, prompts).await
    }

    async fn update_prompt(&self, prompt: Prompt) -> DomainResult<()> {
        (**self).update_prompt(prompt).await
    }

    async fn get_prompt_with_session(
        &self,
        prompt_id: &PromptId,
    ) -> DomainResult<Option<(Prompt, Session)>> {
        (**self).get_prompt_with_session(prompt_id).await
    }

    async fn list_prompts(&self, session_id: &SessionId) -> DomainResult<Vec<Prompt>> {
        (**self).list_prompts(session_id).await
    }

    async fn get_session_with_prompts(
        &self,
        session_id: &SessionId,
    ) -> DomainResult<Option<(Session, Vec<Prompt>)>> {
        (**self).get_session_with_prompts(session_id).await
    }

    async fn find_session_by_id(&self, session_id: &SessionId) -> DomainResult<Option<Session>> {
        (**self).find_session_by_id(session_id).await
    }

    async fn update_session_metadata(&self, session: Session) -> DomainResult<()> {
        (**self).update_session_metadata(session).await
    }

    async fn create_proposal(&self, proposal: Proposal) -> DomainResult<()> {
        (**self).create_proposal(proposal).await
    }

    async fn list_proposals(&self, session_id: &SessionId) -> DomainResult<Vec<Proposal>> {
        (**self).list_proposals(session_id).await
    }

    async fn get_section(&self, section_id: &SectionId) -> DomainResult<Option<Section>> {
        (**self).get_section(section_id).await
    }

    async fn get_draft(&self, section_id: &SectionId) -> DomainResult<Option<Draft>> {
        (**self).get_draft(section_id).await
    }

    async fn update_draft(&self, draft: Draft) -> DomainResult<()> {
        (**self).update_draft(draft).await
    }

    async fn append_conflict_log(&self, entry: ConflictLogEntry) -> DomainResult<()> {
        (**self).append_conflict_log(entry).await
    }
}

/// Decision Provider (§6). May fail or return `None`; the core tolerates
/// both (ProviderSoftFail, §7) — this trait's `Result` exists only to give
/// the caller something to log before downgrading to "no enforcement".
#[async_trait]
pub trait DecisionProvider: Send + Sync {
    async fn get_decision_snapshot(
        &self,
        document_id: &DocumentId,
        section_id: &SectionId,
    ) -> anyhow::Result<Option<Snapshot>>;
}

/// Prompt Template Provider (§6).
#[async_trait]
pub trait PromptTemplateProvider: Send + Sync {
    async fn get_prompts(
        &self,
        section_id: &SectionId,
        document_id: &DocumentId,
        template_version: &str,
    ) -> DomainResult<Vec<PromptTemplate>>;
}

/// Streaming Provider (§6). Each emitted progress event carries the
/// sequence number the provider obtained from the sequencer before
/// emitting; a provider unable to stream yields `ProviderEvent::Fallback`
/// events instead of failing the call (§7 StreamFault).
#[async_trait]
pub trait StreamingProvider: Send + Sync {
    async fn generate_events(
        &self,
        session_id: SessionId,
        prompt_id: PromptId,
        next_sequence: std::sync::Arc<dyn Fn() -> u64 + Send + Sync>,
    ) -> BoxStream<'static, ProviderEvent>;
}
