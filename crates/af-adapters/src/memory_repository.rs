// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! In-memory Repository (§6), modeled on the teacher's
//! `MaterializedState`: plain `HashMap`s behind a single short critical
//! section, no SQL, no WAL. Suitable for the CLI demo and for engine
//! tests; a real deployment would swap this for a database-backed
//! implementation behind the same trait.

use std::collections::HashMap;

use af_core::{
    ConflictLogEntry, Draft, DomainError, DomainResult, Proposal, Prompt, PromptId, Repository,
    Section, SectionId, Session, SessionId,
};
use async_trait::async_trait;
use parking_lot::Mutex;

#[derive(Default)]
struct State {
    sessions: HashMap<SessionId, Session>,
    prompts: HashMap<PromptId, Prompt>,
    prompts_by_session: HashMap<SessionId, Vec<PromptId>>,
    prompt_session: HashMap<PromptId, SessionId>,
    proposals: HashMap<SessionId, Vec<Proposal>>,
    sections: HashMap<SectionId, Section>,
    drafts: HashMap<SectionId, Draft>,
    conflict_log: Vec<ConflictLogEntry>,
}

#[derive(Default)]
pub struct MemoryRepository {
    state: Mutex<State>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a section's approved state (test/demo convenience — the
    /// Repository trait has no section-authoring operation of its own).
    pub fn seed_section(&self, section: Section) {
        self.state.lock().sections.insert(section.section_id.clone(), section);
    }

    /// Seed a section's draft (test/demo convenience).
    pub fn seed_draft(&self, draft: Draft) {
        self.state.lock().drafts.insert(draft.section_id.clone(), draft);
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn create_session_with_prompts(&self, session: Session, prompts: Vec<Prompt>) -> DomainResult<()> {
        let mut state = self.state.lock();
        let session_id = session.session_id.clone();
        let prompt_ids: Vec<PromptId> = prompts.iter().map(|p| p.id.clone()).collect();
        for prompt in prompts {
            state.prompt_session.insert(prompt.id.clone(), session_id.clone());
            state.prompts.insert(prompt.id.clone(), prompt);
        }
        state.prompts_by_session.insert(session_id.clone(), prompt_ids);
        state.sessions.insert(session_id, session);
        Ok(())
    }

    async fn update_prompt(&self, prompt: Prompt) -> DomainResult<()> {
        let mut state = self.state.lock();
        if !state.prompts.contains_key(&prompt.id) {
            return Err(DomainError::NotFound(format!("prompt {} not found", prompt.id)));
        }
        state.prompts.insert(prompt.id.clone(), prompt);
        Ok(())
    }

    async fn get_prompt_with_session(&self, prompt_id: &PromptId) -> DomainResult<Option<(Prompt, Session)>> {
        let state = self.state.lock();
        let Some(prompt) = state.prompts.get(prompt_id).cloned() else { return Ok(None) };
        let Some(session_id) = state.prompt_session.get(prompt_id) else { return Ok(None) };
        let Some(session) = state.sessions.get(session_id).cloned() else { return Ok(None) };
        Ok(Some((prompt, session)))
    }

    async fn list_prompts(&self, session_id: &SessionId) -> DomainResult<Vec<Prompt>> {
        let state = self.state.lock();
        let ids = state.prompts_by_session.get(session_id).cloned().unwrap_or_default();
        Ok(ids.into_iter().filter_map(|id| state.prompts.get(&id).cloned()).collect())
    }

    async fn get_session_with_prompts(&self, session_id: &SessionId) -> DomainResult<Option<(Session, Vec<Prompt>)>> {
        let state = self.state.lock();
        let Some(session) = state.sessions.get(session_id).cloned() else { return Ok(None) };
        let ids = state.prompts_by_session.get(session_id).cloned().unwrap_or_default();
        let prompts = ids.into_iter().filter_map(|id| state.prompts.get(&id).cloned()).collect();
        Ok(Some((session, prompts)))
    }

    async fn find_session_by_id(&self, session_id: &SessionId) -> DomainResult<Option<Session>> {
        Ok(self.state.lock().sessions.get(session_id).cloned())
    }

    async fn update_session_metadata(&self, session: Session) -> DomainResult<()> {
        let mut state = self.state.lock();
        if !state.sessions.contains_key(&session.session_id) {
            return Err(DomainError::NotFound(format!("session {} not found", session.session_id)));
        }
        state.sessions.insert(session.session_id.clone(), session);
        Ok(())
    }

    async fn create_proposal(&self, proposal: Proposal) -> DomainResult<()> {
        let mut state = self.state.lock();
        state.proposals.entry(proposal.session_id.clone()).or_default().push(proposal);
        Ok(())
    }

    async fn list_proposals(&self, session_id: &SessionId) -> DomainResult<Vec<Proposal>> {
        Ok(self.state.lock().proposals.get(session_id).cloned().unwrap_or_default())
    }

    async fn get_section(&self, section_id: &SectionId) -> DomainResult<Option<Section>> {
        Ok(self.state.lock().sections.get(section_id).cloned())
    }

    async fn get_draft(&self, section_id: &SectionId) -> DomainResult<Option<Draft>> {
        Ok(self.state.lock().drafts.get(section_id).cloned())
    }

    async fn update_draft(&self, draft: Draft) -> DomainResult<()> {
        self.state.lock().drafts.insert(draft.section_id.clone(), draft);
        Ok(())
    }

    async fn append_conflict_log(&self, entry: ConflictLogEntry) -> DomainResult<()> {
        self.state.lock().conflict_log.push(entry);
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_repository_tests.rs"]
mod tests;
