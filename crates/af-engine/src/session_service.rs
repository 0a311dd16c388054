// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Assumption Session Service (§4.D): the orchestrator wiring the Prompt
//! Strategy, Decision Guard, Renderer, Section Stream Queue, and Event
//! Sequencer against the injected capability ports.

use std::collections::HashMap;
use std::sync::Arc;

use af_core::{
    Action, ActionPayload, Clock, DecisionProvider, DomainError, DomainResult, EscalationDescriptor,
    Prompt, PromptStatus, PromptTemplateProvider, Proposal, ProposalRequest, ProposalSource,
    RationaleEntry, Repository, Session, SessionCounters, SessionStatus, SnapshotId,
    StreamingProvider, TelemetryEvent, TelemetryRecord, TelemetrySink,
};
use af_core::{DocumentId, SectionId, SessionId};
use parking_lot::Mutex as SyncMutex;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{info, warn};

use crate::decision_guard;
use crate::prompt_strategy;
use crate::renderer;
use crate::streaming_coordinator::StreamingCoordinator;

/// Result of [`AssumptionSessionService::start`].
#[derive(Debug, Clone)]
pub struct StartOutcome {
    pub session: Session,
    pub prompts: Vec<Prompt>,
    pub overrides_open: u32,
    pub summary: String,
    pub decision_snapshot_id: Option<SnapshotId>,
}

/// Public view of a prompt returned by [`AssumptionSessionService::respond_to_assumption`].
#[derive(Debug, Clone)]
pub struct PromptView {
    pub prompt: Prompt,
    pub unresolved_override_count: u32,
    pub escalation: Option<EscalationDescriptor>,
}

/// Orchestrates the assumption-resolution workflow for one deployment.
///
/// Each session has a logical single-writer discipline (§5): mutations to
/// a given session's prompts, counters, and summary are serialised behind
/// a per-session `tokio::sync::Mutex`, while cross-session operations run
/// freely in parallel.
pub struct AssumptionSessionService<R, D, P, C, T> {
    repository: R,
    decision_provider: D,
    template_provider: P,
    clock: C,
    telemetry: T,
    streaming: Option<Arc<StreamingCoordinator>>,
    write_locks: SyncMutex<HashMap<SessionId, Arc<AsyncMutex<()>>>>,
}

impl<R, D, P, C, T> AssumptionSessionService<R, D, P, C, T>
where
    R: Repository,
    D: DecisionProvider,
    P: PromptTemplateProvider,
    C: Clock,
    T: TelemetrySink,
{
    pub fn new(repository: R, decision_provider: D, template_provider: P, clock: C, telemetry: T) -> Self {
        Self {
            repository,
            decision_provider,
            template_provider,
            clock,
            telemetry,
            streaming: None,
            write_locks: SyncMutex::new(HashMap::new()),
        }
    }

    pub fn with_streaming_provider(mut self, provider: Arc<dyn StreamingProvider>) -> Self {
        self.streaming = Some(StreamingCoordinator::new(provider));
        self
    }

    /// Subscribe to a session's event stream (§4.F). Returns `None` if no
    /// sequencer has been created for the session yet (streaming is not
    /// configured, or no answer has triggered one).
    pub fn subscribe_events(&self, session_id: &SessionId) -> Option<tokio::sync::mpsc::UnboundedReceiver<af_core::StreamEvent>> {
        self.streaming.as_ref()?.subscribe(session_id)
    }

    async fn lock_for(&self, session_id: &SessionId) -> Arc<AsyncMutex<()>> {
        let mut locks = self.write_locks.lock();
        locks.entry(session_id.clone()).or_insert_with(|| Arc::new(AsyncMutex::new(()))).clone()
    }

    /// `start(sectionId, documentId, templateVersion, startedBy)` (§4.D).
    pub async fn start(
        &self,
        section_id: SectionId,
        document_id: DocumentId,
        template_version: String,
        started_by: String,
    ) -> DomainResult<StartOutcome> {
        let started_at_wall = self.clock.now_ms();

        let templates = self
            .template_provider
            .get_prompts(&section_id, &document_id, &template_version)
            .await?;
        if templates.is_empty() {
            return Err(DomainError::BadRequest("cannot start a session with zero prompts".to_string()));
        }

        let snapshot = match self.decision_provider.get_decision_snapshot(&document_id, &section_id).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(%err, "decision provider failed; proceeding without enforcement");
                None
            }
        };
        let decision_snapshot_id = snapshot.as_ref().map(|s| s.snapshot_id.clone());

        let mut prompts: Vec<Prompt> = templates
            .into_iter()
            .enumerate()
            .map(|(index, template)| Prompt {
                id: af_core::PromptId::new(),
                template_key: template.template_key,
                heading: template.heading,
                body: template.body,
                response_type: template.response_type,
                options: template.options,
                priority: template.priority.unwrap_or(index as i64),
                status: PromptStatus::Pending,
                answer_value: None,
                answer_notes: None,
                override_justification: None,
                conflict_decision_id: None,
                conflict_resolved_at: None,
            })
            .collect();
        prompts.sort_by_key(|p| p.priority);

        let now = self.clock.now_ms();
        let counters = SessionCounters::from_prompts(&prompts);
        let mut session = Session {
            session_id: SessionId::new(),
            section_id,
            document_id,
            template_version,
            started_by,
            started_at: now,
            status: SessionStatus::InProgress,
            summary_markdown: String::new(),
            document_decision_snapshot_id: decision_snapshot_id.clone(),
            counters,
        };
        session.summary_markdown = renderer::render_summary(&session, &prompts);

        self.repository.create_session_with_prompts(session.clone(), prompts.clone()).await?;

        self.telemetry.record(
            TelemetryRecord::new(TelemetryEvent::SessionLatencyMs)
                .action("start")
                .session_id(session.session_id.clone())
                .section_id(session.section_id.clone())
                .value((self.clock.now_ms().saturating_sub(started_at_wall)) as f64),
        );

        Ok(StartOutcome {
            overrides_open: session.counters.unresolved_overrides,
            summary: session.summary_markdown.clone(),
            decision_snapshot_id,
            session,
            prompts,
        })
    }

    /// `respondToAssumption(assumptionId, action, actorId, payload)` (§4.D).
    pub async fn respond_to_assumption(
        &self,
        prompt_id: &af_core::PromptId,
        action: Action,
        actor_id: &str,
        payload: ActionPayload,
    ) -> DomainResult<PromptView> {
        let (mut prompt, mut session) = self
            .repository
            .get_prompt_with_session(prompt_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("prompt {prompt_id} not found")))?;

        let lock = self.lock_for(&session.session_id).await;
        let _guard = lock.lock().await;

        let now = self.clock.now_ms();

        let mutation = prompt_strategy::apply_action(&prompt, action, payload, now)?;

        let snapshot = match self
            .decision_provider
            .get_decision_snapshot(&session.document_id, &session.section_id)
            .await
        {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(%err, "decision provider failed; proceeding without enforcement");
                None
            }
        };
        let mutation = decision_guard::guard(&prompt, action, mutation, snapshot.as_ref(), now)?;

        prompt.status = mutation.status;
        prompt.answer_value = mutation.answer_value;
        prompt.answer_notes = mutation.answer_notes;
        prompt.override_justification = mutation.override_justification;
        prompt.conflict_decision_id = mutation.conflict_decision_id;
        prompt.conflict_resolved_at = mutation.conflict_resolved_at;

        self.repository.update_prompt(prompt.clone()).await?;

        let prompts = self.repository.list_prompts(&session.session_id).await?;
        session.counters = SessionCounters::from_prompts(&prompts);
        session.summary_markdown = renderer::render_summary(&session, &prompts);
        self.repository.update_session_metadata(session.clone()).await?;

        if prompt.status == PromptStatus::OverrideSkipped {
            self.telemetry.record(
                TelemetryRecord::new(TelemetryEvent::OverrideRecorded)
                    .action(action.to_string())
                    .session_id(session.session_id.clone())
                    .section_id(session.section_id.clone())
                    .override_status(prompt.status.to_string())
                    .request_id(actor_id.to_string()),
            );
        }

        if let Some(streaming) = &self.streaming {
            match action {
                Action::Answer if prompt.status == PromptStatus::Answered => {
                    let now = self.clock.now_ms();
                    streaming.resume(&session.session_id);
                    streaming.admit(session.session_id.clone(), session.section_id.clone(), prompt.id.clone(), now);
                }
                Action::Defer => streaming.defer(&session.session_id),
                _ => {}
            }
        }

        Ok(PromptView {
            unresolved_override_count: session.counters.unresolved_overrides,
            escalation: mutation.escalation,
            prompt,
        })
    }

    /// `createProposal(sessionId, source, actorId, draftOverride?)` (§4.D).
    pub async fn create_proposal(
        &self,
        session_id: &SessionId,
        source: ProposalRequest,
        _actor_id: &str,
        draft_override: Option<String>,
    ) -> DomainResult<Proposal> {
        let lock = self.lock_for(session_id).await;
        let _guard = lock.lock().await;

        let session = self
            .repository
            .find_session_by_id(session_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("session {session_id} not found")))?;

        if session.counters.unresolved_overrides > 0 {
            return Err(DomainError::overrides_block_submission(session.counters.unresolved_overrides));
        }

        let prompts = self.repository.list_prompts(session_id).await?;
        let rationale: Vec<RationaleEntry> = renderer::render_rationale(&prompts);

        let (content_markdown, ai_confidence) = match source {
            ProposalRequest::AiGenerate => (renderer::render_ai_proposal_body(&prompts), Some(1.0_f32)),
            ProposalRequest::ManualSubmit => {
                (renderer::render_manual_proposal_body(&prompts, draft_override.as_deref()), None)
            }
        };

        let existing = self.repository.list_proposals(session_id).await?;
        let proposal = Proposal {
            proposal_id: af_core::ProposalId::new(),
            session_id: session_id.clone(),
            proposal_index: existing.len() as u32,
            source: ProposalSource::from(source),
            content_markdown,
            rationale,
            created_at: self.clock.now_ms(),
            ai_confidence,
        };

        self.repository.create_proposal(proposal.clone()).await?;

        self.telemetry.record(
            TelemetryRecord::new(TelemetryEvent::DraftProposalGenerated)
                .session_id(session_id.clone())
                .section_id(session.section_id.clone())
                .action(proposal.source.to_string()),
        );

        info!(session_id = %session_id, proposal_index = proposal.proposal_index, "proposal created");
        Ok(proposal)
    }

    /// `listProposals(sessionId)` (§4.D).
    pub async fn list_proposals(&self, session_id: &SessionId) -> DomainResult<Vec<Proposal>> {
        let mut proposals = self.repository.list_proposals(session_id).await?;
        proposals.sort_by_key(|p| p.proposal_index);
        Ok(proposals)
    }
}

#[cfg(test)]
#[path = "session_service_tests.rs"]
mod tests;
