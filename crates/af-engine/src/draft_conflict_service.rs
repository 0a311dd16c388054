// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Draft Conflict Service: the thin orchestration shell around the pure
//! Conflict Resolver (§4.G), persisting its outcome against the Repository.
//! Conflict checks on save flow through this independently of the
//! Assumption Session Service (§2 data flow).

use af_core::{Clock, ConflictOutcome, DomainError, DomainResult, Repository, SaveRequest, SectionId};

use crate::conflict_resolver;

/// Orchestrates a single section's draft-save conflict check end to end:
/// load section + draft, run the pure resolver, persist a rebase outcome.
pub struct DraftConflictService<R, C> {
    repository: R,
    clock: C,
}

impl<R, C> DraftConflictService<R, C>
where
    R: Repository,
    C: Clock,
{
    pub fn new(repository: R, clock: C) -> Self {
        Self { repository, clock }
    }

    /// `save(sectionId, draft, request)` (§4.G). Returns `None` when no
    /// draft record is found for the section — nothing is persisted in
    /// that case, matching the resolver's own "log a warning, do not
    /// persist" contract.
    pub async fn save(
        &self,
        section_id: &SectionId,
        request: SaveRequest,
    ) -> DomainResult<Option<ConflictOutcome>> {
        let section = self
            .repository
            .get_section(section_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("section {section_id} not found")))?;
        let draft = self.repository.get_draft(section_id).await?;

        let now = self.clock.now_ms();
        let outcome = conflict_resolver::resolve(&section, draft.as_ref(), &request, now);

        if let Some(ConflictOutcome::RebaseRequired { rebased_draft, log_entry }) = &outcome {
            self.repository.update_draft(rebased_draft.clone()).await?;
            self.repository.append_conflict_log(log_entry.clone()).await?;
        }

        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "draft_conflict_service_tests.rs"]
mod tests;
