// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Decision Provider adapter (§6). No concrete document-decision backend is
//! specified, so this is a configurable in-memory provider: good enough for
//! the CLI demo, and the default used by engine tests that need canned
//! decision snapshots rather than the always-`None` default.

use std::collections::HashMap;

use af_core::{DecisionProvider, DocumentId, SectionId, Snapshot};
use async_trait::async_trait;
use parking_lot::Mutex;

/// Canned Decision Provider keyed by `(document_id, section_id)`. Sections
/// with no registered snapshot resolve as "no enforcement data" (§4.B).
#[derive(Default)]
pub struct StaticDecisionProvider {
    snapshots: Mutex<HashMap<(DocumentId, SectionId), Snapshot>>,
}

impl StaticDecisionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_snapshot(&self, document_id: DocumentId, section_id: SectionId, snapshot: Snapshot) {
        self.snapshots.lock().insert((document_id, section_id), snapshot);
    }
}

#[async_trait]
impl DecisionProvider for StaticDecisionProvider {
    async fn get_decision_snapshot(
        &self,
        document_id: &DocumentId,
        section_id: &SectionId,
    ) -> anyhow::Result<Option<Snapshot>> {
        Ok(self.snapshots.lock().get(&(document_id.clone(), section_id.clone())).cloned())
    }
}

/// Always fails, for exercising the engine's soft-fail downgrade path
/// (§7 ProviderSoftFail).
#[cfg(any(test, feature = "test-support"))]
pub struct FailingDecisionProvider;

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl DecisionProvider for FailingDecisionProvider {
    async fn get_decision_snapshot(
        &self,
        _document_id: &DocumentId,
        _section_id: &SectionId,
    ) -> anyhow::Result<Option<Snapshot>> {
        anyhow::bail!("decision provider unavailable")
    }
}

#[cfg(test)]
#[path = "decision_provider_tests.rs"]
mod tests;
