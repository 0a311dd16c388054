// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Section Stream Queue (§4.E): per-section admission with capacity one
//! active plus one pending slot, newest-pending-replaces-older-pending.

use std::collections::HashMap;

use af_core::{
    Activation, CancelOutcome, CompleteOutcome, Disposition, EnqueueOutcome, SectionId,
    SectionSlot, SectionSlotView, SessionId, SlotEntry, Timestamp,
};
use parking_lot::Mutex;

/// Request to admit a session into a section's stream slot.
#[derive(Debug, Clone)]
pub struct EnqueueRequest {
    pub session_id: SessionId,
    pub section_id: SectionId,
    pub enqueued_at: Timestamp,
}

/// Per-section slot map, guarded by a single short critical section
/// (§5: "the per-section slot map is protected by a short critical
/// section").
#[derive(Default)]
pub struct StreamQueue {
    slots: Mutex<HashMap<SectionId, SectionSlot>>,
}

impl StreamQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&self, request: EnqueueRequest) -> EnqueueOutcome {
        let entry = SlotEntry { session_id: request.session_id, enqueued_at: request.enqueued_at };
        let mut slots = self.slots.lock();
        let slot = slots.entry(request.section_id).or_default();

        if slot.active.is_none() {
            slot.active = Some(entry);
            EnqueueOutcome {
                disposition: Disposition::Started,
                concurrency_slot: Some(1),
                replaced_session_id: None,
            }
        } else if slot.pending.is_none() {
            slot.pending = Some(entry);
            EnqueueOutcome { disposition: Disposition::Pending, concurrency_slot: None, replaced_session_id: None }
        } else {
            let evicted = slot.pending.replace(entry);
            EnqueueOutcome {
                disposition: Disposition::Pending,
                concurrency_slot: None,
                replaced_session_id: evicted.map(|e| e.session_id),
            }
        }
    }

    /// Mark `session_id`'s active slot complete, promoting any pending
    /// session. Sections are never swept away once created; an empty
    /// `SectionSlot` simply sits idle, matching the teacher's
    /// never-shrink map convention for long-lived workspace state.
    pub fn complete(&self, section_id: &SectionId, session_id: &SessionId) -> CompleteOutcome {
        let mut slots = self.slots.lock();
        let Some(slot) = slots.get_mut(section_id) else {
            return CompleteOutcome::default();
        };

        let is_active = slot.active.as_ref().is_some_and(|a| &a.session_id == session_id);
        if !is_active {
            return CompleteOutcome::default();
        }
        slot.active = None;

        if let Some(promoted) = slot.pending.take() {
            slot.active = Some(promoted.clone());
            CompleteOutcome {
                activated: Some(Activation {
                    session_id: promoted.session_id,
                    section_id: section_id.clone(),
                    concurrency_slot: 1,
                }),
            }
        } else {
            CompleteOutcome::default()
        }
    }

    pub fn cancel(&self, section_id: &SectionId, session_id: &SessionId, reason: &str) -> CancelOutcome {
        let mut slots = self.slots.lock();
        let Some(slot) = slots.get_mut(section_id) else {
            return CancelOutcome::default();
        };

        if slot.pending.as_ref().is_some_and(|p| &p.session_id == session_id) {
            slot.pending = None;
            return CancelOutcome { released: true, promoted: None, reason: Some(reason.to_string()) };
        }

        if slot.active.as_ref().is_some_and(|a| &a.session_id == session_id) {
            slot.active = None;
            let promoted = slot.pending.take().map(|entry| {
                let activation = Activation {
                    session_id: entry.session_id.clone(),
                    section_id: section_id.clone(),
                    concurrency_slot: 1,
                };
                slot.active = Some(entry);
                activation
            });
            return CancelOutcome { released: true, promoted, reason: Some(reason.to_string()) };
        }

        CancelOutcome::default()
    }

    pub fn snapshot(&self, section_id: &SectionId) -> SectionSlotView {
        let slots = self.slots.lock();
        let slot = slots.get(section_id).cloned().unwrap_or_default();
        SectionSlotView { section_id: section_id.clone(), active: slot.active, pending: slot.pending }
    }
}

#[cfg(test)]
#[path = "stream_queue_tests.rs"]
mod tests;
