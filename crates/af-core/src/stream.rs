// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Section stream queue data types (§3, §4.E).

use crate::ids::{SectionId, SessionId};
use crate::Timestamp;

/// An admitted or waiting session in a section's stream slot.
#[derive(Debug, Clone)]
pub struct SlotEntry {
    pub session_id: SessionId,
    pub enqueued_at: Timestamp,
}

/// Per-section active/pending pair. At most one of each (§3 invariant).
#[derive(Debug, Clone, Default)]
pub struct SectionSlot {
    pub active: Option<SlotEntry>,
    pub pending: Option<SlotEntry>,
}

/// Read-only snapshot of one section's slot state.
#[derive(Debug, Clone)]
pub struct SectionSlotView {
    pub section_id: SectionId,
    pub active: Option<SlotEntry>,
    pub pending: Option<SlotEntry>,
}

/// Result of [`crate::ports`]-independent queue admission (engine-level,
/// re-exported here since it is part of the E/F contract other components
/// observe).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    Started,
    Pending,
}

#[derive(Debug, Clone)]
pub struct EnqueueOutcome {
    pub disposition: Disposition,
    pub concurrency_slot: Option<u8>,
    pub replaced_session_id: Option<SessionId>,
}

#[derive(Debug, Clone)]
pub struct Activation {
    pub session_id: SessionId,
    pub section_id: SectionId,
    pub concurrency_slot: u8,
}

#[derive(Debug, Clone, Default)]
pub struct CompleteOutcome {
    pub activated: Option<Activation>,
}

#[derive(Debug, Clone, Default)]
pub struct CancelOutcome {
    pub released: bool,
    pub promoted: Option<Activation>,
    pub reason: Option<String>,
}
