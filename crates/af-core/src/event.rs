// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Streaming event types and the per-session event buffer (§3, §4.F, §6).

use crate::ids::SessionId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// ARIA-style priority hint carried on progress events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementPriority {
    Polite,
    Assertive,
}

/// Status values carried on injected `status` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamStatus {
    Streaming,
    Deferred,
    Resumed,
    Canceled,
    Completed,
    FallbackActive,
    FallbackCompleted,
    FallbackCanceled,
    FallbackFailed,
}

/// A provider-sourced progress delta. The provider obtains `sequence` from
/// the sequencer's `getNextSequence` callback before emitting (§6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub sequence: u64,
    pub stage_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_snippet: Option<String>,
    pub delta_type: String,
    pub announcement_priority: AnnouncementPriority,
    pub elapsed_ms: u64,
}

/// Service-injected status transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEvent {
    pub status: StreamStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preserved_tokens_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_attempted: Option<bool>,
}

impl StatusEvent {
    pub fn simple(status: StreamStatus) -> Self {
        Self {
            status,
            fallback_reason: None,
            preserved_tokens_count: None,
            elapsed_ms: None,
            retry_attempted: None,
        }
    }
}

/// Terminal notice that a pending session was evicted, or that the active
/// session was cancelled and (optionally) replaced by a promoted one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacementEvent {
    pub previous_session_id: SessionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promoted_session_id: Option<SessionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// One item yielded by a Streaming Provider (§6). Providers normally emit
/// `Progress` deltas; a provider that cannot stream, or that degrades
/// mid-stream, emits `Fallback` status events directly instead of
/// returning an `Err` — §7 StreamFault: "provider stream errors are
/// converted to status:{fallback_*} events; never propagate as thrown
/// errors to callers".
#[derive(Debug, Clone)]
pub enum ProviderEvent {
    Progress(ProgressEvent),
    Fallback(StatusEvent),
}

/// Everything a subscriber can receive from the sequencer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StreamEvent {
    #[serde(rename = "progress")]
    Progress(ProgressEvent),
    #[serde(rename = "status")]
    Status(StatusEvent),
    #[serde(rename = "replacement")]
    Replacement(ReplacementEvent),
}

impl StreamEvent {
    /// Ordering key. Status/replacement events are out-of-band (not part of
    /// the provider's sequence space) and always emit immediately; only
    /// `Progress` participates in the buffer/reorder discipline.
    pub fn sequence(&self) -> Option<u64> {
        match self {
            StreamEvent::Progress(p) => Some(p.sequence),
            _ => None,
        }
    }
}

/// Per-session buffering/reordering state (§3 invariant: no event with
/// `sequence < next_sequence_to_emit` is ever emitted; strictly ascending
/// emission order).
#[derive(Debug, Default)]
pub struct EventBuffer {
    pub next_sequence_to_emit: u64,
    pub buffered: BTreeMap<u64, ProgressEvent>,
    pub deferred: bool,
    /// True while the owning session sits in a section's pending slot;
    /// emission is held until promotion flushes the buffer (§4.F).
    pub held_for_promotion: bool,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self { next_sequence_to_emit: 1, buffered: BTreeMap::new(), deferred: false, held_for_promotion: false }
    }

    pub fn new_held() -> Self {
        let mut buf = Self::new();
        buf.held_for_promotion = true;
        buf
    }

    /// Insert an arriving progress event. Drops events whose sequence has
    /// already been emitted (§4.F emission rules).
    pub fn offer(&mut self, event: ProgressEvent) -> bool {
        if event.sequence < self.next_sequence_to_emit {
            return false;
        }
        self.buffered.insert(event.sequence, event);
        true
    }

    /// Drain every contiguously-ready event in ascending sequence order.
    /// Returns nothing while paused (`deferred`) or held for promotion.
    pub fn drain_ready(&mut self) -> Vec<ProgressEvent> {
        if self.deferred || self.held_for_promotion {
            return Vec::new();
        }
        let mut out = Vec::new();
        while let Some(event) = self.buffered.remove(&self.next_sequence_to_emit) {
            self.next_sequence_to_emit += 1;
            out.push(event);
        }
        out
    }

    /// Release the promotion hold, allowing buffered events to flush.
    pub fn promote(&mut self) -> Vec<ProgressEvent> {
        self.held_for_promotion = false;
        self.drain_ready()
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
