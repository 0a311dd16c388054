// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! af-core: domain types, capability interfaces, and pure helpers for the
//! assumption resolution & streaming coordination core.

pub mod macros;

pub mod clock;
pub mod decision;
pub mod draft;
pub mod error;
pub mod event;
pub mod ids;
pub mod mutation;
pub mod ports;
pub mod prompt;
pub mod proposal;
pub mod stream;
pub mod telemetry;

pub use clock::{Clock, FakeClock, SystemClock, Timestamp};
pub use decision::{Decision, Snapshot};
pub use draft::{ConflictLogEntry, ConflictOutcome, ConflictState, Draft, SaveRequest, Section};
pub use error::{ConflictDetails, ConflictTag, DomainError, DomainResult};
pub use event::{
    AnnouncementPriority, EventBuffer, ProgressEvent, ProviderEvent, ReplacementEvent, StatusEvent,
    StreamEvent, StreamStatus,
};
pub use ids::{
    AssigneeId, DecisionId, DocumentId, DraftId, OptionId, PromptId, ProposalId, SectionId,
    SessionId, SnapshotId,
};
pub use mutation::{Action, ActionPayload, EscalationDescriptor, EscalationStatus, PendingMutation};
pub use ports::{DecisionProvider, PromptTemplateProvider, Repository, StreamingProvider};
pub use prompt::{
    AnswerValue, Prompt, PromptOption, PromptStatus, PromptTemplate, ResponseType, Session,
    SessionCounters, SessionStatus,
};
pub use proposal::{Proposal, ProposalRequest, ProposalSource, RationaleEntry};
pub use stream::{
    Activation, CancelOutcome, CompleteOutcome, Disposition, EnqueueOutcome, SectionSlot,
    SectionSlotView, SlotEntry,
};
pub use telemetry::{TelemetryEvent, TelemetryRecord, TelemetrySink};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
