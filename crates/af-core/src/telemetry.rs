// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Telemetry Sink capability (§6).

use crate::ids::{SectionId, SessionId};

/// Named operations the core emits telemetry for (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryEvent {
    SessionLatencyMs,
    OverrideRecorded,
    DraftProposalGenerated,
    SessionCompleted,
    StreamingProgress,
}

impl TelemetryEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SessionLatencyMs => "session.latency_ms",
            Self::OverrideRecorded => "override.recorded",
            Self::DraftProposalGenerated => "draft_proposal.generated",
            Self::SessionCompleted => "session.completed",
            Self::StreamingProgress => "streaming.progress",
        }
    }
}

/// A structured telemetry record (§6).
#[derive(Debug, Clone)]
pub struct TelemetryRecord {
    pub event: TelemetryEvent,
    pub action: Option<String>,
    pub request_id: Option<String>,
    pub session_id: Option<SessionId>,
    pub section_id: Option<SectionId>,
    pub override_status: Option<String>,
    pub value: Option<f64>,
}

impl TelemetryRecord {
    pub fn new(event: TelemetryEvent) -> Self {
        Self {
            event,
            action: None,
            request_id: None,
            session_id: None,
            section_id: None,
            override_status: None,
            value: None,
        }
    }

    crate::setters! {
        option {
            action: String,
            request_id: String,
            override_status: String,
            session_id: SessionId,
            section_id: SectionId,
            value: f64,
        }
    }
}

/// Structured logger capability consumed by the engine (§6).
pub trait TelemetrySink: Send + Sync {
    fn record(&self, record: TelemetryRecord);
}
