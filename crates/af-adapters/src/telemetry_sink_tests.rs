// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

use super::*;
use af_core::TelemetryEvent;

#[test]
fn tracing_sink_accepts_a_record_without_panicking() {
    let sink = TracingTelemetrySink;
    sink.record(TelemetryRecord::new(TelemetryEvent::SessionLatencyMs).action("start"));
}

#[test]
fn recording_sink_captures_records_in_order() {
    let sink = RecordingTelemetrySink::new();
    sink.record(TelemetryRecord::new(TelemetryEvent::SessionLatencyMs).action("start"));
    sink.record(TelemetryRecord::new(TelemetryEvent::DraftProposalGenerated).action("ai_generated"));

    let records = sink.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].event, TelemetryEvent::SessionLatencyMs);
    assert_eq!(records[1].action.as_deref(), Some("ai_generated"));
}
