// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Telemetry Sink adapters (§6): a real `tracing`-backed sink, plus a
//! recording sink for assertions in tests.

use af_core::{TelemetryRecord, TelemetrySink};
use tracing::info;

/// Logs every record as a structured `tracing` event, mirroring the
/// teacher's structured-log-everything discipline.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTelemetrySink;

impl TelemetrySink for TracingTelemetrySink {
    fn record(&self, record: TelemetryRecord) {
        info!(
            event = record.event.as_str(),
            action = record.action.as_deref(),
            request_id = record.request_id.as_deref(),
            session_id = record.session_id.as_ref().map(|id| id.to_string()),
            section_id = record.section_id.as_ref().map(|id| id.to_string()),
            override_status = record.override_status.as_deref(),
            value = record.value,
            "telemetry"
        );
    }
}

#[cfg(any(test, feature = "test-support"))]
mod recording {
    use super::*;
    use parking_lot::Mutex;

    /// Captures every record into a `Vec` for test assertions.
    #[derive(Default)]
    pub struct RecordingTelemetrySink {
        records: Mutex<Vec<TelemetryRecord>>,
    }

    impl RecordingTelemetrySink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn records(&self) -> Vec<TelemetryRecord> {
            self.records.lock().clone()
        }
    }

    impl TelemetrySink for RecordingTelemetrySink {
        fn record(&self, record: TelemetryRecord) {
            self.records.lock().push(record);
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use recording::RecordingTelemetrySink;

#[cfg(test)]
#[path = "telemetry_sink_tests.rs"]
mod tests;
