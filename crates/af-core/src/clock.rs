// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Clock abstraction for testable time handling.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Opaque millisecond timestamp, injected everywhere the domain needs "now".
pub type Timestamp = u64;

/// A clock that provides the current time. Injected so the domain core
/// never calls `SystemTime::now()` directly.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> Timestamp;
}

/// Real system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> Timestamp {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Fake clock for testing with controllable, monotonically-advancing time.
#[derive(Debug, Clone)]
pub struct FakeClock {
    now_ms: Arc<Mutex<u64>>,
}

impl FakeClock {
    pub fn new(start_ms: u64) -> Self {
        Self { now_ms: Arc::new(Mutex::new(start_ms)) }
    }

    /// Advance the clock by the given duration.
    pub fn advance(&self, d: Duration) {
        *self.now_ms.lock() += d.as_millis() as u64;
    }

    /// Set the clock to an explicit epoch-millis value.
    pub fn set_ms(&self, ms: u64) {
        *self.now_ms.lock() = ms;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new(1_700_000_000_000)
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> Timestamp {
        *self.now_ms.lock()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
