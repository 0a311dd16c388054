// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Event Sequencer (§4.F): per-session event buffering, reordering, and
//! fan-out to independent subscribers.

use std::sync::atomic::{AtomicBool, Ordering};

use af_core::{
    EventBuffer, ProgressEvent, ReplacementEvent, SessionId, StatusEvent, StreamEvent, StreamStatus,
};
use parking_lot::Mutex;
use tokio::sync::mpsc;

/// One subscriber's channel. Unbounded so a stalled subscriber never
/// blocks delivery to the others (§5: "independent per-subscriber
/// delivery").
type Subscriber = mpsc::UnboundedSender<StreamEvent>;

/// Owns one session's event buffer and subscriber list.
///
/// Created alongside the session; the Assumption Session Service keys a
/// map of these by `SessionId` (the buffer itself is private per session,
/// per §5).
pub struct EventSequencer {
    buffer: Mutex<EventBuffer>,
    subscribers: Mutex<Vec<Subscriber>>,
    /// Whether the provider is currently in a degraded fallback mode (§6
    /// Glossary "Fallback"): set on `fallback_active`, cleared on
    /// `fallback_completed`/`fallback_failed`. Read by `cancel` to choose
    /// between `canceled` and `fallback_canceled`.
    in_fallback: AtomicBool,
}

impl EventSequencer {
    /// `held` mirrors the stream queue's admission disposition: a session
    /// enqueued as `pending` starts held, and is flushed only on promotion
    /// (§4.E/§4.F).
    pub fn new(held: bool) -> Self {
        Self {
            buffer: Mutex::new(if held { EventBuffer::new_held() } else { EventBuffer::new() }),
            subscribers: Mutex::new(Vec::new()),
            in_fallback: AtomicBool::new(false),
        }
    }

    /// Register a new subscriber. Its channel receives every event emitted
    /// from this point forward, in ascending `sequence` order.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<StreamEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().push(tx);
        rx
    }

    /// Accept a provider-sourced progress event, buffering and emitting any
    /// newly-contiguous run.
    pub fn offer_progress(&self, event: ProgressEvent) {
        let ready = {
            let mut buffer = self.buffer.lock();
            if !buffer.offer(event) {
                return;
            }
            buffer.drain_ready()
        };
        for event in ready {
            self.broadcast(StreamEvent::Progress(event));
        }
    }

    /// Accept a provider-sourced fallback status event (§7 StreamFault).
    /// Fallback events are out-of-band — like `status`/`replacement`, they
    /// bypass the progress reorder buffer and are broadcast immediately.
    pub fn offer_fallback(&self, event: StatusEvent) {
        match event.status {
            StreamStatus::FallbackActive => self.in_fallback.store(true, Ordering::Relaxed),
            StreamStatus::FallbackCompleted | StreamStatus::FallbackFailed => {
                self.in_fallback.store(false, Ordering::Relaxed)
            }
            _ => {}
        }
        self.broadcast(StreamEvent::Status(event));
    }

    /// Terminal: inject a `status:{completed}` event for the natural end
    /// of the provider stream, then close every subscriber and discard the
    /// buffer. Distinct from `cancel`, which is an externally-triggered
    /// stop (§6 wire contract).
    pub fn complete(&self) {
        self.broadcast(StreamEvent::Status(StatusEvent::simple(StreamStatus::Completed)));
        self.close();
    }

    /// Inject a `status:{deferred}` event and pause emission (§4.F).
    pub fn defer(&self) {
        self.buffer.lock().deferred = true;
        self.broadcast(StreamEvent::Status(StatusEvent::simple(StreamStatus::Deferred)));
    }

    /// Inject a `status:{resumed}` event and resume emission, flushing
    /// whatever accumulated while paused.
    pub fn resume(&self) {
        let ready = {
            let mut buffer = self.buffer.lock();
            buffer.deferred = false;
            buffer.drain_ready()
        };
        self.broadcast(StreamEvent::Status(StatusEvent::simple(StreamStatus::Resumed)));
        for event in ready {
            self.broadcast(StreamEvent::Progress(event));
        }
    }

    /// Release the promotion hold, flushing whatever buffered while pending
    /// in the stream queue (§4.E activation callback).
    pub fn promote(&self) {
        let ready = self.buffer.lock().promote();
        for event in ready {
            self.broadcast(StreamEvent::Progress(event));
        }
    }

    /// Terminal: inject a `replacement` event, then close every subscriber
    /// and discard the buffer (§4.F).
    pub fn replace(&self, previous_session_id: SessionId, promoted_session_id: Option<SessionId>) {
        self.broadcast(StreamEvent::Replacement(ReplacementEvent {
            previous_session_id,
            promoted_session_id,
            reason: None,
        }));
        self.close();
    }

    /// Terminal: inject a `status:{canceled}` event (or `fallback_canceled`
    /// if the provider was mid-fallback), then close every subscriber and
    /// discard the buffer. Cancellation is cooperative — no further events
    /// for this session are ever emitted (§5).
    pub fn cancel(&self, reason: impl Into<String>) {
        let status = if self.in_fallback.load(Ordering::Relaxed) {
            StreamStatus::FallbackCanceled
        } else {
            StreamStatus::Canceled
        };
        self.broadcast(StreamEvent::Status(StatusEvent {
            status,
            fallback_reason: Some(reason.into()),
            preserved_tokens_count: None,
            elapsed_ms: None,
            retry_attempted: None,
        }));
        self.close();
    }

    fn close(&self) {
        self.buffer.lock().buffered.clear();
        self.subscribers.lock().clear();
    }

    fn broadcast(&self, event: StreamEvent) {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
#[path = "event_sequencer_tests.rs"]
mod tests;
