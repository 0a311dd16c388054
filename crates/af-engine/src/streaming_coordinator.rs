// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Glue between the Section Stream Queue (§4.E) and Event Sequencer (§4.F):
//! owns the provider handle and drives a session's provider stream from
//! admission through completion/promotion, independent of persistence.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use af_core::{Disposition, ProviderEvent, PromptId, SectionId, SessionId, StreamingProvider, Timestamp};
use futures::StreamExt;
use parking_lot::Mutex;

use crate::event_sequencer::EventSequencer;
use crate::stream_queue::{EnqueueRequest, StreamQueue};

pub struct StreamingCoordinator {
    provider: Arc<dyn StreamingProvider>,
    queue: StreamQueue,
    sequencers: Mutex<HashMap<SessionId, Arc<EventSequencer>>>,
    /// Section + prompt a held (pending) session will stream once promoted.
    held_work: Mutex<HashMap<SessionId, (SectionId, PromptId)>>,
}

impl StreamingCoordinator {
    pub fn new(provider: Arc<dyn StreamingProvider>) -> Arc<Self> {
        Arc::new(Self {
            provider,
            queue: StreamQueue::new(),
            sequencers: Mutex::new(HashMap::new()),
            held_work: Mutex::new(HashMap::new()),
        })
    }

    pub fn subscribe(&self, session_id: &SessionId) -> Option<tokio::sync::mpsc::UnboundedReceiver<af_core::StreamEvent>> {
        self.sequencers.lock().get(session_id).map(|seq| seq.subscribe())
    }

    /// Pause emission for a session's event stream on an author `defer`
    /// action (§4.F).
    pub fn defer(&self, session_id: &SessionId) {
        if let Some(sequencer) = self.sequencers.lock().get(session_id).cloned() {
            sequencer.defer();
        }
    }

    /// Resume emission for a session's event stream on the next `answer`
    /// action (§4.F).
    pub fn resume(&self, session_id: &SessionId) {
        if let Some(sequencer) = self.sequencers.lock().get(session_id).cloned() {
            sequencer.resume();
        }
    }

    fn sequencer_for(&self, session_id: &SessionId, held: bool) -> Arc<EventSequencer> {
        self.sequencers
            .lock()
            .entry(session_id.clone())
            .or_insert_with(|| Arc::new(EventSequencer::new(held)))
            .clone()
    }

    /// Admit a session into its section's stream slot, starting the
    /// provider stream immediately if a slot is free, or holding it for
    /// later promotion otherwise (§4.D "Streaming integration").
    pub fn admit(
        self: &Arc<Self>,
        session_id: SessionId,
        section_id: SectionId,
        prompt_id: PromptId,
        now: Timestamp,
    ) {
        let outcome = self.queue.enqueue(EnqueueRequest {
            session_id: session_id.clone(),
            section_id: section_id.clone(),
            enqueued_at: now,
        });

        if let Some(replaced) = outcome.replaced_session_id {
            if let Some(sequencer) = self.sequencers.lock().remove(&replaced) {
                sequencer.replace(replaced.clone(), None);
            }
            self.held_work.lock().remove(&replaced);
        }

        match outcome.disposition {
            Disposition::Pending => {
                self.sequencer_for(&session_id, true);
                self.held_work.lock().insert(session_id, (section_id, prompt_id));
            }
            Disposition::Started => {
                let sequencer = self.sequencer_for(&session_id, false);
                self.spawn_stream(session_id, section_id, prompt_id, sequencer);
            }
        }
    }

    /// Cooperative cancellation: release the section slot and terminate the
    /// session's event stream (§5: "cancellation flows in one direction").
    pub fn cancel(self: &Arc<Self>, session_id: SessionId, section_id: SectionId, reason: impl Into<String>) {
        let reason = reason.into();
        if let Some(sequencer) = self.sequencers.lock().remove(&session_id) {
            sequencer.cancel(reason.clone());
        }
        self.held_work.lock().remove(&session_id);

        let outcome = self.queue.cancel(&section_id, &session_id, &reason);
        if let Some(activation) = outcome.promoted {
            self.promote(activation.session_id, section_id);
        }
    }

    fn spawn_stream(
        self: &Arc<Self>,
        session_id: SessionId,
        section_id: SectionId,
        prompt_id: PromptId,
        sequencer: Arc<EventSequencer>,
    ) {
        let coordinator = Arc::clone(self);
        let provider = Arc::clone(&self.provider);
        tokio::spawn(async move {
            let counter = Arc::new(AtomicU64::new(1));
            let next_sequence: Arc<dyn Fn() -> u64 + Send + Sync> =
                Arc::new(move || counter.fetch_add(1, Ordering::SeqCst));

            let stream = provider.generate_events(session_id.clone(), prompt_id, next_sequence).await;
            tokio::pin!(stream);
            while let Some(event) = stream.next().await {
                match event {
                    ProviderEvent::Progress(progress) => sequencer.offer_progress(progress),
                    ProviderEvent::Fallback(status) => sequencer.offer_fallback(status),
                }
            }
            sequencer.complete();

            coordinator.complete(session_id, section_id);
        });
    }

    fn complete(self: &Arc<Self>, session_id: SessionId, section_id: SectionId) {
        self.sequencers.lock().remove(&session_id);
        let outcome = self.queue.complete(&section_id, &session_id);
        if let Some(activation) = outcome.activated {
            self.promote(activation.session_id, section_id);
        }
    }

    fn promote(self: &Arc<Self>, session_id: SessionId, section_id: SectionId) {
        let Some((_, prompt_id)) = self.held_work.lock().remove(&session_id) else { return };
        let sequencer = self.sequencer_for(&session_id, false);
        sequencer.promote();
        self.spawn_stream(session_id, section_id, prompt_id, sequencer);
    }
}

#[cfg(test)]
#[path = "streaming_coordinator_tests.rs"]
mod tests;
