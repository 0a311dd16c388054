// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

use super::*;
use af_core::{AnnouncementPriority, ProgressEvent, ProviderEvent, StatusEvent, StreamEvent, StreamStatus};
use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use std::time::Duration;

struct ScriptedProvider {
    event_count: u64,
}

#[async_trait]
impl StreamingProvider for ScriptedProvider {
    async fn generate_events(
        &self,
        _session_id: SessionId,
        _prompt_id: PromptId,
        next_sequence: Arc<dyn Fn() -> u64 + Send + Sync>,
    ) -> BoxStream<'static, ProviderEvent> {
        let count = self.event_count;
        stream::unfold(0u64, move |emitted| {
            let next_sequence = Arc::clone(&next_sequence);
            async move {
                if emitted >= count {
                    return None;
                }
                tokio::time::sleep(Duration::from_millis(1)).await;
                let event = ProgressEvent {
                    sequence: next_sequence(),
                    stage_label: "drafting".into(),
                    content_snippet: None,
                    delta_type: "text".into(),
                    announcement_priority: AnnouncementPriority::Polite,
                    elapsed_ms: 1,
                };
                Some((ProviderEvent::Progress(event), emitted + 1))
            }
        })
        .boxed()
    }
}

/// Emits a single `fallback_active` → `fallback_completed` pair and no
/// progress deltas, for exercising the sequencer's fallback bookkeeping.
struct FallbackProvider;

#[async_trait]
impl StreamingProvider for FallbackProvider {
    async fn generate_events(
        &self,
        _session_id: SessionId,
        _prompt_id: PromptId,
        _next_sequence: Arc<dyn Fn() -> u64 + Send + Sync>,
    ) -> BoxStream<'static, ProviderEvent> {
        stream::iter(vec![
            ProviderEvent::Fallback(StatusEvent {
                status: StreamStatus::FallbackActive,
                fallback_reason: Some("provider outage".to_string()),
                preserved_tokens_count: None,
                elapsed_ms: None,
                retry_attempted: Some(false),
            }),
            ProviderEvent::Fallback(StatusEvent::simple(StreamStatus::FallbackCompleted)),
        ])
        .boxed()
    }
}

fn coordinator(event_count: u64) -> Arc<StreamingCoordinator> {
    StreamingCoordinator::new(Arc::new(ScriptedProvider { event_count }))
}

#[tokio::test(flavor = "multi_thread")]
async fn first_session_starts_and_streams_immediately() {
    let coordinator = coordinator(2);
    let session_id = SessionId::new();
    let section_id = SectionId::new();
    let prompt_id = PromptId::new();

    coordinator.admit(session_id.clone(), section_id, prompt_id, 0);
    let mut rx = coordinator.subscribe(&session_id).expect("sequencer should exist for active session");

    let first = rx.recv().await.unwrap();
    let second = rx.recv().await.unwrap();
    assert_eq!(first.sequence(), Some(1));
    assert_eq!(second.sequence(), Some(2));
}

#[tokio::test(flavor = "multi_thread")]
async fn second_session_holds_until_first_completes() {
    let coordinator = coordinator(1);
    let section_id = SectionId::new();

    let active_session = SessionId::new();
    coordinator.admit(active_session.clone(), section_id.clone(), PromptId::new(), 0);

    let pending_session = SessionId::new();
    coordinator.admit(pending_session.clone(), section_id, PromptId::new(), 1);

    // pending session has a held sequencer with no events delivered yet.
    let mut pending_rx = coordinator.subscribe(&pending_session).expect("held sequencer should exist");
    assert!(pending_rx.try_recv().is_err());

    // Draining the active stream triggers completion, promoting the pending session.
    let mut active_rx = coordinator.subscribe(&active_session).expect("active sequencer should exist");
    let _ = active_rx.recv().await.unwrap();

    let promoted_event = pending_rx.recv().await.unwrap();
    assert_eq!(promoted_event.sequence(), Some(1));
}

#[tokio::test(flavor = "multi_thread")]
async fn replacing_a_pending_session_emits_replacement_event() {
    let coordinator = coordinator(5);
    let section_id = SectionId::new();

    coordinator.admit(SessionId::new(), section_id.clone(), PromptId::new(), 0);

    let first_pending = SessionId::new();
    coordinator.admit(first_pending.clone(), section_id.clone(), PromptId::new(), 1);
    let mut first_pending_rx = coordinator.subscribe(&first_pending).expect("sequencer should exist");

    coordinator.admit(SessionId::new(), section_id, PromptId::new(), 2);

    match first_pending_rx.recv().await.unwrap() {
        StreamEvent::Replacement(event) => assert_eq!(event.previous_session_id, first_pending),
        other => panic!("expected replacement event, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn cancel_releases_slot_and_promotes_pending() {
    let coordinator = coordinator(50);
    let section_id = SectionId::new();

    let active_session = SessionId::new();
    coordinator.admit(active_session.clone(), section_id.clone(), PromptId::new(), 0);
    let mut active_rx = coordinator.subscribe(&active_session).expect("active sequencer should exist");

    let pending_session = SessionId::new();
    coordinator.admit(pending_session.clone(), section_id.clone(), PromptId::new(), 1);
    let mut pending_rx = coordinator.subscribe(&pending_session).expect("held sequencer should exist");

    coordinator.cancel(active_session, section_id, "author canceled");

    assert!(matches!(active_rx.recv().await.unwrap(), StreamEvent::Status(_)));
    assert!(active_rx.recv().await.is_none());

    let promoted_event = pending_rx.recv().await.unwrap();
    assert_eq!(promoted_event.sequence(), Some(1));
}

#[tokio::test(flavor = "multi_thread")]
async fn natural_completion_emits_completed_status_before_closing() {
    let coordinator = coordinator(1);
    let session_id = SessionId::new();
    let section_id = SectionId::new();

    coordinator.admit(session_id.clone(), section_id, PromptId::new(), 0);
    let mut rx = coordinator.subscribe(&session_id).expect("active sequencer should exist");

    assert!(matches!(rx.recv().await.unwrap(), StreamEvent::Progress(_)));
    match rx.recv().await.unwrap() {
        StreamEvent::Status(status) => assert_eq!(status.status, StreamStatus::Completed),
        other => panic!("expected completed status, got {other:?}"),
    }
    assert!(rx.recv().await.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn fallback_events_pass_through_to_subscribers() {
    let coordinator = StreamingCoordinator::new(Arc::new(FallbackProvider));
    let session_id = SessionId::new();
    let section_id = SectionId::new();

    coordinator.admit(session_id.clone(), section_id, PromptId::new(), 0);
    let mut rx = coordinator.subscribe(&session_id).expect("active sequencer should exist");

    match rx.recv().await.unwrap() {
        StreamEvent::Status(status) => assert_eq!(status.status, StreamStatus::FallbackActive),
        other => panic!("expected fallback_active status, got {other:?}"),
    }
    match rx.recv().await.unwrap() {
        StreamEvent::Status(status) => assert_eq!(status.status, StreamStatus::FallbackCompleted),
        other => panic!("expected fallback_completed status, got {other:?}"),
    }
    match rx.recv().await.unwrap() {
        StreamEvent::Status(status) => assert_eq!(status.status, StreamStatus::Completed),
        other => panic!("expected completed status, got {other:?}"),
    }
}
