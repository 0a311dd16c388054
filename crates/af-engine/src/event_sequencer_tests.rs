// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

use super::*;
use af_core::AnnouncementPriority;

fn progress(sequence: u64) -> ProgressEvent {
    ProgressEvent {
        sequence,
        stage_label: "drafting".into(),
        content_snippet: None,
        delta_type: "text".into(),
        announcement_priority: AnnouncementPriority::Polite,
        elapsed_ms: 5,
    }
}

#[tokio::test]
async fn subscriber_receives_progress_in_order() {
    let sequencer = EventSequencer::new(false);
    let mut rx = sequencer.subscribe();

    sequencer.offer_progress(progress(2));
    sequencer.offer_progress(progress(1));

    let first = rx.recv().await.unwrap();
    let second = rx.recv().await.unwrap();
    assert_eq!(first.sequence(), Some(1));
    assert_eq!(second.sequence(), Some(2));
}

#[tokio::test]
async fn held_session_buffers_until_promote() {
    let sequencer = EventSequencer::new(true);
    let mut rx = sequencer.subscribe();

    sequencer.offer_progress(progress(1));
    sequencer.offer_progress(progress(2));
    assert!(rx.try_recv().is_err());

    sequencer.promote();
    let first = rx.recv().await.unwrap();
    let second = rx.recv().await.unwrap();
    assert_eq!(first.sequence(), Some(1));
    assert_eq!(second.sequence(), Some(2));
}

#[tokio::test]
async fn defer_then_resume_flushes_accumulated_events() {
    let sequencer = EventSequencer::new(false);
    let mut rx = sequencer.subscribe();

    sequencer.defer();
    sequencer.offer_progress(progress(1));
    assert!(matches!(rx.recv().await.unwrap(), StreamEvent::Status(_)));
    assert!(rx.try_recv().is_err());

    sequencer.resume();
    assert!(matches!(rx.recv().await.unwrap(), StreamEvent::Status(_)));
    let progress_event = rx.recv().await.unwrap();
    assert_eq!(progress_event.sequence(), Some(1));
}

#[tokio::test]
async fn cancel_closes_subscribers_after_terminal_event() {
    let sequencer = EventSequencer::new(false);
    let mut rx = sequencer.subscribe();

    sequencer.cancel("author canceled");
    assert!(matches!(rx.recv().await.unwrap(), StreamEvent::Status(_)));
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn replacement_delivers_previous_and_promoted_ids() {
    let sequencer = EventSequencer::new(false);
    let mut rx = sequencer.subscribe();
    let previous = af_core::SessionId::new();
    let promoted = af_core::SessionId::new();

    sequencer.replace(previous.clone(), Some(promoted.clone()));

    match rx.recv().await.unwrap() {
        StreamEvent::Replacement(event) => {
            assert_eq!(event.previous_session_id, previous);
            assert_eq!(event.promoted_session_id, Some(promoted));
        }
        other => panic!("expected replacement event, got {other:?}"),
    }
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn events_below_next_sequence_are_dropped_without_emission() {
    let sequencer = EventSequencer::new(false);
    let mut rx = sequencer.subscribe();

    sequencer.offer_progress(progress(1));
    rx.recv().await.unwrap();

    sequencer.offer_progress(progress(1));
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn natural_completion_emits_completed_then_closes() {
    let sequencer = EventSequencer::new(false);
    let mut rx = sequencer.subscribe();

    sequencer.complete();

    match rx.recv().await.unwrap() {
        StreamEvent::Status(status) => assert_eq!(status.status, StreamStatus::Completed),
        other => panic!("expected completed status, got {other:?}"),
    }
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn fallback_events_pass_through_unbuffered() {
    let sequencer = EventSequencer::new(false);
    let mut rx = sequencer.subscribe();

    sequencer.offer_fallback(StatusEvent {
        status: StreamStatus::FallbackActive,
        fallback_reason: Some("provider outage".to_string()),
        preserved_tokens_count: None,
        elapsed_ms: None,
        retry_attempted: Some(false),
    });

    match rx.recv().await.unwrap() {
        StreamEvent::Status(status) => {
            assert_eq!(status.status, StreamStatus::FallbackActive);
            assert_eq!(status.fallback_reason.as_deref(), Some("provider outage"));
        }
        other => panic!("expected fallback_active status, got {other:?}"),
    }
}

#[tokio::test]
async fn cancel_during_fallback_emits_fallback_canceled() {
    let sequencer = EventSequencer::new(false);
    let mut rx = sequencer.subscribe();

    sequencer.offer_fallback(StatusEvent::simple(StreamStatus::FallbackActive));
    rx.recv().await.unwrap();

    sequencer.cancel("author canceled");
    match rx.recv().await.unwrap() {
        StreamEvent::Status(status) => assert_eq!(status.status, StreamStatus::FallbackCanceled),
        other => panic!("expected fallback_canceled status, got {other:?}"),
    }
}

#[tokio::test]
async fn cancel_outside_fallback_emits_plain_canceled() {
    let sequencer = EventSequencer::new(false);
    let mut rx = sequencer.subscribe();

    sequencer.cancel("author canceled");
    match rx.recv().await.unwrap() {
        StreamEvent::Status(status) => assert_eq!(status.status, StreamStatus::Canceled),
        other => panic!("expected canceled status, got {other:?}"),
    }
}

#[tokio::test]
async fn fallback_completed_clears_fallback_state_for_subsequent_cancel() {
    let sequencer = EventSequencer::new(false);
    let mut rx = sequencer.subscribe();

    sequencer.offer_fallback(StatusEvent::simple(StreamStatus::FallbackActive));
    sequencer.offer_fallback(StatusEvent::simple(StreamStatus::FallbackCompleted));
    rx.recv().await.unwrap();
    rx.recv().await.unwrap();

    sequencer.cancel("author canceled");
    match rx.recv().await.unwrap() {
        StreamEvent::Status(status) => assert_eq!(status.status, StreamStatus::Canceled),
        other => panic!("expected canceled status, got {other:?}"),
    }
}

#[tokio::test]
async fn independent_subscribers_each_receive_full_sequence() {
    let sequencer = EventSequencer::new(false);
    let mut first = sequencer.subscribe();
    let mut second = sequencer.subscribe();

    sequencer.offer_progress(progress(1));

    assert_eq!(first.recv().await.unwrap().sequence(), Some(1));
    assert_eq!(second.recv().await.unwrap().sequence(), Some(1));
}

mod sequencer_proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    proptest! {
        // §3 invariant 3, exercised through the sequencer's own subscriber
        // channel rather than the bare buffer: whatever order progress
        // events arrive in, a subscriber only ever sees strictly increasing
        // sequences, each at most once.
        #[test]
        fn subscriber_sees_strictly_increasing_sequences_at_most_once(
            arrivals in proptest::collection::vec(1u64..30, 0..60)
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let emitted = rt.block_on(async {
                let sequencer = EventSequencer::new(false);
                let mut rx = sequencer.subscribe();

                for seq in &arrivals {
                    sequencer.offer_progress(progress(*seq));
                }

                let mut emitted = Vec::new();
                while let Ok(event) = rx.try_recv() {
                    if let Some(seq) = event.sequence() {
                        emitted.push(seq);
                    }
                }
                emitted
            });

            for window in emitted.windows(2) {
                prop_assert!(window[0] < window[1]);
            }

            let mut seen = HashSet::new();
            for seq in &emitted {
                prop_assert!(seen.insert(*seq), "sequence {} emitted more than once", seq);
            }
        }
    }
}
