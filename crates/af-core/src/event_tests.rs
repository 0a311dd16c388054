// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

use super::*;

fn progress(sequence: u64) -> ProgressEvent {
    ProgressEvent {
        sequence,
        stage_label: "drafting".into(),
        content_snippet: None,
        delta_type: "text".into(),
        announcement_priority: AnnouncementPriority::Polite,
        elapsed_ms: 10,
    }
}

#[test]
fn out_of_order_events_reorder_to_ascending_sequence() {
    let mut buffer = EventBuffer::new();
    assert!(buffer.offer(progress(2)));
    assert!(buffer.drain_ready().is_empty());
    assert!(buffer.offer(progress(1)));
    let drained = buffer.drain_ready();
    let sequences: Vec<u64> = drained.iter().map(|e| e.sequence).collect();
    assert_eq!(sequences, vec![1, 2]);
    assert_eq!(buffer.next_sequence_to_emit, 3);
}

#[test]
fn event_below_next_sequence_is_dropped() {
    let mut buffer = EventBuffer::new();
    buffer.offer(progress(1));
    buffer.drain_ready();
    assert!(!buffer.offer(progress(1)));
    assert!(buffer.buffered.is_empty());
}

#[test]
fn deferred_buffer_accumulates_without_emitting() {
    let mut buffer = EventBuffer::new();
    buffer.deferred = true;
    buffer.offer(progress(1));
    assert!(buffer.drain_ready().is_empty());
    buffer.deferred = false;
    let drained = buffer.drain_ready();
    assert_eq!(drained.len(), 1);
}

#[test]
fn held_for_promotion_flushes_in_order_on_promote() {
    let mut buffer = EventBuffer::new_held();
    buffer.offer(progress(2));
    buffer.offer(progress(1));
    assert!(buffer.drain_ready().is_empty());
    let flushed = buffer.promote();
    let sequences: Vec<u64> = flushed.iter().map(|e| e.sequence).collect();
    assert_eq!(sequences, vec![1, 2]);
}

mod buffer_proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    proptest! {
        // §3 invariant: no event with sequence < next_sequence_to_emit is
        // ever emitted, and emission order is strictly ascending, for any
        // arrival order (including duplicates and gaps).
        #[test]
        fn emission_is_strictly_increasing_and_at_most_once(
            arrivals in proptest::collection::vec(1u64..30, 0..60)
        ) {
            let mut buffer = EventBuffer::new();
            let mut emitted = Vec::new();
            for seq in &arrivals {
                buffer.offer(progress(*seq));
                emitted.extend(buffer.drain_ready().into_iter().map(|e| e.sequence));
            }

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
