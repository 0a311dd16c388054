// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Streaming Provider adapter (§6): emits a canned sequence of progress
//! events at a fixed cadence, standing in for a real AI drafting backend.

use std::sync::Arc;
use std::time::Duration;

use af_core::{
    AnnouncementPriority, ProviderEvent, PromptId, SessionId, StatusEvent, StreamStatus,
    StreamingProvider,
};
use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};

/// Emits `stage_count` progress events, each carrying the next sequence
/// number obtained from the sequencer, spaced `interval` apart.
pub struct ScriptedStreamingProvider {
    stage_count: u64,
    interval: Duration,
}

impl ScriptedStreamingProvider {
    pub fn new(stage_count: u64, interval: Duration) -> Self {
        Self { stage_count, interval }
    }
}

impl Default for ScriptedStreamingProvider {
    fn default() -> Self {
        Self::new(4, Duration::from_millis(150))
    }
}

#[async_trait]
impl StreamingProvider for ScriptedStreamingProvider {
    async fn generate_events(
        &self,
        _session_id: SessionId,
        _prompt_id: PromptId,
        next_sequence: Arc<dyn Fn() -> u64 + Send + Sync>,
    ) -> BoxStream<'static, ProviderEvent> {
        let stage_count = self.stage_count;
        let interval = self.interval;
        stream::unfold(0u64, move |emitted| {
            let next_sequence = Arc::clone(&next_sequence);
            async move {
                if emitted >= stage_count {
                    return None;
                }
                tokio::time::sleep(interval).await;
                let event = af_core::ProgressEvent {
                    sequence: next_sequence(),
                    stage_label: format!("stage-{}", emitted + 1),
                    content_snippet: Some(format!("drafting section content, stage {}", emitted + 1)),
                    delta_type: "text".to_string(),
                    announcement_priority: AnnouncementPriority::Polite,
                    elapsed_ms: interval.as_millis() as u64 * (emitted + 1),
                };
                Some((ProviderEvent::Progress(event), emitted + 1))
            }
        })
        .boxed()
    }
}

/// Stands in for a real AI drafting backend that cannot stream for this
/// invocation (provider outage, feature disabled for the tenant, etc.).
/// Immediately emits `fallback_active` followed by `fallback_completed`
/// (§6 wire contract, §7 StreamFault) and yields no progress deltas.
pub struct FallbackStreamingProvider {
    reason: String,
}

impl FallbackStreamingProvider {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[async_trait]
impl StreamingProvider for FallbackStreamingProvider {
    async fn generate_events(
        &self,
        _session_id: SessionId,
        _prompt_id: PromptId,
        _next_sequence: Arc<dyn Fn() -> u64 + Send + Sync>,
    ) -> BoxStream<'static, ProviderEvent> {
        let reason = self.reason.clone();
        stream::iter(vec![
            ProviderEvent::Fallback(StatusEvent {
                status: StreamStatus::FallbackActive,
                fallback_reason: Some(reason),
                preserved_tokens_count: None,
                elapsed_ms: None,
                retry_attempted: Some(false),
            }),
            ProviderEvent::Fallback(StatusEvent::simple(StreamStatus::FallbackCompleted)),
        ])
        .boxed()
    }
}

#[cfg(test)]
#[path = "streaming_provider_tests.rs"]
mod tests;
