// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! af-adapters: concrete implementations of af-core's capability ports
//! (§6) — in-memory persistence and canned providers suitable for the CLI
//! demo and for engine integration tests.

pub mod decision_provider;
pub mod memory_repository;
pub mod prompt_template_provider;
pub mod streaming_provider;
pub mod telemetry_sink;

pub use decision_provider::StaticDecisionProvider;
pub use memory_repository::MemoryRepository;
pub use prompt_template_provider::StaticPromptTemplateProvider;
pub use streaming_provider::{FallbackStreamingProvider, ScriptedStreamingProvider};
pub use telemetry_sink::TracingTelemetrySink;

#[cfg(any(test, feature = "test-support"))]
pub use decision_provider::FailingDecisionProvider;
#[cfg(any(test, feature = "test-support"))]
pub use telemetry_sink::RecordingTelemetrySink;
