// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Thin CLI driving the engine against the in-memory adapters (§6), for
//! manual exercising and demos. Each invocation is a fresh in-process run:
//! nothing here persists across processes.

use std::sync::Arc;
use std::time::Duration;

use af_adapters::{
    MemoryRepository, ScriptedStreamingProvider, StaticDecisionProvider, StaticPromptTemplateProvider,
    TracingTelemetrySink,
};
use af_core::{
    Action, ActionPayload, ConflictOutcome, Draft, DraftId, DocumentId, PromptOption, PromptTemplate,
    ProposalRequest, ResponseType, SaveRequest, Section, SectionId, SystemClock,
};
use af_engine::{AssumptionSessionService, DraftConflictService};
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

/// Section stream queue capacity: one active stream plus one pending slot
/// per section (§4.E). Fixed by the specification, exposed here only so the
/// value is visible rather than a buried literal.
const SECTION_STREAM_CAPACITY: (u32, u32) = (1, 1);

#[derive(Parser)]
#[command(name = "af", about = "Assumption Resolution & Streaming Coordination demo CLI")]
struct Cli {
    /// How long to wait for the Decision Provider before proceeding without
    /// enforcement data. The bundled `StaticDecisionProvider` always
    /// resolves immediately; this flag exists for deployments that plug in
    /// a slower real provider.
    #[arg(long, default_value_t = 2_000)]
    decision_provider_timeout_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full assumption-resolution workflow end to end against
    /// canned prompt templates: start a session, answer every prompt, then
    /// generate and list an AI proposal.
    Demo {
        /// Also wire a streaming provider and print the progress events
        /// emitted for the last-answered prompt.
        #[arg(long)]
        stream: bool,
    },
}

fn demo_templates() -> Vec<PromptTemplate> {
    vec![
        PromptTemplate {
            template_key: "audience".to_string(),
            heading: "Who is the primary audience?".to_string(),
            body: "Pick the audience this section should be written for.".to_string(),
            response_type: ResponseType::SingleSelect,
            options: vec![
                PromptOption::new(af_core::OptionId::from_string("internal"), "Internal team"),
                PromptOption::new(af_core::OptionId::from_string("external"), "External customers"),
            ],
            priority: Some(0),
        },
        PromptTemplate {
            template_key: "tone".to_string(),
            heading: "What tone should the section use?".to_string(),
            body: "Free-form description of the desired tone.".to_string(),
            response_type: ResponseType::Text,
            options: vec![],
            priority: Some(1),
        },
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    info!(
        decision_provider_timeout_ms = cli.decision_provider_timeout_ms,
        active_capacity = SECTION_STREAM_CAPACITY.0,
        pending_capacity = SECTION_STREAM_CAPACITY.1,
        "starting af-cli"
    );

    match cli.command {
        Command::Demo { stream } => run_demo(stream).await,
    }
}

async fn run_demo(stream: bool) -> Result<()> {
    let section_id = SectionId::new();
    let document_id = DocumentId::new();

    let templates = StaticPromptTemplateProvider::new();
    templates.set_templates(section_id.clone(), demo_templates());

    let repository = MemoryRepository::new();
    let mut service = AssumptionSessionService::new(
        &repository,
        StaticDecisionProvider::new(),
        templates,
        SystemClock,
        TracingTelemetrySink,
    );
    if stream {
        service = service.with_streaming_provider(Arc::new(ScriptedStreamingProvider::default()));
    }

    let outcome = service
        .start(section_id.clone(), document_id.clone(), "v1".to_string(), "demo-author".to_string())
        .await?;
    println!("started session {} with {} prompt(s)", outcome.session.session_id, outcome.prompts.len());

    let mut last_prompt_id = None;
    for prompt in &outcome.prompts {
        let payload = match prompt.response_type {
            ResponseType::SingleSelect => ActionPayload {
                answer: prompt.options.first().map(|o| o.id.as_str().to_string()),
                notes: None,
                override_justification: None,
            },
            ResponseType::Text => ActionPayload {
                answer: Some("a friendly, confident tone".to_string()),
                notes: None,
                override_justification: None,
            },
            ResponseType::MultiSelect => ActionPayload {
                answer: prompt.options.first().map(|o| format!("[\"{}\"]", o.id.as_str())),
                notes: None,
                override_justification: None,
            },
        };
        let view = service.respond_to_assumption(&prompt.id, Action::Answer, "demo-author", payload).await?;
        println!("  answered {} -> {}", view.prompt.heading, view.prompt.status);
        last_prompt_id = Some(prompt.id.clone());
    }

    if stream {
        if let Some(rx) = service.subscribe_events(&outcome.session.session_id) {
            print_events(rx).await;
        } else {
            println!("  (no event stream was started — streaming begins on the first answered prompt)");
        }
        let _ = last_prompt_id;
    }

    let proposal =
        service.create_proposal(&outcome.session.session_id, ProposalRequest::AiGenerate, "demo-author", None).await?;
    println!("\nproposal #{} ({}):\n{}", proposal.proposal_index, proposal.source, proposal.content_markdown);

    let proposals = service.list_proposals(&outcome.session.session_id).await?;
    println!("\n{} proposal(s) on record", proposals.len());

    run_draft_conflict_demo(&repository, &section_id).await?;

    Ok(())
}

/// Exercises the Conflict Resolver (§4.G) independently of the assumption
/// session lifecycle: seed an approved section that has moved ahead of a
/// draft's base version, then ask the Draft Conflict Service to save.
async fn run_draft_conflict_demo(repository: &MemoryRepository, section_id: &SectionId) -> Result<()> {
    repository.seed_section(Section {
        section_id: section_id.clone(),
        approved_version: 3,
        approved_content: "## Section\n\napproved content".to_string(),
    });
    repository.seed_draft(Draft {
        draft_id: DraftId::new(),
        section_id: section_id.clone(),
        draft_version: 1,
        draft_base_version: 1,
        conflict_state: af_core::ConflictState::Clean,
        conflict_reason: None,
        content_markdown: "draft in progress".to_string(),
        formatting_annotations: vec!["bold:0-12".to_string()],
    });

    let conflict_service = DraftConflictService::new(repository, SystemClock);
    let request = SaveRequest { draft_base_version: 1, draft_version: 1, approved_version: None, triggered_by: Some("save".to_string()) };
    match conflict_service.save(section_id, request).await? {
        Some(ConflictOutcome::RebaseRequired { rebased_draft, log_entry }) => {
            println!(
                "\ndraft save on section {} requires rebase: draftVersion={} detectedDuring={}",
                section_id, rebased_draft.draft_version, log_entry.detected_during
            );
        }
        Some(ConflictOutcome::Clean) => println!("\ndraft save on section {section_id} is clean"),
        Some(ConflictOutcome::Blocked) => println!("\ndraft save on section {section_id} is blocked"),
        None => println!("\nno draft record found for section {section_id}"),
    }

    Ok(())
}

async fn print_events(mut rx: tokio::sync::mpsc::UnboundedReceiver<af_core::StreamEvent>) {
    let deadline = tokio::time::sleep(Duration::from_secs(2));
    tokio::pin!(deadline);
    loop {
        tokio::select! {
            event = rx.recv() => {
                match event {
                    Some(event) => println!("  event: {event:?}"),
                    None => break,
                }
            }
            _ = &mut deadline => break,
        }
    }
}
