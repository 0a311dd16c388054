// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

use super::*;
use af_adapters::MemoryRepository;
use af_core::{ConflictState, Draft, DraftId, FakeClock, Section};

fn service(repo: &MemoryRepository) -> DraftConflictService<&MemoryRepository, FakeClock> {
    DraftConflictService::new(repo, FakeClock::new(100))
}

fn seed(repo: &MemoryRepository, approved_version: u64, draft_version: u64, draft_base_version: u64) -> SectionId {
    let section_id = SectionId::new();
    repo.seed_section(Section {
        section_id: section_id.clone(),
        approved_version,
        approved_content: "approved body".to_string(),
    });
    repo.seed_draft(Draft {
        draft_id: DraftId::new(),
        section_id: section_id.clone(),
        draft_version,
        draft_base_version,
        conflict_state: ConflictState::Clean,
        conflict_reason: None,
        content_markdown: "draft body".to_string(),
        formatting_annotations: vec!["bold:0-5".to_string()],
    });
    section_id
}

fn request(draft_base_version: u64, draft_version: u64, triggered_by: Option<&str>) -> SaveRequest {
    SaveRequest {
        draft_base_version,
        draft_version,
        approved_version: None,
        triggered_by: triggered_by.map(str::to_string),
    }
}

#[tokio::test]
async fn clean_save_does_not_touch_repository() {
    let repo = MemoryRepository::new();
    let section_id = seed(&repo, 5, 3, 5);
    let svc = service(&repo);

    let outcome = svc.save(&section_id, request(5, 3, None)).await.unwrap();
    assert!(matches!(outcome, Some(ConflictOutcome::Clean)));

    let draft = repo.get_draft(&section_id).await.unwrap().unwrap();
    assert_eq!(draft.draft_version, 3);
    assert_eq!(draft.conflict_state, ConflictState::Clean);
}

#[tokio::test]
async fn s8_rebase_required_persists_draft_and_conflict_log() {
    let repo = MemoryRepository::new();
    let section_id = seed(&repo, 5, 4, 4);
    let svc = service(&repo);

    let outcome = svc.save(&section_id, request(4, 4, Some("save"))).await.unwrap().unwrap();

    match outcome {
        ConflictOutcome::RebaseRequired { rebased_draft, log_entry } => {
            assert_eq!(rebased_draft.draft_version, 5);
            assert_eq!(rebased_draft.draft_base_version, 5);
            assert_eq!(rebased_draft.conflict_state, ConflictState::RebaseRequired);
            assert_eq!(rebased_draft.content_markdown, "approved body");
            assert_eq!(rebased_draft.formatting_annotations, vec!["bold:0-5".to_string()]);
            assert_eq!(log_entry.detected_during, "save");
        }
        other => panic!("expected rebase required, got {other:?}"),
    }

    let persisted = repo.get_draft(&section_id).await.unwrap().unwrap();
    assert_eq!(persisted.draft_version, 5);
    assert_eq!(persisted.conflict_state, ConflictState::RebaseRequired);
}

#[tokio::test]
async fn blocked_draft_short_circuits_without_persisting() {
    let repo = MemoryRepository::new();
    let section_id = SectionId::new();
    repo.seed_section(Section { section_id: section_id.clone(), approved_version: 5, approved_content: "x".into() });
    repo.seed_draft(Draft {
        draft_id: DraftId::new(),
        section_id: section_id.clone(),
        draft_version: 3,
        draft_base_version: 5,
        conflict_state: ConflictState::Blocked,
        conflict_reason: Some("manual hold".to_string()),
        content_markdown: "draft body".to_string(),
        formatting_annotations: vec![],
    });
    let svc = service(&repo);

    let outcome = svc.save(&section_id, request(5, 3, None)).await.unwrap();
    assert!(matches!(outcome, Some(ConflictOutcome::Blocked)));

    let draft = repo.get_draft(&section_id).await.unwrap().unwrap();
    assert_eq!(draft.draft_version, 3);
}

#[tokio::test]
async fn missing_draft_returns_none_without_persisting() {
    let repo = MemoryRepository::new();
    let section_id = SectionId::new();
    repo.seed_section(Section { section_id: section_id.clone(), approved_version: 5, approved_content: "x".into() });
    let svc = service(&repo);

    let outcome = svc.save(&section_id, request(5, 3, None)).await.unwrap();
    assert!(outcome.is_none());
    assert!(repo.get_draft(&section_id).await.unwrap().is_none());
}

#[tokio::test]
async fn unknown_section_is_not_found() {
    let repo = MemoryRepository::new();
    let svc = service(&repo);
    let err = svc.save(&SectionId::new(), request(5, 3, None)).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}
