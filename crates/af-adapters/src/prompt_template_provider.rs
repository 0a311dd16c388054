// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Quill Labs, Inc.

//! Prompt Template Provider adapter (§6): a configurable in-memory catalog
//! keyed by section, mirroring the teacher's `StaticDecisionProvider` shape.

use std::collections::HashMap;

use af_core::{DomainResult, PromptTemplate, PromptTemplateProvider, SectionId};
use async_trait::async_trait;
use parking_lot::Mutex;

/// Templates registered per section; `template_version` is accepted but not
/// used to select between catalogs (single-version deployments are the only
/// case this adapter needs to serve).
#[derive(Default)]
pub struct StaticPromptTemplateProvider {
    templates: Mutex<HashMap<SectionId, Vec<PromptTemplate>>>,
}

impl StaticPromptTemplateProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_templates(&self, section_id: SectionId, templates: Vec<PromptTemplate>) {
        self.templates.lock().insert(section_id, templates);
    }
}

#[async_trait]
impl PromptTemplateProvider for StaticPromptTemplateProvider {
    async fn get_prompts(
        &self,
        section_id: &SectionId,
        _document_id: &af_core::DocumentId,
        _template_version: &str,
    ) -> DomainResult<Vec<PromptTemplate>> {
        // An unregistered section resolves as "no templates"; the engine's
        // `start` turns an empty template set into a BadRequest rather than
        // this adapter inventing a NotFound distinction the port doesn't have.
        Ok(self.templates.lock().get(section_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "prompt_template_provider_tests.rs"]
mod tests;
