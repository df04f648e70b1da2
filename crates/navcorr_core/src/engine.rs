//! Formatting engine facade.
//!
//! # Responsibility
//! - Compose geometry, citation and validation behind one configured entry
//!   point for renderers and the editing UI.
//! - Produce the primed per-paragraph layout renderers consume.
//!
//! # Invariants
//! - Renderers never count siblings themselves; every citation comes from here.
//! - Layout is recomputed from the sequence on every call.
//! - No physical units are produced; offsets stay abstract.

use crate::citation::{citation_for, citations, Citation};
use crate::config::EngineConfig;
use crate::editor::{EditorResult, MoveDirection, MoveOutcome, ParagraphDocument};
use crate::error::EngineResult;
use crate::geometry::{geometry_for, LevelGeometry};
use crate::model::paragraph::{Level, Paragraph, ParagraphId};
use crate::validate::{validate, ValidationBlocked, ValidationReport, Violation};
use log::{debug, warn};
use serde::Serialize;

/// Everything a renderer needs to place one paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParagraphLayout {
    pub id: ParagraphId,
    pub index: usize,
    pub level: Level,
    pub citation: Citation,
    pub geometry: LevelGeometry,
    /// Title after document-type casing.
    pub title: Option<String>,
    pub content: String,
}

/// Configured engine entry point.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormattingEngine {
    config: EngineConfig,
}

impl FormattingEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Citation for the paragraph at `index`.
    pub fn citation_for(&self, sequence: &[Paragraph], index: usize) -> EngineResult<Citation> {
        citation_for(sequence, index)
    }

    /// Geometry for `level` under the configured font convention.
    pub fn geometry_for(&self, level: Level) -> LevelGeometry {
        geometry_for(level, self.config.font)
    }

    /// Sibling-pairing report under the configured policy.
    pub fn validate(&self, sequence: &[Paragraph]) -> ValidationReport {
        let report = validate(sequence, self.config.validation_policy);
        if !report.is_clean() {
            warn!(
                "event=structure_check module=engine status=violations count={} policy={:?}",
                report.violations.len(),
                report.policy
            );
        }
        report
    }

    /// Gate for actions such as export: blocks only under the block policy.
    pub fn check_export(
        &self,
        sequence: &[Paragraph],
    ) -> Result<Vec<Violation>, ValidationBlocked> {
        self.validate(sequence).into_result()
    }

    /// Primed layout for every paragraph in order.
    pub fn layout(&self, sequence: &[Paragraph]) -> Vec<ParagraphLayout> {
        let title_case = self.config.document_type.title_case();
        let layout: Vec<ParagraphLayout> = sequence
            .iter()
            .zip(citations(sequence))
            .enumerate()
            .map(|(index, (paragraph, citation))| ParagraphLayout {
                id: paragraph.id,
                index,
                level: paragraph.level,
                citation,
                geometry: self.geometry_for(paragraph.level),
                title: paragraph.title.as_deref().map(|title| title_case.apply(title)),
                content: paragraph.content.clone(),
            })
            .collect();
        debug!(
            "event=layout module=engine status=ok paragraphs={} font={:?}",
            layout.len(),
            self.config.font
        );
        layout
    }

    /// Violations the document would have after removing `id`, without
    /// touching it. Lets callers surface new warnings before committing.
    pub fn preview_remove(
        &self,
        document: &ParagraphDocument,
        id: ParagraphId,
    ) -> EditorResult<ValidationReport> {
        let mut candidate = document.clone();
        candidate.remove(id)?;
        Ok(validate(candidate.paragraphs(), self.config.validation_policy))
    }

    /// Moves a paragraph applying the configured guards.
    pub fn move_paragraph(
        &self,
        document: &mut ParagraphDocument,
        id: ParagraphId,
        direction: MoveDirection,
    ) -> EditorResult<MoveOutcome> {
        document.move_paragraph(id, direction, self.config.move_options())
    }
}
