//! Paragraph tree editor.
//!
//! # Responsibility
//! - Provide insert, remove, move and content/title mutation over one owned
//!   flat paragraph sequence.
//! - Thread the paragraph id counter through the document value so separate
//!   documents never share ids.
//!
//! # Invariants
//! - A document always holds at least one paragraph.
//! - `next_id` is greater than every id ever issued by this document.
//! - Every operation either fully applies or leaves the document unchanged.
//! - Moving up never places a paragraph above its own parent.

use crate::model::paragraph::{Level, LevelError, Paragraph, ParagraphId};
use crate::text::{normalize_content, normalize_title};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type EditorResult<T> = Result<T, EditorError>;

/// Errors from structural edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// Anchor or target id is not in the document.
    ParagraphNotFound(ParagraphId),
    /// Target paragraph is flagged mandatory and cannot be deleted.
    MandatoryParagraph(ParagraphId),
    /// Requested level is outside `1..=8`.
    InvalidLevel(LevelError),
    /// The id counter reached `u64::MAX`; no further ids can be issued.
    IdsExhausted,
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParagraphNotFound(id) => write!(f, "paragraph not found: {id}"),
            Self::MandatoryParagraph(id) => {
                write!(f, "paragraph {id} is mandatory and cannot be deleted")
            }
            Self::InvalidLevel(err) => write!(f, "{err}"),
            Self::IdsExhausted => write!(f, "paragraph id counter is exhausted"),
        }
    }
}

impl Error for EditorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidLevel(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LevelError> for EditorError {
    fn from(value: LevelError) -> Self {
        Self::InvalidLevel(value)
    }
}

/// Errors when assembling a document from existing paragraphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The body has no paragraphs.
    Empty,
    /// Two paragraphs share one id.
    DuplicateId(ParagraphId),
    /// Counter would reissue an existing id.
    StaleCounter {
        next_id: ParagraphId,
        max_id: ParagraphId,
    },
    /// A paragraph carries `u64::MAX`, leaving no id to issue next.
    CounterExhausted,
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "document must contain at least one paragraph"),
            Self::DuplicateId(id) => write!(f, "duplicate paragraph id: {id}"),
            Self::StaleCounter { next_id, max_id } => write!(
                f,
                "next_id ({next_id}) must be greater than every paragraph id (max {max_id})"
            ),
            Self::CounterExhausted => write!(
                f,
                "paragraph id {} leaves no room for a next id",
                ParagraphId::MAX
            ),
        }
    }
}

impl Error for DocumentError {}

/// Level of a newly inserted paragraph relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertMode {
    /// Level 1 regardless of anchor.
    NewMainTopic,
    /// Anchor level plus one, capped at 8.
    NewChild,
    /// Same level as anchor.
    NewSibling,
    /// Anchor level minus one, floored at 1.
    PromoteOneLevel,
}

impl InsertMode {
    fn resolve(self, anchor: Level) -> Level {
        match self {
            Self::NewMainTopic => Level::MIN,
            Self::NewChild => anchor.deeper(),
            Self::NewSibling => anchor,
            Self::PromoteOneLevel => anchor.shallower(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Guards applied to `ParagraphDocument::move_paragraph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOptions {
    /// Also refuse moving down past a shallower successor. Off by default to
    /// keep established drag-and-drop behavior.
    pub guard_down: bool,
}

/// Result of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { from: usize, to: usize },
    Unchanged(MoveRefusal),
}

/// Why a move left the document unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRefusal {
    /// First paragraph moved up or last paragraph moved down.
    AtBoundary,
    /// The neighbor is shallower, so swapping would change the parent.
    WouldChangeParent,
}

/// Result of a remove request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Paragraph was deleted from `index`.
    Removed { index: usize },
    /// Paragraph was the only one; its content and title were cleared.
    Cleared,
}

/// Owned document body: the paragraph sequence plus its id counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDocument")]
pub struct ParagraphDocument {
    paragraphs: Vec<Paragraph>,
    next_id: ParagraphId,
}

#[derive(Deserialize)]
struct RawDocument {
    paragraphs: Vec<Paragraph>,
    #[serde(default)]
    next_id: Option<ParagraphId>,
}

impl TryFrom<RawDocument> for ParagraphDocument {
    type Error = DocumentError;

    fn try_from(value: RawDocument) -> Result<Self, Self::Error> {
        match value.next_id {
            Some(next_id) => Self::with_counter(value.paragraphs, next_id),
            None => Self::from_paragraphs(value.paragraphs),
        }
    }
}

impl Default for ParagraphDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl ParagraphDocument {
    /// Creates a document with one empty level-1 paragraph.
    pub fn new() -> Self {
        Self {
            paragraphs: vec![Paragraph::empty(1, Level::MIN)],
            next_id: 2,
        }
    }

    /// Wraps existing paragraphs, continuing ids after the largest one.
    pub fn from_paragraphs(paragraphs: Vec<Paragraph>) -> Result<Self, DocumentError> {
        let next_id = paragraphs
            .iter()
            .map(|paragraph| paragraph.id)
            .max()
            .map_or(Some(1), |max_id| max_id.checked_add(1))
            .ok_or(DocumentError::CounterExhausted)?;
        Self::with_counter(paragraphs, next_id)
    }

    /// Wraps existing paragraphs with an explicit counter, e.g. restored from
    /// a snapshot where higher ids were already issued and deleted.
    pub fn with_counter(
        paragraphs: Vec<Paragraph>,
        next_id: ParagraphId,
    ) -> Result<Self, DocumentError> {
        if paragraphs.is_empty() {
            return Err(DocumentError::Empty);
        }
        let mut seen = HashSet::with_capacity(paragraphs.len());
        for paragraph in &paragraphs {
            if !seen.insert(paragraph.id) {
                return Err(DocumentError::DuplicateId(paragraph.id));
            }
        }
        let max_id = seen.iter().copied().max().unwrap_or(0);
        if next_id <= max_id {
            return Err(DocumentError::StaleCounter { next_id, max_id });
        }
        Ok(Self {
            paragraphs,
            next_id,
        })
    }

    /// The ordered body.
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Id the next inserted paragraph will receive.
    pub fn next_id(&self) -> ParagraphId {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Position of `id` in the sequence.
    pub fn position(&self, id: ParagraphId) -> EditorResult<usize> {
        self.paragraphs
            .iter()
            .position(|paragraph| paragraph.id == id)
            .ok_or(EditorError::ParagraphNotFound(id))
    }

    pub fn get(&self, id: ParagraphId) -> Option<&Paragraph> {
        self.paragraphs.iter().find(|paragraph| paragraph.id == id)
    }

    /// Inserts an empty paragraph directly after `after_id`.
    ///
    /// Returns the new paragraph id.
    pub fn insert_after(
        &mut self,
        after_id: ParagraphId,
        mode: InsertMode,
    ) -> EditorResult<ParagraphId> {
        let anchor_index = self.position(after_id)?;
        let level = mode.resolve(self.paragraphs[anchor_index].level);
        let id = self.next_id;
        // Why: a restored snapshot may carry `next_id == u64::MAX`; check
        // before inserting so a failed insert leaves the body untouched.
        let next_id = id.checked_add(1).ok_or(EditorError::IdsExhausted)?;

        self.paragraphs.insert(anchor_index + 1, Paragraph::empty(id, level));
        self.next_id = next_id;

        debug!(
            "event=paragraph_insert module=editor status=ok id={} anchor={} mode={:?} level={}",
            id, after_id, mode, level
        );
        Ok(id)
    }

    /// Deletes one paragraph.
    ///
    /// The sole remaining paragraph is cleared instead of deleted.
    pub fn remove(&mut self, id: ParagraphId) -> EditorResult<RemoveOutcome> {
        let index = self.position(id)?;
        if self.paragraphs[index].is_mandatory {
            info!(
                "event=paragraph_remove module=editor status=refused reason=mandatory id={}",
                id
            );
            return Err(EditorError::MandatoryParagraph(id));
        }

        if self.paragraphs.len() == 1 {
            let paragraph = &mut self.paragraphs[index];
            paragraph.content.clear();
            paragraph.title = None;
            debug!(
                "event=paragraph_remove module=editor status=cleared id={}",
                id
            );
            return Ok(RemoveOutcome::Cleared);
        }

        self.paragraphs.remove(index);
        debug!(
            "event=paragraph_remove module=editor status=ok id={} index={}",
            id, index
        );
        Ok(RemoveOutcome::Removed { index })
    }

    /// Swaps a paragraph with its neighbor in `direction`.
    pub fn move_paragraph(
        &mut self,
        id: ParagraphId,
        direction: MoveDirection,
        options: MoveOptions,
    ) -> EditorResult<MoveOutcome> {
        let from = self.position(id)?;
        let level = self.paragraphs[from].level;

        let to = match direction {
            MoveDirection::Up if from == 0 => None,
            MoveDirection::Up => Some(from - 1),
            MoveDirection::Down if from + 1 == self.paragraphs.len() => None,
            MoveDirection::Down => Some(from + 1),
        };
        let Some(to) = to else {
            debug!(
                "event=paragraph_move module=editor status=unchanged reason=boundary id={} direction={:?}",
                id, direction
            );
            return Ok(MoveOutcome::Unchanged(MoveRefusal::AtBoundary));
        };

        let guarded = match direction {
            MoveDirection::Up => true,
            MoveDirection::Down => options.guard_down,
        };
        if guarded && self.paragraphs[to].level < level {
            info!(
                "event=paragraph_move module=editor status=unchanged reason=parent_change id={} direction={:?}",
                id, direction
            );
            return Ok(MoveOutcome::Unchanged(MoveRefusal::WouldChangeParent));
        }

        self.paragraphs.swap(from, to);
        debug!(
            "event=paragraph_move module=editor status=ok id={} from={} to={}",
            id, from, to
        );
        Ok(MoveOutcome::Moved { from, to })
    }

    /// Replaces paragraph content with its normalized form.
    pub fn set_content(&mut self, id: ParagraphId, raw_text: &str) -> EditorResult<()> {
        let index = self.position(id)?;
        self.paragraphs[index].content = normalize_content(raw_text);
        Ok(())
    }

    /// Sets or clears the paragraph title; blank input clears it.
    pub fn set_title(&mut self, id: ParagraphId, raw_title: Option<&str>) -> EditorResult<()> {
        let index = self.position(id)?;
        self.paragraphs[index].title = raw_title.and_then(normalize_title);
        Ok(())
    }

    /// Toggles deletion protection.
    pub fn set_mandatory(&mut self, id: ParagraphId, is_mandatory: bool) -> EditorResult<()> {
        let index = self.position(id)?;
        self.paragraphs[index].is_mandatory = is_mandatory;
        Ok(())
    }

    /// Changes the level of one paragraph in place.
    pub fn set_level(&mut self, id: ParagraphId, level: u8) -> EditorResult<()> {
        let level = Level::new(level)?;
        let index = self.position(id)?;
        self.paragraphs[index].level = level;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DocumentError, EditorError, InsertMode, MoveDirection, MoveOptions, MoveOutcome,
        MoveRefusal, ParagraphDocument, RemoveOutcome,
    };
    use crate::model::paragraph::{Level, LevelError, Paragraph};

    fn para(id: u64, level: u8, content: &str) -> Paragraph {
        Paragraph::new(id, Level::new(level).unwrap(), content)
    }

    fn ids(doc: &ParagraphDocument) -> Vec<u64> {
        doc.paragraphs().iter().map(|paragraph| paragraph.id).collect()
    }

    #[test]
    fn new_document_has_one_empty_slot() {
        let doc = ParagraphDocument::new();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.next_id(), 2);
        assert!(!doc.paragraphs()[0].is_content_bearing());
    }

    #[test]
    fn from_paragraphs_rejects_duplicate_ids_and_empty_body() {
        assert_eq!(
            ParagraphDocument::from_paragraphs(Vec::new()),
            Err(DocumentError::Empty)
        );
        assert_eq!(
            ParagraphDocument::from_paragraphs(vec![para(4, 1, "A"), para(4, 1, "B")]),
            Err(DocumentError::DuplicateId(4))
        );
    }

    #[test]
    fn with_counter_rejects_stale_counter() {
        assert_eq!(
            ParagraphDocument::with_counter(vec![para(5, 1, "A")], 5),
            Err(DocumentError::StaleCounter {
                next_id: 5,
                max_id: 5
            })
        );
    }

    #[test]
    fn from_paragraphs_rejects_max_id() {
        assert_eq!(
            ParagraphDocument::from_paragraphs(vec![para(u64::MAX, 1, "A")]),
            Err(DocumentError::CounterExhausted)
        );
    }

    #[test]
    fn insert_with_exhausted_counter_leaves_document_unchanged() {
        let mut doc = ParagraphDocument::with_counter(vec![para(1, 1, "A")], u64::MAX).unwrap();
        let before = doc.clone();
        assert_eq!(
            doc.insert_after(1, InsertMode::NewSibling),
            Err(EditorError::IdsExhausted)
        );
        assert_eq!(doc, before);
    }

    #[test]
    fn insert_modes_resolve_levels() {
        let mut doc = ParagraphDocument::from_paragraphs(vec![para(1, 3, "anchor")]).unwrap();
        let child = doc.insert_after(1, InsertMode::NewChild).unwrap();
        let promoted = doc.insert_after(1, InsertMode::PromoteOneLevel).unwrap();
        let sibling = doc.insert_after(1, InsertMode::NewSibling).unwrap();
        let main = doc.insert_after(1, InsertMode::NewMainTopic).unwrap();

        let level_of = |id| doc.get(id).unwrap().level.get();
        assert_eq!(level_of(child), 4);
        assert_eq!(level_of(promoted), 2);
        assert_eq!(level_of(sibling), 3);
        assert_eq!(level_of(main), 1);
        assert_eq!(ids(&doc), vec![1, main, sibling, promoted, child]);
    }

    #[test]
    fn child_and_promote_saturate() {
        let mut doc =
            ParagraphDocument::from_paragraphs(vec![para(1, 1, "top"), para(2, 8, "deep")]).unwrap();
        let promoted = doc.insert_after(1, InsertMode::PromoteOneLevel).unwrap();
        let child = doc.insert_after(2, InsertMode::NewChild).unwrap();
        assert_eq!(doc.get(promoted).unwrap().level, Level::MIN);
        assert_eq!(doc.get(child).unwrap().level, Level::MAX);
    }

    #[test]
    fn unknown_anchor_leaves_document_unchanged() {
        let mut doc = ParagraphDocument::new();
        let before = doc.clone();
        assert_eq!(
            doc.insert_after(42, InsertMode::NewSibling),
            Err(EditorError::ParagraphNotFound(42))
        );
        assert_eq!(doc, before);
    }

    #[test]
    fn remove_sole_paragraph_clears_it() {
        let mut doc =
            ParagraphDocument::from_paragraphs(vec![para(1, 1, "only").with_title("Purpose")])
                .unwrap();
        assert_eq!(doc.remove(1), Ok(RemoveOutcome::Cleared));
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.paragraphs()[0].content, "");
        assert_eq!(doc.paragraphs()[0].title, None);
    }

    #[test]
    fn remove_mandatory_is_refused() {
        let mut doc =
            ParagraphDocument::from_paragraphs(vec![para(1, 1, "A").mandatory(), para(2, 1, "B")])
                .unwrap();
        let before = doc.clone();
        assert_eq!(doc.remove(1), Err(EditorError::MandatoryParagraph(1)));
        assert_eq!(doc, before);
    }

    #[test]
    fn move_down_guard_is_opt_in() {
        let sequence = vec![para(1, 1, "A"), para(2, 2, "a"), para(3, 1, "B")];
        let mut unguarded = ParagraphDocument::from_paragraphs(sequence.clone()).unwrap();
        assert_eq!(
            unguarded.move_paragraph(2, MoveDirection::Down, MoveOptions::default()),
            Ok(MoveOutcome::Moved { from: 1, to: 2 })
        );

        let mut guarded = ParagraphDocument::from_paragraphs(sequence).unwrap();
        assert_eq!(
            guarded.move_paragraph(2, MoveDirection::Down, MoveOptions { guard_down: true }),
            Ok(MoveOutcome::Unchanged(MoveRefusal::WouldChangeParent))
        );
        assert_eq!(ids(&guarded), vec![1, 2, 3]);
    }

    #[test]
    fn set_title_blank_clears() {
        let mut doc = ParagraphDocument::new();
        doc.set_title(1, Some(" Purpose ")).unwrap();
        assert_eq!(doc.paragraphs()[0].title.as_deref(), Some("Purpose"));
        doc.set_title(1, Some("   ")).unwrap();
        assert_eq!(doc.paragraphs()[0].title, None);
    }

    #[test]
    fn set_level_rejects_out_of_range() {
        let mut doc = ParagraphDocument::new();
        assert_eq!(
            doc.set_level(1, 9),
            Err(EditorError::InvalidLevel(LevelError(9)))
        );
        doc.set_level(1, 2).unwrap();
        assert_eq!(doc.paragraphs()[0].level.get(), 2);
    }
}
