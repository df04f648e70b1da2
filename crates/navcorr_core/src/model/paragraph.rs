//! Paragraph domain model.
//!
//! # Responsibility
//! - Define the atomic unit of body content and its nesting level.
//! - Provide the content-bearing predicate shared by numbering and validation.
//!
//! # Invariants
//! - `level` is always within `1..=8`.
//! - `content` and `title` are stored normalized (see `crate::text`).
//! - `id` is assigned once by the editor and never reused.

use crate::text::{normalize_content, normalize_title};
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable paragraph identifier, unique within one document lifetime.
pub type ParagraphId = u64;

/// Error for out-of-range nesting levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelError(pub u8);

impl Display for LevelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "paragraph level {} is outside {}..={}",
            self.0,
            Level::MIN.get(),
            Level::MAX.get()
        )
    }
}

impl Error for LevelError {}

/// Nesting depth of a paragraph; 1 is outermost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    /// Outermost level (`1.`, `2.`, ...).
    pub const MIN: Level = Level(1);
    /// Deepest level supported by the correspondence manual.
    pub const MAX: Level = Level(8);
    /// Number of supported levels.
    pub const COUNT: usize = Self::MAX.0 as usize;

    /// Creates a level, rejecting values outside `1..=8`.
    pub fn new(value: u8) -> Result<Self, LevelError> {
        if (Self::MIN.0..=Self::MAX.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(LevelError(value))
        }
    }

    /// Raw 1-based depth.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based slot used for table lookups.
    pub(crate) const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// One level deeper, saturating at `Level::MAX`.
    pub fn deeper(self) -> Self {
        Self(self.0.saturating_add(1).min(Self::MAX.0))
    }

    /// One level shallower, saturating at `Level::MIN`.
    pub fn shallower(self) -> Self {
        Self(self.0.saturating_sub(1).max(Self::MIN.0))
    }

    /// Iterates every supported level from outermost to deepest.
    pub fn all() -> impl Iterator<Item = Level> {
        (Self::MIN.0..=Self::MAX.0).map(Level)
    }
}

impl TryFrom<u8> for Level {
    type Error = LevelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Level> for u8 {
    fn from(value: Level) -> Self {
        value.0
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One body paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Stable id assigned at creation.
    pub id: ParagraphId,
    /// Nesting depth.
    pub level: Level,
    /// Normalized prose.
    #[serde(default, deserialize_with = "deserialize_content")]
    pub content: String,
    /// Optional heading rendered before the content.
    #[serde(
        default,
        deserialize_with = "deserialize_title",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    /// Deletion is refused while set.
    #[serde(default)]
    pub is_mandatory: bool,
}

impl Paragraph {
    /// Creates a paragraph with normalized content and no title.
    pub fn new(id: ParagraphId, level: Level, content: &str) -> Self {
        Self {
            id,
            level,
            content: normalize_content(content),
            title: None,
            is_mandatory: false,
        }
    }

    /// Creates an empty paragraph slot.
    pub fn empty(id: ParagraphId, level: Level) -> Self {
        Self::new(id, level, "")
    }

    /// Builder-style title setter; blank titles are dropped.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = normalize_title(title);
        self
    }

    /// Builder-style mandatory flag.
    pub fn mandatory(mut self) -> Self {
        self.is_mandatory = true;
        self
    }

    /// Whether trimmed content is non-empty.
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }

    /// Whether a non-blank title is present.
    pub fn has_title(&self) -> bool {
        self.title
            .as_deref()
            .is_some_and(|title| !title.trim().is_empty())
    }

    /// Whether this paragraph occupies a numbered slot for its siblings.
    pub fn is_content_bearing(&self) -> bool {
        self.has_content() || self.has_title()
    }
}

// Snapshots come from outside the editor, so they go through the same
// normalization as `set_content` and `set_title`.
fn deserialize_content<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(normalize_content(&raw))
}

fn deserialize_title<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(normalize_title))
}

#[cfg(test)]
mod tests {
    use super::{Level, LevelError, Paragraph};

    #[test]
    fn level_rejects_out_of_range_values() {
        assert_eq!(Level::new(0), Err(LevelError(0)));
        assert_eq!(Level::new(9), Err(LevelError(9)));
        assert_eq!(Level::new(8).map(Level::get), Ok(8));
    }

    #[test]
    fn level_steps_saturate_at_bounds() {
        assert_eq!(Level::MAX.deeper(), Level::MAX);
        assert_eq!(Level::MIN.shallower(), Level::MIN);
        assert_eq!(Level::MIN.deeper().get(), 2);
    }

    #[test]
    fn content_bearing_counts_title_or_trimmed_content() {
        let level = Level::MIN;
        assert!(!Paragraph::new(1, level, "   ").is_content_bearing());
        assert!(Paragraph::new(2, level, "text").is_content_bearing());
        assert!(Paragraph::empty(3, level)
            .with_title("Background")
            .is_content_bearing());
    }

    #[test]
    fn new_normalizes_content() {
        let paragraph = Paragraph::new(1, Level::MIN, "a\r\n\u{00A0} b");
        assert_eq!(paragraph.content, "a b");
    }

    #[test]
    fn deserialize_normalizes_content_and_title() {
        let paragraph: Paragraph = serde_json::from_str(
            r#"{"id":1,"level":2,"content":"a\u00A0 b\r\n","title":"   "}"#,
        )
        .unwrap();
        assert_eq!(paragraph.content, "a b ");
        assert_eq!(paragraph.title, None);
        assert!(!paragraph.has_title());
    }
}
