//! Level geometry table.
//!
//! # Responsibility
//! - Map each nesting level to its citation punctuation and decoration.
//! - Map each nesting level to citation/text offsets for both body-font
//!   conventions, in abstract layout units.
//!
//! # Invariants
//! - Offsets strictly increase with level for both conventions.
//! - `text_offset(L) == citation_offset(L + 1)`: a subparagraph citation sits
//!   under the first word of its parent's text.
//! - Levels 5..=8 repeat the shapes of 1..=4 with an underlined core.
//!
//! Units are abstract. Proportional tables count quarter steps of one
//! indentation stop (4 units per stop); fixed-width tables count character
//! cells, with prose starting two cells after the single-character citation.
//! Renderers convert units to points, inches or columns.

use crate::model::paragraph::Level;
use serde::{Deserialize, Serialize};

/// Body-font convention that drives indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontConvention {
    /// Proportional body font (e.g. Times New Roman) aligned on tab stops.
    #[default]
    Proportional,
    /// Fixed-width body font (e.g. Courier New) aligned on character cells.
    FixedWidth,
}

/// Numeral portion of a citation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumeralKind {
    Arabic,
    Letter,
}

/// Punctuation wrapped around the numeral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Enclosure {
    /// `1.` / `a.`
    Period,
    /// `(1)` / `(a)`
    Parentheses,
}

impl Enclosure {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Period => "",
            Self::Parentheses => "(",
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Self::Period => ".",
            Self::Parentheses => ")",
        }
    }
}

/// Decoration applied to the numeral portion only, never the punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CorePresentation {
    Plain,
    Underline,
}

/// Citation shape for one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CitationStyle {
    pub numeral: NumeralKind,
    pub enclosure: Enclosure,
    pub presentation: CorePresentation,
}

/// Indentation geometry for one level under one font convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelGeometry {
    pub level: Level,
    /// Distance from the left margin to the citation.
    pub citation_offset: u32,
    /// Distance from the left margin to the first word of prose.
    pub text_offset: u32,
    /// Indent for wrapped lines relative to the citation; equals
    /// `text_offset - citation_offset`.
    pub hanging_indent: u32,
    /// Decoration for the citation core.
    pub decoration: CorePresentation,
}

const SHAPES: [(NumeralKind, Enclosure); 4] = [
    (NumeralKind::Arabic, Enclosure::Period),
    (NumeralKind::Letter, Enclosure::Period),
    (NumeralKind::Arabic, Enclosure::Parentheses),
    (NumeralKind::Letter, Enclosure::Parentheses),
];

const PROPORTIONAL_STOP: u32 = 4;

// `1.` and `a.` take 2 cells, `(1)` and `(a)` take 3; prose follows 2 cells later.
const FIXED_WIDTH_CITATION_COLUMNS: [u32; 9] = [0, 4, 8, 13, 18, 22, 26, 31, 36];

/// Returns the citation shape for `level`.
pub fn citation_style(level: Level) -> CitationStyle {
    let slot = level.index();
    let (numeral, enclosure) = SHAPES[slot % SHAPES.len()];
    let presentation = if slot >= SHAPES.len() {
        CorePresentation::Underline
    } else {
        CorePresentation::Plain
    };
    CitationStyle {
        numeral,
        enclosure,
        presentation,
    }
}

/// Returns the indentation geometry for `level` under `font`.
pub fn geometry_for(level: Level, font: FontConvention) -> LevelGeometry {
    let slot = level.index();
    let (citation_offset, text_offset) = match font {
        FontConvention::Proportional => {
            let stop = slot as u32 * PROPORTIONAL_STOP;
            (stop, stop + PROPORTIONAL_STOP)
        }
        FontConvention::FixedWidth => (
            FIXED_WIDTH_CITATION_COLUMNS[slot],
            FIXED_WIDTH_CITATION_COLUMNS[slot + 1],
        ),
    };
    LevelGeometry {
        level,
        citation_offset,
        text_offset,
        hanging_indent: text_offset - citation_offset,
        decoration: citation_style(level).presentation,
    }
}
