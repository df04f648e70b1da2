//! Citation generator.
//!
//! # Responsibility
//! - Derive the outline citation of a paragraph from its position in the
//!   full ordered sequence.
//! - Expose citations as structured parts so renderers can decorate the core.
//!
//! # Invariants
//! - A citation is never stored; it is recomputed from the current sequence.
//! - A paragraph's number depends only on paragraphs from its sibling-group
//!   start through itself; deeper paragraphs never shift it.
//! - Siblings that are not content-bearing are skipped, except the paragraph
//!   being numbered, which always receives a provisional number.

use crate::error::{EngineError, EngineResult};
use crate::geometry::{citation_style, CorePresentation, NumeralKind};
use crate::model::paragraph::{Level, Paragraph};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Rendered outline marker split into decoratable parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Citation {
    pub prefix: &'static str,
    pub core: String,
    pub core_presentation: CorePresentation,
    pub suffix: &'static str,
}

impl Citation {
    /// Renders `count` with the shape configured for `level`.
    pub fn for_count(level: Level, count: usize) -> Self {
        let style = citation_style(level);
        let count = count.max(1);
        let core = match style.numeral {
            NumeralKind::Arabic => count.to_string(),
            NumeralKind::Letter => letter_sequence(count),
        };
        Self {
            prefix: style.enclosure.prefix(),
            core,
            core_presentation: style.presentation,
            suffix: style.enclosure.suffix(),
        }
    }

    /// Whether the core must be underlined when rendered.
    pub fn is_underlined(&self) -> bool {
        self.core_presentation == CorePresentation::Underline
    }
}

/// Plain-text form without decoration, e.g. `(a)`.
impl Display for Citation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.prefix, self.core, self.suffix)
    }
}

/// Bijective base-26 lowercase letters: 1 -> `a`, 26 -> `z`, 27 -> `aa`.
///
/// Zero is coerced to 1.
pub fn letter_sequence(count: usize) -> String {
    let mut remaining = count.max(1);
    let mut letters = Vec::new();
    while remaining > 0 {
        remaining -= 1;
        letters.push(char::from(b'a' + (remaining % 26) as u8));
        remaining /= 26;
    }
    letters.iter().rev().collect()
}

/// Index of the first paragraph in the sibling group containing `index`.
///
/// The group starts right after the nearest preceding paragraph with a
/// shallower level, or at 0 when there is none.
pub fn sibling_group_start(sequence: &[Paragraph], index: usize) -> EngineResult<usize> {
    let target = checked(sequence, index)?;
    Ok(sequence[..index]
        .iter()
        .rposition(|paragraph| paragraph.level < target.level)
        .map_or(0, |boundary| boundary + 1))
}

/// Returns the citation for the paragraph at `index`.
///
/// Empty earlier siblings are not counted; the target always is.
pub fn citation_for(sequence: &[Paragraph], index: usize) -> EngineResult<Citation> {
    let target = checked(sequence, index)?;
    let start = sibling_group_start(sequence, index)?;
    let count = sequence[start..index]
        .iter()
        .filter(|paragraph| paragraph.level == target.level && paragraph.is_content_bearing())
        .count()
        + 1;
    Ok(Citation::for_count(target.level, count))
}

/// Returns citations for every paragraph in one forward pass.
///
/// Produces exactly what `citation_for` returns per index. The counters only
/// live for this call, so edits between calls are always observed.
///
/// An empty sibling gets a provisional number but does not advance the count,
/// so the next sibling repeats it: `[A, "", C]` yields `1.`, `2.`, `2.`. This
/// is intended; the draft slot takes its real number once it has text.
pub fn citations(sequence: &[Paragraph]) -> Vec<Citation> {
    let mut counts = [0usize; Level::COUNT];
    sequence
        .iter()
        .map(|paragraph| {
            let slot = paragraph.level.index();
            for deeper in counts.iter_mut().skip(slot + 1) {
                *deeper = 0;
            }
            let citation = Citation::for_count(paragraph.level, counts[slot] + 1);
            if paragraph.is_content_bearing() {
                counts[slot] += 1;
            }
            citation
        })
        .collect()
}

fn checked(sequence: &[Paragraph], index: usize) -> EngineResult<&Paragraph> {
    sequence.get(index).ok_or(EngineError::InvalidIndex {
        index,
        len: sequence.len(),
    })
}
