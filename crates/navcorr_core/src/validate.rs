//! Sibling-pairing validator.
//!
//! # Responsibility
//! - Detect subparagraph groups with exactly one content-bearing member
//!   ("if there is a 1a there must be a 1b").
//! - Leave the block-or-warn decision to the caller's policy.
//!
//! # Invariants
//! - Groups are keyed by their boundary paragraph and level, so equal
//!   citations under different parents are never merged.
//! - Level-1 groups are exempt.
//! - At most one violation is emitted per group.
//! - Only content-bearing paragraphs are counted; an empty draft slot never
//!   satisfies or breaks the pairing rule.

use crate::citation::{citations, Citation};
use crate::model::paragraph::{Level, Paragraph, ParagraphId};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller decision for documents with structure violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// Report violations and let the action proceed.
    #[default]
    Warn,
    /// Report violations and refuse the action until they are fixed.
    Block,
}

/// One lone subparagraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Level of the offending group.
    pub level: Level,
    /// Id of the single content-bearing paragraph in the group.
    pub paragraph_id: ParagraphId,
    /// Citation of that paragraph, e.g. `a.`.
    pub citation: String,
    /// Citations of its strict ancestors, outermost first.
    pub ancestor_path: Vec<String>,
    /// Human-readable explanation.
    pub message: String,
}

impl Violation {
    /// Full outline reference such as `1.a.(1)`.
    pub fn full_citation(&self) -> String {
        let mut full = self.ancestor_path.concat();
        full.push_str(&self.citation);
        full
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validation result paired with the policy it was produced under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub policy: ValidationPolicy,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Whether the caller's action must be refused.
    pub fn is_blocking(&self) -> bool {
        self.policy == ValidationPolicy::Block && !self.is_clean()
    }

    /// Converts a blocking report into an error; warnings pass through.
    pub fn into_result(self) -> Result<Vec<Violation>, ValidationBlocked> {
        if self.is_blocking() {
            Err(ValidationBlocked {
                violations: self.violations,
            })
        } else {
            Ok(self.violations)
        }
    }
}

/// Action refused under `ValidationPolicy::Block`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationBlocked {
    pub violations: Vec<Violation>,
}

impl Display for ValidationBlocked {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "document has {} paragraph structure violation(s)",
            self.violations.len()
        )?;
        for violation in &self.violations {
            write!(f, "; {violation}")?;
        }
        Ok(())
    }
}

impl Error for ValidationBlocked {}

struct SiblingGroup {
    boundary: Option<usize>,
    level: Level,
    bearing: Vec<usize>,
}

/// Validates sibling pairing across the whole sequence.
pub fn validate(sequence: &[Paragraph], policy: ValidationPolicy) -> ValidationReport {
    let citations = citations(sequence);
    let violations = sibling_groups(sequence)
        .into_iter()
        .filter(|group| group.level > Level::MIN && group.bearing.len() == 1)
        .map(|group| {
            let index = group.bearing[0];
            lone_paragraph_violation(sequence, &citations, index)
        })
        .collect();

    ValidationReport { policy, violations }
}

fn sibling_groups(sequence: &[Paragraph]) -> Vec<SiblingGroup> {
    let mut groups: Vec<SiblingGroup> = Vec::new();
    // Last paragraph index seen at each level; cleared for deeper levels
    // whenever a shallower paragraph starts a new scope.
    let mut last_at = [None::<usize>; Level::COUNT];

    for (index, paragraph) in sequence.iter().enumerate() {
        let slot = paragraph.level.index();
        let boundary = last_at[..slot].iter().flatten().max().copied();
        for deeper in last_at.iter_mut().skip(slot + 1) {
            *deeper = None;
        }
        last_at[slot] = Some(index);

        let position = groups
            .iter()
            .rposition(|group| group.boundary == boundary && group.level == paragraph.level);
        let group = match position {
            Some(position) => &mut groups[position],
            None => {
                groups.push(SiblingGroup {
                    boundary,
                    level: paragraph.level,
                    bearing: Vec::new(),
                });
                let last = groups.len() - 1;
                &mut groups[last]
            }
        };
        if paragraph.is_content_bearing() {
            group.bearing.push(index);
        }
    }

    groups
}

fn lone_paragraph_violation(
    sequence: &[Paragraph],
    citations: &[Citation],
    index: usize,
) -> Violation {
    let paragraph = &sequence[index];
    let ancestor_path = ancestor_indices(sequence, index)
        .into_iter()
        .map(|ancestor| citations[ancestor].to_string())
        .collect::<Vec<_>>();
    let citation = citations[index].to_string();
    let full = format!("{}{}", ancestor_path.concat(), citation);
    let message = format!(
        "subparagraph {full} has no sibling at level {}; add a second subparagraph or merge it into its parent",
        paragraph.level
    );

    Violation {
        level: paragraph.level,
        paragraph_id: paragraph.id,
        citation,
        ancestor_path,
        message,
    }
}

/// Strict ancestors of `index`, outermost first. Missing levels are skipped.
fn ancestor_indices(sequence: &[Paragraph], index: usize) -> Vec<usize> {
    let mut ancestors = Vec::new();
    let mut level = sequence[index].level;
    for cursor in (0..index).rev() {
        if sequence[cursor].level < level {
            ancestors.push(cursor);
            level = sequence[cursor].level;
            if level == Level::MIN {
                break;
            }
        }
    }
    ancestors.reverse();
    ancestors
}
