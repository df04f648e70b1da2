//! Correspondence document kinds.
//!
//! Document kind only affects how paragraph titles are cased; numbering and
//! geometry are identical across kinds.

use serde::{Deserialize, Serialize};

/// Kind of correspondence being drafted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Standard naval letter.
    #[default]
    Letter,
    /// Endorsement on a basic letter.
    Endorsement,
    /// Memorandum (from-to or plain paper).
    Memorandum,
    /// Memorandum for the record.
    MemorandumForTheRecord,
    /// Staffing paper presenting a position.
    PositionPaper,
    /// Staffing paper requesting a decision.
    DecisionPaper,
    /// Staffing paper conveying information.
    InformationPaper,
}

impl DocumentType {
    /// Title casing applied when a paragraph title is rendered.
    pub fn title_case(self) -> TitleCase {
        match self {
            Self::PositionPaper | Self::DecisionPaper | Self::InformationPaper => {
                TitleCase::Upper
            }
            Self::Letter | Self::Endorsement | Self::Memorandum | Self::MemorandumForTheRecord => {
                TitleCase::Capitalized
            }
        }
    }
}

/// Case transform for paragraph titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleCase {
    /// Every letter uppercased.
    Upper,
    /// First letter of each word uppercased; the rest left as typed so
    /// acronyms survive.
    Capitalized,
}

impl TitleCase {
    /// Applies the transform to an already-normalized title.
    pub fn apply(self, title: &str) -> String {
        match self {
            Self::Upper => title.to_uppercase(),
            Self::Capitalized => title
                .split(' ')
                .map(capitalize_word)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
