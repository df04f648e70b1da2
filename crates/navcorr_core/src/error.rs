//! Engine query errors.
//!
//! Only programmer errors live here. Structure problems are reported as
//! `crate::validate::Violation` values, never as errors.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Paragraph index is outside the sequence.
    InvalidIndex { index: usize, len: usize },
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIndex { index, len } => write!(
                f,
                "paragraph index {index} is out of bounds for sequence of length {len}"
            ),
        }
    }
}

impl Error for EngineError {}
