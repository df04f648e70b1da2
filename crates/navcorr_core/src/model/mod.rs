//! Document body data model.
//!
//! # Responsibility
//! - Define the paragraph record every engine component operates on.
//! - Define document kinds that influence title rendering.
//!
//! # Invariants
//! - The body is one flat ordered sequence; nesting is implied by `level`.
//! - Paragraph ids are stable for the document lifetime and never reused.

pub mod document_type;
pub mod paragraph;
