//! Naval correspondence formatting engine.
//! This crate is the single source of paragraph numbering, indentation
//! geometry and sibling-pairing truth for every document renderer.

pub mod citation;
pub mod config;
pub mod editor;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod model;
pub mod text;
pub mod validate;

pub use citation::{citation_for, citations, letter_sequence, sibling_group_start, Citation};
pub use config::{ConfigError, EngineConfig};
pub use editor::{
    DocumentError, EditorError, EditorResult, InsertMode, MoveDirection, MoveOptions,
    MoveOutcome, MoveRefusal, ParagraphDocument, RemoveOutcome,
};
pub use engine::{FormattingEngine, ParagraphLayout};
pub use error::{EngineError, EngineResult};
pub use geometry::{
    citation_style, geometry_for, CitationStyle, CorePresentation, Enclosure, FontConvention,
    LevelGeometry, NumeralKind,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::document_type::{DocumentType, TitleCase};
pub use model::paragraph::{Level, LevelError, Paragraph, ParagraphId};
pub use text::{normalize_content, normalize_title};
pub use validate::{validate, ValidationBlocked, ValidationPolicy, ValidationReport, Violation};

/// Returns the engine crate version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
