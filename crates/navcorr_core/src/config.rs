//! Engine configuration.
//!
//! # Responsibility
//! - Hold the caller-selected conventions the facade applies to every query.
//! - Load those settings from TOML.
//!
//! # Invariants
//! - Every field has a default, so an empty file is a valid configuration.
//! - Unknown keys are rejected to surface typos.

use crate::editor::MoveOptions;
use crate::geometry::FontConvention;
use crate::model::document_type::DocumentType;
use crate::validate::ValidationPolicy;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Errors from configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file cannot be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Config text is not valid TOML for `EngineConfig`.
    Parse(toml::de::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid engine config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

/// Conventions applied by `FormattingEngine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Body-font convention used for geometry.
    pub font: FontConvention,
    /// Whether structure violations block or only warn.
    pub validation_policy: ValidationPolicy,
    /// Refuse moving a paragraph down past a shallower successor.
    pub guard_move_down: bool,
    /// Document kind used for title casing.
    pub document_type: DocumentType,
}

impl EngineConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub(crate) fn move_options(&self) -> MoveOptions {
        MoveOptions {
            guard_down: self.guard_move_down,
        }
    }
}
