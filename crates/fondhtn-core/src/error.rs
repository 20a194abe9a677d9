//! Error types for fondhtn

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using fondhtn's Error
pub type Result<T> = std::result::Result<T, Error>;

/// fondhtn error types
///
/// Every decoding fault names the section and the zero-based record index it
/// was raised in. None of them are recoverable: a fault aborts the whole
/// conversion.
#[derive(Error, Debug)]
pub enum Error {
    // Section errors (E001-E099)
    #[error("Section '{0}' not found in grounded output.")]
    MissingSection(String),

    // Decoding errors (E100-E199)
    #[error("Malformed record {record} in section '{section}': {reason}")]
    MalformedRecord {
        section: String,
        record: usize,
        reason: String,
    },

    #[error(
        "Index {index} out of range for {table} (len {len}) in section '{section}', record {record}"
    )]
    OutOfRangeIndex {
        section: String,
        record: usize,
        table: &'static str,
        index: i64,
        len: usize,
    },

    #[error("Decoded {actions} actions but the task table declares {primitives} primitive tasks")]
    TaskCountMismatch { actions: usize, primitives: usize },

    // Merge errors (E200-E299)
    #[error("Variant table for '{base}' disagrees with the actions: {reason}")]
    VariantCountMismatch { base: String, reason: String },

    #[error("Merged action '{0}' collides with an existing action")]
    MergeConflict(String),

    // Output errors (E300-E399)
    #[error("Output '{}' already exists. Remove it or choose another path.", .0.display())]
    DuplicateOutput(PathBuf),

    // Config errors (E600-E699)
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingSection(_) => "E001",
            Self::MalformedRecord { .. } => "E100",
            Self::OutOfRangeIndex { .. } => "E101",
            Self::TaskCountMismatch { .. } => "E102",
            Self::VariantCountMismatch { .. } => "E200",
            Self::MergeConflict(_) => "E201",
            Self::DuplicateOutput(_) => "E300",
            Self::Config(_) => "E600",
            Self::Json(_) | Self::Io(_) => "E9999",
        }
    }

    /// Get suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::OutOfRangeIndex { .. } | Self::TaskCountMismatch { .. } => Some(
                "The grounder output format and this decoder are out of step; regenerate the grounding"
                    .to_string(),
            ),
            Self::DuplicateOutput(path) => Some(format!("rm {}", path.display())),
            Self::Config(_) => Some("fondhtn config list".to_string()),
            _ => None,
        }
    }

    pub(crate) fn malformed(section: &str, record: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            section: section.to_string(),
            record,
            reason: reason.into(),
        }
    }
}
