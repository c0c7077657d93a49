//! Error types for list export.

use gpudex_core::ErrorCategory;
use thiserror::Error;

/// Errors that can occur while exporting a list.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The list has nothing to export
    #[error("list '{name}' is empty, nothing to export")]
    EmptyList {
        /// The empty list
        name: String,
    },

    /// Format name not recognised
    #[error("unknown export format '{0}' (expected json, xlsx or csv)")]
    UnknownFormat(String),

    /// The target file name is unusable
    #[error("invalid export file name: {0}")]
    InvalidFilename(String),

    /// Failed to write the export file
    #[error("failed to write export file {path}: {source}")]
    Io {
        /// Target path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding failed
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Spreadsheet writing failed
    #[error("spreadsheet export failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// CSV writing failed
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
}

impl ExportError {
    /// Classify this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyList { .. } => ErrorCategory::EmptyCollection,
            Self::UnknownFormat(_) | Self::InvalidFilename(_) => ErrorCategory::Validation,
            Self::Io { .. } | Self::Json(_) | Self::Xlsx(_) | Self::Csv(_) => {
                ErrorCategory::Persistence
            }
        }
    }
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
