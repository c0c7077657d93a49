//! Error types for the catalogue subsystem.

use gpudex_core::ErrorCategory;
use thiserror::Error;

/// Errors that can occur in catalogue operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// No record carries this exact name
    #[error("GPU not found in the local catalogue: {name}")]
    GpuNotFound {
        /// The name that was looked up
        name: String,
    },

    /// Failed to read the catalogue file
    #[error("failed to read catalogue from {path}: {source}")]
    LoadError {
        /// Path to the catalogue file
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The catalogue file is not a JSON array of records
    #[error("failed to parse catalogue JSON in {path}: {source}")]
    ParseError {
        /// Path to the catalogue file
        path: String,
        /// JSON parse error
        #[source]
        source: serde_json::Error,
    },

    /// A field name that has no accessor
    #[error("unknown record field: {0}")]
    UnknownField(String),
}

impl CatalogError {
    /// Classify this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::GpuNotFound { .. } => ErrorCategory::NotFound,
            Self::LoadError { .. } | Self::ParseError { .. } => ErrorCategory::StartupData,
            Self::UnknownField(_) => ErrorCategory::Validation,
        }
    }
}

/// Result type for catalogue operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
