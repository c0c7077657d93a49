//! Error types for comparisons.

use gpudex_core::ErrorCategory;
use thiserror::Error;

/// Errors that can occur while building a comparison.
#[derive(Error, Debug)]
pub enum CompareError {
    /// At least one of the two names has no exact match.
    ///
    /// Does not say which of the two lookups failed.
    #[error("one or both GPUs were not found ('{first}', '{second}'); use exact names from the search results")]
    NotFound {
        /// First requested name
        first: String,
        /// Second requested name
        second: String,
    },
}

impl CompareError {
    /// Classify this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
        }
    }
}

/// Result type for comparison operations.
pub type Result<T> = std::result::Result<T, CompareError>;
