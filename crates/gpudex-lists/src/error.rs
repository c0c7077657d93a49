//! Error types for the list registry.

use gpudex_core::{ErrorCategory, GpudexError, MAX_LIST_SIZE};
use thiserror::Error;

/// Errors that can occur in list registry operations.
#[derive(Error, Debug)]
pub enum ListError {
    /// An operation that targets the active list ran with none selected
    #[error("no active list. Create one with 'list new <name>' or pick one with 'list switch <name>'")]
    NoActiveList,

    /// A list with this name already exists (names compare case-insensitively)
    #[error("a list named '{name}' already exists")]
    AlreadyExists {
        /// The conflicting name
        name: String,
    },

    /// No list with this name
    #[error("list '{name}' not found")]
    NotFound {
        /// The name that was looked up
        name: String,
    },

    /// Neither the catalogue nor the list holds a matching GPU
    #[error("GPU not found: {query}")]
    GpuNotFound {
        /// The query or name fragment that matched nothing
        query: String,
    },

    /// The list already holds the maximum number of entries
    #[error("list '{name}' is full ({max}/{max})", max = MAX_LIST_SIZE)]
    Capacity {
        /// The full list
        name: String,
    },

    /// The operation needs at least one entry
    #[error("list '{name}' is empty")]
    EmptyList {
        /// The empty list
        name: String,
    },

    /// A 1-based index outside `[1, size]`
    #[error("index {index} is out of range (valid: 1-{size})")]
    IndexOutOfRange {
        /// The offending index
        index: usize,
        /// Current list size
        size: usize,
    },

    /// A batch removal with no indices
    #[error("no indices given for removal")]
    EmptySelection,

    /// The list name failed validation
    #[error(transparent)]
    InvalidName(#[from] GpudexError),

    /// Failed to read or write a list document
    #[error("list storage error at {path}: {source}")]
    Storage {
        /// Path of the list document or directory
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode or decode a list document
    #[error("invalid list document {path}: {source}")]
    Document {
        /// Path of the list document
        path: String,
        /// JSON error
        #[source]
        source: serde_json::Error,
    },
}

impl ListError {
    /// Classify this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } | Self::GpuNotFound { .. } => ErrorCategory::NotFound,
            Self::EmptyList { .. } => ErrorCategory::EmptyCollection,
            Self::Storage { .. } | Self::Document { .. } => ErrorCategory::Persistence,
            Self::NoActiveList
            | Self::AlreadyExists { .. }
            | Self::Capacity { .. }
            | Self::IndexOutOfRange { .. }
            | Self::EmptySelection
            | Self::InvalidName(_) => ErrorCategory::Validation,
        }
    }
}

/// Result type for list registry operations.
pub type Result<T> = std::result::Result<T, ListError>;
