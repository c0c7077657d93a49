//! Shared types used across gpudex.

use crate::error::GpudexError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Maximum number of entries a named list may hold.
pub const MAX_LIST_SIZE: usize = 20;

/// Newtype for user-chosen list names.
///
/// The original casing is kept for display and file naming, while equality,
/// hashing and lookups use the lower-cased [`ListName::key`]. Names become
/// file names, so path separators and `..` are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ListName(String);

impl ListName {
    /// Create a new `ListName`, trimming surrounding whitespace.
    ///
    /// # Errors
    /// Returns error if the name is blank or would escape the lists directory.
    pub fn new(name: impl Into<String>) -> Result<Self, GpudexError> {
        let name = name.into();
        let trimmed = name.trim();
        Self::validate(trimmed)?;
        Ok(Self(trimmed.to_string()))
    }

    /// The name as the user typed it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive identity used for uniqueness and lookup.
    #[must_use]
    pub fn key(&self) -> String {
        Self::normalize(&self.0)
    }

    /// Normalize any string the way list keys are normalized.
    #[must_use]
    pub fn normalize(name: &str) -> String {
        name.trim().to_lowercase()
    }

    fn validate(name: &str) -> Result<(), GpudexError> {
        if name.is_empty() {
            return Err(GpudexError::Validation(
                "invalid list name: must not be empty".to_string(),
            ));
        }

        if name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(GpudexError::Validation(format!(
                "invalid list name: must not contain path separators or '..', got '{name}'"
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(GpudexError::Validation(format!(
                "invalid list name: must not contain control characters, got '{}'",
                name.escape_debug()
            )));
        }

        Ok(())
    }
}

impl PartialEq for ListName {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ListName {}

impl Hash for ListName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for ListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ListName {
    type Error = GpudexError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ListName> for String {
    fn from(name: ListName) -> Self {
        name.0
    }
}
