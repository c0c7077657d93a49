//! Core error types for gpudex.
//!
//! This module defines the central error type used across all subsystems
//! and the [`ErrorCategory`] taxonomy every subsystem error maps onto.

use std::fmt;
use thiserror::Error;

/// Central error type for all gpudex operations.
///
/// Each variant represents an error from a specific subsystem, allowing
/// for clear error propagation and handling across module boundaries.
#[derive(Error, Debug)]
pub enum GpudexError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Named list errors (registry mutations, persistence)
    #[error("list error: {0}")]
    Lists(String),

    /// Validation errors (invalid input, constraints)
    #[error("validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Config file not found
    #[error("config file not found at {path}")]
    NotFound {
        /// Path where config was expected
        path: String,
    },

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Broad classes of failure shared by every subsystem.
///
/// Subsystem errors expose a `category()` so the command shell can choose
/// its messaging without matching on every concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A record, list or list entry lookup missed
    NotFound,
    /// Input rejected before any state changed
    Validation,
    /// The operation needs a non-empty list or catalogue
    EmptyCollection,
    /// Writing a list document or export file failed
    Persistence,
    /// The catalogue could not be loaded at startup
    StartupData,
}

impl ErrorCategory {
    /// Stable upper-case label, used as a prefix in error codes.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Validation => "VALIDATION",
            Self::EmptyCollection => "EMPTY_COLLECTION",
            Self::Persistence => "PERSISTENCE",
            Self::StartupData => "STARTUP_DATA",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl GpudexError {
    /// Classify this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) | Self::Config(_) | Self::Lists(_) | Self::Internal(_) => {
                ErrorCategory::Validation
            }
            Self::Io(_) => ErrorCategory::Persistence,
        }
    }
}

/// Result type alias using `GpudexError`.
pub type Result<T> = std::result::Result<T, GpudexError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
