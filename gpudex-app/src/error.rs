//! Error type returned by command handlers.

use gpudex_catalog::CatalogError;
use gpudex_compare::CompareError;
use gpudex_core::GpudexError;
use gpudex_export::ExportError;
use gpudex_lists::ListError;
use serde::Serialize;
use std::fmt;

/// A failed command, rendered to the user as `[ERROR] <message>`.
#[derive(Debug, Serialize)]
pub struct CommandError {
    /// Error code (e.g., "LIST_NOT_FOUND")
    pub code: String,
    /// User-friendly error message
    pub message: String,
    /// Optional context, such as usage text or the offending value
    pub details: Option<serde_json::Value>,
}

impl CommandError {
    /// Create a new command error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Create a command error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details),
        }
    }

    /// Invalid or missing arguments, with the command's usage line attached.
    pub fn usage(message: impl Into<String>, usage: &str) -> Self {
        Self::with_details(
            "INVALID_ARGUMENTS",
            message,
            serde_json::json!({ "usage": usage }),
        )
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ERROR] {}", self.message)?;
        if let Some(usage) = self
            .details
            .as_ref()
            .and_then(|d| d.get("usage"))
            .and_then(serde_json::Value::as_str)
        {
            write!(f, "\nUsage: {usage}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CommandError {}

impl From<ListError> for CommandError {
    fn from(err: ListError) -> Self {
        let code = match &err {
            ListError::NoActiveList => "NO_ACTIVE_LIST",
            ListError::AlreadyExists { .. } => "LIST_EXISTS",
            ListError::NotFound { .. } => "LIST_NOT_FOUND",
            ListError::GpuNotFound { .. } => "GPU_NOT_FOUND",
            ListError::Capacity { .. } => "LIST_FULL",
            ListError::EmptyList { .. } => "LIST_EMPTY",
            ListError::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
            ListError::EmptySelection => "INVALID_ARGUMENTS",
            ListError::InvalidName(_) => "INVALID_LIST_NAME",
            ListError::Storage { .. } | ListError::Document { .. } => "STORAGE_ERROR",
        };

        let message = match &err {
            ListError::InvalidName(GpudexError::Validation(reason)) => capitalize(reason),
            other => capitalize(&other.to_string()),
        };

        Self::with_details(
            code,
            message,
            serde_json::json!({ "category": err.category().label() }),
        )
    }
}

impl From<ExportError> for CommandError {
    fn from(err: ExportError) -> Self {
        let code = match &err {
            ExportError::EmptyList { .. } => "LIST_EMPTY",
            ExportError::UnknownFormat(_) => "UNKNOWN_FORMAT",
            ExportError::InvalidFilename(_) => "INVALID_ARGUMENTS",
            ExportError::Io { .. }
            | ExportError::Json(_)
            | ExportError::Xlsx(_)
            | ExportError::Csv(_) => "EXPORT_FAILED",
        };

        Self::with_details(
            code,
            capitalize(&err.to_string()),
            serde_json::json!({ "category": err.category().label() }),
        )
    }
}

impl From<CompareError> for CommandError {
    fn from(err: CompareError) -> Self {
        Self::new("GPU_NOT_FOUND", capitalize(&err.to_string()))
    }
}

impl From<CatalogError> for CommandError {
    fn from(err: CatalogError) -> Self {
        let code = match &err {
            CatalogError::GpuNotFound { .. } => "GPU_NOT_FOUND",
            CatalogError::LoadError { .. } | CatalogError::ParseError { .. } => "CATALOG_UNAVAILABLE",
            CatalogError::UnknownField(_) => "INTERNAL_ERROR",
        };
        Self::new(code, capitalize(&err.to_string()))
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
