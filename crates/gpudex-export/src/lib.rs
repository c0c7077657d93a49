//! gpudex Export - write a named list as JSON, XLSX or CSV.
//!
//! Exports read a snapshot of one list and never touch the registry. The
//! JSON export uses the same `{listName, gpus}` document the lists directory
//! stores; the spreadsheet and CSV exports share one fixed column set.
//!
//! # Architecture
//!
//! - **Formats** ([`format`]): `ExportFormat` parsing and extensions
//! - **Table** ([`table`]): column headers and per-entry cells
//! - **Engine** ([`engine`]): file naming and the three writers
//! - **Errors** ([`error`]): export-specific error types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod engine;
pub mod error;
pub mod format;
pub mod table;

pub use engine::ExportEngine;
pub use error::{ExportError, Result};
pub use format::ExportFormat;
pub use table::{Cell, COLUMNS};
