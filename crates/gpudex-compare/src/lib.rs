//! gpudex Compare - fixed-row, two-column comparison of catalogue records.
//!
//! Both records are looked up by exact name. Each attribute row renders
//! both values with that attribute's number format, substituting `N/A` for
//! missing values.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod table;

pub use error::{CompareError, Result};
pub use table::{compare, ComparisonRow, ComparisonTable, ATTRIBUTES};
