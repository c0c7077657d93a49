//! gpudex Catalog - read-only hardware catalogue and its search engine.
//!
//! The catalogue is loaded once from a JSON document, filtered by release
//! date, and never mutated afterwards. Everything else in gpudex reads it
//! through [`CatalogStore`] or [`SearchEngine`].
//!
//! # Architecture
//!
//! - **Records** ([`record`]): `GpuRecord` plus the explicit displayable-field table
//! - **Loader** ([`loader`]): JSON file loading with release-date filtering
//! - **Store** ([`store`]): the immutable in-memory record sequence
//! - **Search** ([`search`]): normalization, over-general policy, capped search, suggestions
//! - **Errors** ([`error`]): catalogue-specific error types
//!
//! # Example
//!
//! ```rust
//! use gpudex_catalog::{CatalogStore, GpuRecord, SearchEngine};
//!
//! let store = CatalogStore::new(vec![GpuRecord::named("GeForce RTX 3060")]);
//! let engine = SearchEngine::with_limits(store, 30, 64);
//!
//! assert_eq!(engine.search("rtx 3060").len(), 1);
//! assert!(engine.search("nvidia").is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod loader;
pub mod record;
pub mod search;
pub mod store;

pub use error::{CatalogError, Result};
pub use loader::CatalogLoader;
pub use record::{FieldValue, GpuRecord, RecordField, ValueFormat};
pub use search::{normalize_query, Refinements, SearchEngine, SearchHit, GENERIC_TERMS};
pub use store::CatalogStore;
