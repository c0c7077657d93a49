//! gpudex Lists - named, size-bounded GPU lists with write-through persistence.
//!
//! A [`ListRegistry`] owns every named list and the active-list pointer.
//! Each mutation is applied in memory first and then the whole affected list
//! is rewritten through a [`ListStorage`] backend. A failed write never undoes
//! the mutation; it is reported through [`Applied::persistence`] instead.
//!
//! # Architecture
//!
//! - **Summaries** ([`summary`]): `GpuSummary` entries and the `{listName, gpus}` document
//! - **Storage** ([`storage`]): the storage seam and its one-file-per-list JSON backend
//! - **Registry** ([`registry`]): create, add, remove, switch, rename, delete, clear, reload
//! - **Views** ([`views`]): status, details and the all-lists overview
//! - **Errors** ([`error`]): list-specific error types
//!
//! # Example
//!
//! ```rust,no_run
//! use gpudex_catalog::{CatalogStore, SearchEngine};
//! use gpudex_lists::{JsonDirStorage, ListRegistry};
//!
//! # fn main() -> gpudex_lists::Result<()> {
//! let engine = SearchEngine::with_limits(CatalogStore::empty(), 30, 64);
//! let storage = JsonDirStorage::open("saved_lists")?;
//! let mut registry = ListRegistry::load(Box::new(storage))?;
//!
//! registry.create("Budget Builds")?;
//! let added = registry.add_to_active("rx 6600", &engine);
//! assert!(added.is_err());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod registry;
pub mod storage;
pub mod summary;
pub mod views;

pub use error::{ListError, Result};
pub use registry::{Added, Applied, ListRegistry, NamedList, Persistence};
pub use storage::{JsonDirStorage, ListStorage};
pub use summary::{GpuSummary, ListDocument};
pub use views::{ListDetails, ListOverview, ListStatus};
