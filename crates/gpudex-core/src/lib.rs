//! gpudex Core - Foundation crate for the gpudex hardware catalogue tool.
//!
//! This crate provides shared types, error handling and configuration
//! management that all other gpudex crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types and the error taxonomy
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared newtypes and constants (`ListName`, `MAX_LIST_SIZE`)
//!
//! # Example
//!
//! ```rust
//! use gpudex_core::{AppConfig, ListName};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert_eq!(config.search.result_limit, 30);
//!
//! let name = ListName::new("Gaming Rigs")?;
//! assert_eq!(name.key(), "gaming rigs");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, CatalogConfig, ExportConfig, ListsConfig, SearchConfig};
pub use error::{ConfigError, ConfigResult, ErrorCategory, GpudexError, Result};
pub use types::{ListName, MAX_LIST_SIZE};
