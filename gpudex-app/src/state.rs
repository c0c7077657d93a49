//! Application state management.

use crate::session::SessionState;
use gpudex_catalog::{CatalogError, CatalogLoader, CatalogStore, SearchEngine};
use gpudex_core::{AppConfig, CatalogConfig, GpudexError};
use gpudex_export::{ExportEngine, ExportFormat};
use gpudex_lists::{JsonDirStorage, ListRegistry};
use tracing::{info, warn};

/// Everything a command handler can read or mutate.
///
/// Owned by the shell and passed to each handler; commands run one at a
/// time, so no field needs synchronization.
pub struct AppState {
    /// Effective configuration
    pub config: AppConfig,
    /// Catalogue search
    pub engine: SearchEngine,
    /// Named lists and the active pointer
    pub registry: ListRegistry,
    /// Export writer
    pub exporter: ExportEngine,
    /// Last search
    pub session: SessionState,
    /// Message to show once at startup, if loading degraded
    pub startup_notice: Option<String>,
}

impl AppState {
    /// Load the catalogue and the stored lists described by `config`.
    ///
    /// A catalogue that fails to load is not fatal: the state starts with an
    /// empty catalogue and [`AppState::startup_notice`] explains why.
    ///
    /// # Errors
    /// Returns error if the lists directory cannot be created or read.
    pub fn from_config(config: AppConfig) -> Result<Self, GpudexError> {
        let (store, startup_notice) = load_catalog(&config.catalog);
        let engine = SearchEngine::new(store, &config.search);

        let storage = JsonDirStorage::open(&config.lists.directory)
            .map_err(|e| GpudexError::Lists(e.to_string()))?;
        let registry =
            ListRegistry::load(Box::new(storage)).map_err(|e| GpudexError::Lists(e.to_string()))?;

        info!(
            catalogue = engine.catalog().len(),
            lists = registry.len(),
            "application state ready"
        );

        let mut state = Self::new(config, engine, registry);
        state.startup_notice = startup_notice;
        Ok(state)
    }

    /// Assemble state from already built parts.
    #[must_use]
    pub fn new(config: AppConfig, engine: SearchEngine, registry: ListRegistry) -> Self {
        let exporter = ExportEngine::new(config.export.output_dir.clone());
        Self {
            config,
            engine,
            registry,
            exporter,
            session: SessionState::new(),
            startup_notice: None,
        }
    }

    /// Re-read the catalogue file and swap it into the search engine.
    ///
    /// The previous catalogue stays in place when the file cannot be loaded.
    ///
    /// # Errors
    /// Returns error if the catalogue file is missing or malformed.
    pub fn reload_catalog(&mut self) -> Result<usize, CatalogError> {
        let records = CatalogLoader::from_config(&self.config.catalog).load()?;
        self.engine.replace_catalog(CatalogStore::new(records));
        self.startup_notice = None;
        Ok(self.engine.catalog().len())
    }

    /// Export format used when `list export` is given no `-f`.
    #[must_use]
    pub fn default_export_format(&self) -> ExportFormat {
        self.config
            .export
            .default_format
            .parse()
            .unwrap_or_default()
    }
}

fn load_catalog(config: &CatalogConfig) -> (CatalogStore, Option<String>) {
    match CatalogLoader::from_config(config).load() {
        Ok(records) => (CatalogStore::new(records), None),
        Err(e) => {
            warn!(error = %e, "catalogue unavailable, continuing with an empty catalogue");
            let notice = format!(
                "[WARNING] The GPU catalogue could not be loaded ({e}). Searches will return no results."
            );
            (CatalogStore::empty(), Some(notice))
        }
    }
}
