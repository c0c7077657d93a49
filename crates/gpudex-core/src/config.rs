//! Configuration management for gpudex.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use chrono::NaiveDate;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/gpudex/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Catalogue source settings
    pub catalog: CatalogConfig,
    /// Search behaviour settings
    pub search: SearchConfig,
    /// Named list storage settings
    pub lists: ListsConfig,
    /// Export output settings
    pub export: ExportConfig,
}

impl AppConfig {
    /// Load configuration from the default location, falling back to defaults
    /// if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;
        Self::load_or_default(&config_path)
    }

    /// Load configuration from an explicit file.
    ///
    /// Unlike [`AppConfig::load`], a missing file is an error here because the
    /// caller asked for this path specifically.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }
        Self::load_or_default(path)
    }

    fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides on top of this configuration.
    ///
    /// Supports the following environment variables:
    /// - `GPUDEX_CATALOG`: Override the catalogue file path
    /// - `GPUDEX_LISTS_DIR`: Override the saved lists directory
    /// - `GPUDEX_EXPORT_DIR`: Override the export output directory
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(path) = path_from_env("GPUDEX_CATALOG") {
            tracing::debug!("Override catalog.path from env: {}", path.display());
            self.catalog.path = path;
        }

        if let Some(dir) = path_from_env("GPUDEX_LISTS_DIR") {
            tracing::debug!("Override lists.directory from env: {}", dir.display());
            self.lists.directory = dir;
        }

        if let Some(dir) = path_from_env("GPUDEX_EXPORT_DIR") {
            tracing::debug!("Override export.output_dir from env: {}", dir.display());
            self.export.output_dir = dir;
        }

        self
    }

    /// Check values that serde alone cannot constrain.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.search.result_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.result_limit".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if self.search.cache_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.cache_capacity".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if !matches!(
            self.export.default_format.to_ascii_lowercase().as_str(),
            "json" | "xlsx" | "csv"
        ) {
            return Err(ConfigError::InvalidValue {
                field: "export.default_format".to_string(),
                reason: format!(
                    "expected json, xlsx or csv, got '{}'",
                    self.export.default_format
                ),
            });
        }

        Ok(())
    }

    /// Save configuration to the given path.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, config_path: &Path) -> ConfigResult<()> {
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/gpudex/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("com", "gpudex", "gpudex").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn path_from_env(name: &str) -> Option<PathBuf> {
    let value = std::env::var_os(name)?;
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

/// Catalogue source settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON file holding the catalogue records
    pub path: PathBuf,
    /// Records released before this date are excluded at load time
    pub min_release_date: NaiveDate,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("gpu_database.json"),
            min_release_date: NaiveDate::from_ymd_opt(2013, 1, 1).unwrap_or_default(),
        }
    }
}

/// Search behaviour settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of results returned for one query
    pub result_limit: usize,
    /// Number of normalized queries kept in the result cache
    pub cache_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            result_limit: 30,
            cache_capacity: 128,
        }
    }
}

/// Named list storage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListsConfig {
    /// Directory holding one JSON document per list
    pub directory: PathBuf,
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("saved_lists"),
        }
    }
}

/// Export output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory exported files are written to
    pub output_dir: PathBuf,
    /// Format used when `list export` is given no `-f`: `json`, `xlsx` or `csv`
    pub default_format: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            default_format: "json".to_string(),
        }
    }
}
