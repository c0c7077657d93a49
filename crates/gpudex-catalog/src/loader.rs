//! Catalogue loading from a JSON file.
//!
//! The catalogue is a single JSON array of records. Records that fail to
//! decode, have no name, or were released before the configured cutoff are
//! dropped at load time.

use crate::{
    error::{CatalogError, Result},
    record::GpuRecord,
};
use chrono::NaiveDate;
use gpudex_core::CatalogConfig;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Loader for the catalogue JSON document.
pub struct CatalogLoader {
    /// Catalogue file
    path: PathBuf,
    /// Earliest release date kept
    min_release_date: NaiveDate,
}

impl CatalogLoader {
    /// Create a new loader for the given file and release-date cutoff.
    pub fn new(path: impl Into<PathBuf>, min_release_date: NaiveDate) -> Self {
        Self {
            path: path.into(),
            min_release_date,
        }
    }

    /// Create a loader from the `[catalog]` configuration section.
    #[must_use]
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.path.clone(), config.min_release_date)
    }

    /// Catalogue file this loader reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and filter every record in the catalogue file.
    ///
    /// # Errors
    /// Returns error if the file can't be read or is not a JSON array.
    pub fn load(&self) -> Result<Vec<GpuRecord>> {
        let contents =
            std::fs::read_to_string(&self.path).map_err(|e| CatalogError::LoadError {
                path: self.path.display().to_string(),
                source: e,
            })?;

        let records = self.parse(&contents)?;

        info!(
            count = records.len(),
            path = %self.path.display(),
            cutoff = %self.min_release_date,
            "loaded catalogue"
        );

        Ok(records)
    }

    /// Decode and filter records from catalogue JSON text.
    ///
    /// Invalid entries are logged as warnings and skipped.
    pub fn parse(&self, contents: &str) -> Result<Vec<GpuRecord>> {
        let raw: Vec<Value> =
            serde_json::from_str(contents).map_err(|e| CatalogError::ParseError {
                path: self.path.display().to_string(),
                source: e,
            })?;

        let total = raw.len();
        let mut records = Vec::with_capacity(total);

        for (position, value) in raw.into_iter().enumerate() {
            let record: GpuRecord = match serde_json::from_value(value) {
                Ok(record) => record,
                Err(e) => {
                    warn!(position, error = %e, "skipping undecodable catalogue record");
                    continue;
                }
            };

            if record.name.trim().is_empty() {
                debug!(position, "skipping catalogue record without a name");
                continue;
            }

            if self.is_current(&record) {
                records.push(record);
            }
        }

        debug!(total, kept = records.len(), "filtered catalogue by release date");

        Ok(records)
    }

    /// Whether a record was released on or after the cutoff.
    ///
    /// Undated records are excluded silently; unparseable dates with a warning.
    fn is_current(&self, record: &GpuRecord) -> bool {
        let Some(date) = record
            .release_date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
        else {
            return false;
        };

        match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(released) => released >= self.min_release_date,
            Err(_) => {
                warn!(
                    name = %record.name,
                    release_date = %date,
                    "invalid release date, excluding record from the catalogue"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cutoff() -> NaiveDate {
        NaiveDate::from_ymd_opt(2013, 1, 1).expect("valid date")
    }

    const CATALOGUE: &str = r#"[
        {"name": "GeForce GTX 680", "release_date": "2012-03-22"},
        {"name": "GeForce GTX 780", "release_date": "2013-05-23"},
        {"name": "Radeon RX 6600", "release_date": "2021-10-13", "memory_size_gb": 8},
        {"name": "Mystery Card", "release_date": "sometime"},
        {"name": "Undated Card"},
        {"name": "", "release_date": "2020-01-01"},
        {"name": ["not", "a", "string"], "release_date": "2020-01-01"}
    ]"#;

    #[test]
    fn test_parse_filters_by_release_date() {
        let loader = CatalogLoader::new("catalogue.json", cutoff());
        let records = loader.parse(CATALOGUE).expect("parse catalogue");

        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["GeForce GTX 780", "Radeon RX 6600"]);
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        let loader = CatalogLoader::new(
            "catalogue.json",
            NaiveDate::from_ymd_opt(2013, 5, 23).expect("valid date"),
        );
        let records = loader.parse(CATALOGUE).expect("parse catalogue");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let loader = CatalogLoader::new("catalogue.json", cutoff());
        let result = loader.parse(r#"{"name": "GeForce RTX 3060"}"#);
        assert!(matches!(result, Err(CatalogError::ParseError { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("gpu_database.json");
        std::fs::write(&path, CATALOGUE).expect("write catalogue");

        let loader = CatalogLoader::new(&path, cutoff());
        let records = loader.load().expect("load catalogue");
        assert_eq!(records.len(), 2);
        assert_eq!(loader.path(), path.as_path());
    }

    #[test]
    fn test_load_missing_file() {
        let loader = CatalogLoader::new("/nonexistent/gpu_database.json", cutoff());
        let result = loader.load();
        assert!(matches!(result, Err(CatalogError::LoadError { .. })));
    }
}
