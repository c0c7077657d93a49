//! Immutable in-memory catalogue.

use crate::{
    error::{CatalogError, Result},
    record::GpuRecord,
};

/// The date-filtered record sequence, loaded once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    records: Vec<GpuRecord>,
}

impl CatalogStore {
    /// Wrap an already-filtered record sequence.
    #[must_use]
    pub fn new(records: Vec<GpuRecord>) -> Self {
        Self { records }
    }

    /// A catalogue with no records, used when loading fails.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// All records, in load order.
    #[must_use]
    pub fn records(&self) -> &[GpuRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalogue holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Exact-name lookup, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    /// Returns [`CatalogError::GpuNotFound`] if no record's name matches.
    pub fn find_exact(&self, name: &str) -> Result<&GpuRecord> {
        let wanted = name.trim().to_lowercase();
        self.records
            .iter()
            .find(|record| record.name.to_lowercase() == wanted)
            .ok_or_else(|| CatalogError::GpuNotFound {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CatalogStore {
        CatalogStore::new(vec![
            GpuRecord::named("GeForce RTX 3060"),
            GpuRecord::named("GeForce RTX 3060 Ti"),
            GpuRecord::named("Radeon RX 7600"),
        ])
    }

    #[test]
    fn test_find_exact_ignores_case() {
        let store = store();
        let record = store.find_exact("geforce rtx 3060").expect("find record");
        assert_eq!(record.name, "GeForce RTX 3060");

        let record = store.find_exact("  RADEON RX 7600 ").expect("find record");
        assert_eq!(record.name, "Radeon RX 7600");
    }

    #[test]
    fn test_find_exact_is_not_substring() {
        let store = store();
        let result = store.find_exact("RTX 3060");
        assert!(matches!(result, Err(CatalogError::GpuNotFound { .. })));
    }

    #[test]
    fn test_empty_store() {
        let store = CatalogStore::empty();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.find_exact("anything").is_err());
    }
}
