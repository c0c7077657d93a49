//! Read-only renderings of the registry.

use crate::{registry::ListRegistry, registry::NamedList, summary::GpuSummary};
use gpudex_core::{ListName, MAX_LIST_SIZE};
use std::fmt;

/// Compact view of the active list: name, fill level, one line per entry.
#[derive(Debug)]
pub struct ListStatus<'a> {
    list: &'a NamedList,
}

/// Full per-entry dump of the active list.
#[derive(Debug)]
pub struct ListDetails<'a> {
    list: &'a NamedList,
}

/// One row of the all-lists overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOverview {
    /// List name
    pub name: ListName,
    /// Entry count
    pub size: usize,
    /// Whether this is the active list
    pub active: bool,
}

impl ListRegistry {
    /// Compact status of the active list.
    #[must_use]
    pub fn status(&self) -> Option<ListStatus<'_>> {
        self.active().map(|list| ListStatus { list })
    }

    /// Detailed view of the active list.
    #[must_use]
    pub fn details(&self) -> Option<ListDetails<'_>> {
        self.active().map(|list| ListDetails { list })
    }

    /// Every list with its size, sorted by name ignoring case.
    #[must_use]
    pub fn all_lists(&self) -> Vec<ListOverview> {
        let mut overview: Vec<ListOverview> = self
            .lists()
            .map(|list| ListOverview {
                name: list.name().clone(),
                size: list.len(),
                active: self.is_active(list),
            })
            .collect();
        overview.sort_by_key(|row| (row.name.key(), row.name.as_str().to_string()));
        overview
    }
}

impl fmt::Display for ListStatus<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Active list: {} ({}/{})",
            self.list.name(),
            self.list.len(),
            MAX_LIST_SIZE
        )?;

        if self.list.is_empty() {
            return writeln!(f, "  (empty)");
        }

        for (i, entry) in self.list.entries().iter().enumerate() {
            writeln!(f, "  {:>2}. {}", i + 1, entry.compact_line())?;
        }
        Ok(())
    }
}

impl fmt::Display for ListDetails<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "List: {} ({}/{})",
            self.list.name(),
            self.list.len(),
            MAX_LIST_SIZE
        )?;

        if self.list.is_empty() {
            return writeln!(f, "  (empty)");
        }

        for (i, entry) in self.list.entries().iter().enumerate() {
            writeln!(f)?;
            write_entry(f, i + 1, entry)?;
        }
        Ok(())
    }
}

fn write_entry(f: &mut fmt::Formatter<'_>, position: usize, entry: &GpuSummary) -> fmt::Result {
    writeln!(f, "{position}. {}", entry.name)?;
    writeln!(f, "   Shading Units:  {}", or_na(entry.shading_units))?;
    writeln!(
        f,
        "   Memory:         {} GB {}, {}-bit, {} GB/s",
        entry.memory_size.map_or_else(na, |v| format!("{v:.1}")),
        entry.memory_type.as_deref().unwrap_or("N/A"),
        or_na(entry.memory_bus),
        entry.bandwidth.map_or_else(na, |v| format!("{v:.1}")),
    )?;
    writeln!(
        f,
        "   FP32:           {} GFLOPs",
        entry.fp32.map_or_else(na, |v| format!("{v:.2}"))
    )?;
    writeln!(
        f,
        "   Clocks:         {} / {} MHz",
        or_na(entry.base_clock),
        or_na(entry.boost_clock)
    )?;
    writeln!(f, "   TDP:            {} W", entry.tdp.as_deref().unwrap_or("N/A"))
}

fn or_na(value: Option<u32>) -> String {
    value.map_or_else(na, |v| v.to_string())
}

fn na() -> String {
    "N/A".to_string()
}

impl fmt::Display for ListOverview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.active { "*" } else { " " };
        write!(f, "{marker} {} ({}/{})", self.name, self.size, MAX_LIST_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Result, storage::ListStorage, summary::ListDocument};
    use gpudex_catalog::{CatalogStore, GpuRecord, SearchEngine};

    struct NullStorage;

    impl ListStorage for NullStorage {
        fn save(&self, _document: &ListDocument) -> Result<()> {
            Ok(())
        }

        fn delete(&self, _name: &ListName) -> Result<()> {
            Ok(())
        }

        fn load_all(&self) -> Result<Vec<ListDocument>> {
            Ok(Vec::new())
        }
    }

    fn engine() -> SearchEngine {
        let mut record = GpuRecord::named("GeForce RTX 3060");
        record.memory_size = Some(12.0);
        record.memory_type = Some("GDDR6".to_string());
        record.memory_bus = Some(192);
        record.bandwidth = Some(360.0);
        record.tdp = Some("170".to_string());
        record.base_clock = Some(1320);
        record.boost_clock = Some(1777);
        SearchEngine::with_limits(CatalogStore::new(vec![record]), 30, 4)
    }

    #[test]
    fn test_status_view() {
        let mut registry = ListRegistry::new(Box::new(NullStorage));
        assert!(registry.status().is_none());

        registry.create("Budget").expect("create list");
        let status = registry.status().expect("active list").to_string();
        assert!(status.contains("Active list: Budget (0/20)"));
        assert!(status.contains("(empty)"));

        registry
            .add_to_active("GeForce RTX 3060", &engine())
            .expect("add GPU");
        let status = registry.status().expect("active list").to_string();
        assert!(status.contains(" 1. GeForce RTX 3060 | 12.0 GB GDDR6 | 170 W"));
    }

    #[test]
    fn test_details_view() {
        let mut registry = ListRegistry::new(Box::new(NullStorage));
        registry.create("Budget").expect("create list");
        registry
            .add_to_active("GeForce RTX 3060", &engine())
            .expect("add GPU");

        let details = registry.details().expect("active list").to_string();
        assert!(details.contains("1. GeForce RTX 3060"));
        assert!(details.contains("12.0 GB GDDR6, 192-bit, 360.0 GB/s"));
        assert!(details.contains("1320 / 1777 MHz"));
        assert!(details.contains("Shading Units:  N/A"));
    }

    #[test]
    fn test_all_lists_sorted_with_marker() {
        let mut registry = ListRegistry::new(Box::new(NullStorage));
        registry.create("zeta").expect("create list");
        registry.create("Alpha").expect("create list");
        registry.create("beta").expect("create list");
        registry.switch_active("alpha").expect("switch list");

        let rows: Vec<String> = registry.all_lists().iter().map(ToString::to_string).collect();
        assert_eq!(
            rows,
            vec!["* Alpha (0/20)", "  beta (0/20)", "  zeta (0/20)"]
        );
    }
}
