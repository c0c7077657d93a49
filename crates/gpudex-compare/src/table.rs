//! Comparison table construction and rendering.

use crate::error::{CompareError, Result};
use gpudex_catalog::{CatalogStore, GpuRecord, RecordField, ValueFormat};
use std::fmt;
use tracing::debug;

/// Attribute rows in display order: label, field, number format.
pub const ATTRIBUTES: [(&str, RecordField, ValueFormat); 11] = [
    ("Architecture", RecordField::Architecture, ValueFormat::Raw),
    ("Base Clock (MHz)", RecordField::BaseClock, ValueFormat::Integer),
    ("Boost Clock (MHz)", RecordField::BoostClock, ValueFormat::Integer),
    ("Memory (GB)", RecordField::MemorySize, ValueFormat::OneDecimal),
    ("Memory Type", RecordField::MemoryType, ValueFormat::Raw),
    ("Memory Bus (bits)", RecordField::MemoryBus, ValueFormat::Integer),
    ("Bandwidth (GB/s)", RecordField::Bandwidth, ValueFormat::OneDecimal),
    ("Shading Units", RecordField::ShadingUnits, ValueFormat::Integer),
    ("FP32 (GFLOPs)", RecordField::Fp32, ValueFormat::TwoDecimal),
    ("TDP (W)", RecordField::Tdp, ValueFormat::Raw),
    ("Suggested PSU (W)", RecordField::SuggestedPsu, ValueFormat::Raw),
];

const LABEL_WIDTH: usize = 25;
const VALUE_WIDTH: usize = 24;
const HEADER_NAME_LIMIT: usize = 23;
const RULE_WIDTH: usize = 75;

/// One rendered attribute row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    /// Attribute label
    pub label: &'static str,
    /// Value for the first record
    pub left: String,
    /// Value for the second record
    pub right: String,
}

/// Two records side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonTable {
    /// First record's full name
    pub left: String,
    /// Second record's full name
    pub right: String,
    /// One row per entry of [`ATTRIBUTES`]
    pub rows: Vec<ComparisonRow>,
}

/// Look up both names exactly and build their comparison.
///
/// # Errors
/// Returns [`CompareError::NotFound`] if either name has no exact match.
pub fn compare(store: &CatalogStore, first: &str, second: &str) -> Result<ComparisonTable> {
    let not_found = || CompareError::NotFound {
        first: first.trim().to_string(),
        second: second.trim().to_string(),
    };

    let left = store.find_exact(first).map_err(|_| not_found())?;
    let right = store.find_exact(second).map_err(|_| not_found())?;

    debug!(left = %left.name, right = %right.name, "comparing records");
    Ok(ComparisonTable::build(left, right))
}

impl ComparisonTable {
    /// Build the table for two records.
    #[must_use]
    pub fn build(left: &GpuRecord, right: &GpuRecord) -> Self {
        let rows = ATTRIBUTES
            .iter()
            .map(|&(label, field, format)| ComparisonRow {
                label,
                left: field.value(left).render(format),
                right: field.value(right).render(format),
            })
            .collect();

        Self {
            left: left.name.clone(),
            right: right.name.clone(),
            rows,
        }
    }
}

/// Shorten a column header to fit its column.
fn header_name(name: &str) -> String {
    if name.chars().count() > HEADER_NAME_LIMIT {
        let head: String = name.chars().take(HEADER_NAME_LIMIT).collect();
        format!("{head}..")
    } else {
        name.to_string()
    }
}

impl fmt::Display for ComparisonTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = " GPU COMPARISON ";
        writeln!(f, "{title:=^RULE_WIDTH$}")?;
        writeln!(
            f,
            "{:<LABEL_WIDTH$} {:<LABEL_WIDTH$} {:<LABEL_WIDTH$}",
            "Specification",
            header_name(&self.left),
            header_name(&self.right)
        )?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;

        for row in &self.rows {
            writeln!(
                f,
                "{:<LABEL_WIDTH$} {:<VALUE_WIDTH$} {:<VALUE_WIDTH$}",
                row.label, row.left, row.right
            )?;
        }

        writeln!(f, "{}", "=".repeat(RULE_WIDTH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rtx_3060() -> GpuRecord {
        let mut record = GpuRecord::named("GeForce RTX 3060");
        record.architecture = Some("Ampere".to_string());
        record.base_clock = Some(1320);
        record.boost_clock = Some(1777);
        record.memory_size = Some(12.0);
        record.memory_type = Some("GDDR6".to_string());
        record.memory_bus = Some(192);
        record.bandwidth = Some(360.0);
        record.shading_units = Some(3584);
        record.fp32 = Some(12_740.0);
        record.tdp = Some("170".to_string());
        record.suggested_psu = Some("450".to_string());
        record
    }

    fn store() -> CatalogStore {
        CatalogStore::new(vec![
            rtx_3060(),
            GpuRecord::named("Radeon RX 7900 XTX Limited Edition"),
        ])
    }

    #[test]
    fn test_self_comparison_rows_match() {
        let table = compare(&store(), "geforce rtx 3060", "GeForce RTX 3060").expect("compare");

        assert_eq!(table.rows.len(), ATTRIBUTES.len());
        for row in &table.rows {
            assert_eq!(row.left, row.right, "row {}", row.label);
        }
    }

    #[test]
    fn test_value_formats() {
        let table = ComparisonTable::build(&rtx_3060(), &GpuRecord::named("Unknown"));
        let value = |label: &str| {
            table
                .rows
                .iter()
                .find(|row| row.label == label)
                .map(|row| (row.left.clone(), row.right.clone()))
                .expect("row present")
        };

        assert_eq!(value("Base Clock (MHz)"), ("1320".to_string(), "N/A".to_string()));
        assert_eq!(value("Memory (GB)").0, "12.0");
        assert_eq!(value("FP32 (GFLOPs)").0, "12740.00");
        assert_eq!(value("Suggested PSU (W)").0, "450");
    }

    #[test]
    fn test_missing_either_name_fails_once() {
        let store = store();
        for (first, second) in [("GeForce RTX 3060", "Voodoo"), ("Voodoo", "GeForce RTX 3060")] {
            let result = compare(&store, first, second);
            assert!(matches!(result, Err(CompareError::NotFound { .. })));
        }
    }

    #[test]
    fn test_render_truncates_long_headers() {
        let table = compare(
            &store(),
            "GeForce RTX 3060",
            "Radeon RX 7900 XTX Limited Edition",
        )
        .expect("compare");
        let rendered = table.to_string();

        assert!(rendered.contains("Radeon RX 7900 XTX Limi.."));
        assert!(!rendered.contains("Limited Edition"));

        let row = rendered
            .lines()
            .find(|line| line.starts_with("Memory (GB)"))
            .expect("memory row");
        assert_eq!(row.trim_end(), format!("{:<25} {:<24} N/A", "Memory (GB)", "12.0"));
    }
}
