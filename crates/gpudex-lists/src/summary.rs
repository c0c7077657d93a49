//! List entries and the persisted list document.

use gpudex_catalog::GpuRecord;
use gpudex_core::ListName;
use serde::{Deserialize, Serialize};

/// A reduced, independently owned copy of a catalogue record.
///
/// Summaries are snapshots taken when a GPU is added to a list. Absent
/// fields are omitted from the persisted document rather than written as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpuSummary {
    /// GPU name
    pub name: String,
    /// Shader / CUDA core count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shading_units: Option<u32>,
    /// Thermal design power, as listed (watts)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tdp: Option<String>,
    /// VRAM size in GB
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_size: Option<f64>,
    /// Memory technology
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_type: Option<String>,
    /// Memory bus width in bits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_bus: Option<u32>,
    /// Memory bandwidth in GB/s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<f64>,
    /// Single-precision throughput in GFLOP/s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fp32: Option<f64>,
    /// Base clock in MHz
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_clock: Option<u32>,
    /// Boost clock in MHz
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost_clock: Option<u32>,
}

impl From<&GpuRecord> for GpuSummary {
    fn from(record: &GpuRecord) -> Self {
        Self {
            name: record.name.clone(),
            shading_units: record.shading_units,
            tdp: record.tdp.clone(),
            memory_size: record.memory_size,
            memory_type: record.memory_type.clone(),
            memory_bus: record.memory_bus,
            bandwidth: record.bandwidth,
            fp32: record.fp32,
            base_clock: record.base_clock,
            boost_clock: record.boost_clock,
        }
    }
}

impl GpuSummary {
    /// One-line form used by list status views.
    #[must_use]
    pub fn compact_line(&self) -> String {
        format!(
            "{} | {} GB {} | {} W",
            self.name,
            self.memory_size.map_or_else(na, |v| format!("{v:.1}")),
            self.memory_type.as_deref().unwrap_or("N/A"),
            self.tdp.as_deref().unwrap_or("N/A"),
        )
    }
}

fn na() -> String {
    "N/A".to_string()
}

/// The on-disk and export shape of a named list: `{listName, gpus}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocument {
    /// List name, original casing
    pub list_name: ListName,
    /// Entries in list order
    #[serde(default)]
    pub gpus: Vec<GpuSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> GpuSummary {
        GpuSummary {
            name: "GeForce RTX 3060".to_string(),
            shading_units: Some(3584),
            tdp: Some("170".to_string()),
            memory_size: Some(12.0),
            memory_type: Some("GDDR6".to_string()),
            memory_bus: Some(192),
            bandwidth: Some(360.0),
            fp32: Some(12740.0),
            base_clock: Some(1320),
            boost_clock: Some(1777),
        }
    }

    #[test]
    fn test_summary_from_record() {
        let mut record = GpuRecord::named("Radeon RX 6600");
        record.memory_size = Some(8.0);
        record.tdp = Some("132".to_string());
        record.architecture = Some("RDNA 2".to_string());

        let summary = GpuSummary::from(&record);
        assert_eq!(summary.name, "Radeon RX 6600");
        assert_eq!(summary.memory_size, Some(8.0));
        assert_eq!(summary.tdp.as_deref(), Some("132"));
        assert_eq!(summary.shading_units, None);
    }

    #[test]
    fn test_summary_serializes_camel_case_without_nulls() {
        let mut summary = summary();
        summary.fp32 = None;

        let json = serde_json::to_value(&summary).expect("serialize summary");
        assert_eq!(json["shadingUnits"], 3584);
        assert_eq!(json["memoryType"], "GDDR6");
        assert_eq!(json["boostClock"], 1777);
        assert!(json.get("fp32").is_none());
    }

    #[test]
    fn test_document_shape() {
        let document = ListDocument {
            list_name: ListName::new("Budget Picks").expect("valid name"),
            gpus: vec![summary()],
        };

        let json = serde_json::to_value(&document).expect("serialize document");
        assert_eq!(json["listName"], "Budget Picks");
        assert_eq!(json["gpus"][0]["name"], "GeForce RTX 3060");

        let restored: ListDocument = serde_json::from_value(json).expect("deserialize document");
        assert_eq!(restored, document);
    }

    #[test]
    fn test_compact_line() {
        assert_eq!(
            summary().compact_line(),
            "GeForce RTX 3060 | 12.0 GB GDDR6 | 170 W"
        );

        let bare = GpuSummary::from(&GpuRecord::named("Arc A380"));
        assert_eq!(bare.compact_line(), "Arc A380 | N/A GB N/A | N/A W");
    }
}
