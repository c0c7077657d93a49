//! Catalogue record types.
//!
//! [`GpuRecord`] mirrors one entry of the catalogue JSON. Fields are read
//! through the explicit [`RecordField`] table rather than by name lookup at
//! runtime, so every displayable attribute is known at compile time.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One hardware specification record.
///
/// Field names follow the snake_case keys of the catalogue data set. Unknown
/// keys are ignored; numeric fields tolerate strings and floats the way the
/// data set occasionally encodes them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpuRecord {
    /// Optional catalogue identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Unique display name (e.g., "GeForce RTX 3060")
    pub name: String,

    /// Graphics processor code name (e.g., "GA106")
    #[serde(deserialize_with = "lenient::text")]
    pub gpu_name: Option<String>,

    /// Vendor
    #[serde(deserialize_with = "lenient::text")]
    pub manufacturer: Option<String>,

    /// Product generation
    #[serde(deserialize_with = "lenient::text")]
    pub generation: Option<String>,

    /// Micro-architecture
    #[serde(deserialize_with = "lenient::text")]
    pub architecture: Option<String>,

    /// Fabrication foundry
    #[serde(deserialize_with = "lenient::text")]
    pub foundry: Option<String>,

    /// Process node in nanometres
    #[serde(deserialize_with = "lenient::whole")]
    pub process_size_nm: Option<u32>,

    /// Release date, `YYYY-MM-DD`
    #[serde(deserialize_with = "lenient::text")]
    pub release_date: Option<String>,

    /// Host bus interface
    #[serde(deserialize_with = "lenient::text")]
    pub bus_interface: Option<String>,

    /// Base clock in MHz
    #[serde(rename = "base_clock_mhz", deserialize_with = "lenient::whole")]
    pub base_clock: Option<u32>,

    /// Boost clock in MHz
    #[serde(rename = "boost_clock_mhz", deserialize_with = "lenient::whole")]
    pub boost_clock: Option<u32>,

    /// Memory clock in MHz
    #[serde(deserialize_with = "lenient::decimal")]
    pub memory_clock_mhz: Option<f64>,

    /// Memory size in GB
    #[serde(rename = "memory_size_gb", deserialize_with = "lenient::decimal")]
    pub memory_size: Option<f64>,

    /// Memory bus width in bits
    #[serde(rename = "memory_bus_bits", deserialize_with = "lenient::whole")]
    pub memory_bus: Option<u32>,

    /// Memory technology (e.g., "GDDR6")
    #[serde(deserialize_with = "lenient::text")]
    pub memory_type: Option<String>,

    /// Memory bandwidth in GB/s
    #[serde(rename = "memory_bandwidth_gb_s", deserialize_with = "lenient::decimal")]
    pub bandwidth: Option<f64>,

    /// Shading unit count
    #[serde(deserialize_with = "lenient::whole")]
    pub shading_units: Option<u32>,

    /// Texture mapping unit count
    #[serde(deserialize_with = "lenient::whole")]
    pub texture_mapping_units: Option<u32>,

    /// Render output unit count
    #[serde(deserialize_with = "lenient::whole")]
    pub render_output_processors: Option<u32>,

    /// Tensor core count
    #[serde(deserialize_with = "lenient::whole")]
    pub tensor_cores: Option<u32>,

    /// Ray tracing core count
    #[serde(deserialize_with = "lenient::whole")]
    pub ray_tracing_cores: Option<u32>,

    /// L2 cache in MB
    #[serde(deserialize_with = "lenient::decimal")]
    pub l2_cache_mb: Option<f64>,

    /// Thermal design power, kept as text because the data set mixes formats
    #[serde(rename = "thermal_design_power_w", deserialize_with = "lenient::text")]
    pub tdp: Option<String>,

    /// Board length in mm
    #[serde(deserialize_with = "lenient::decimal")]
    pub board_length_mm: Option<f64>,

    /// Suggested power supply rating
    #[serde(rename = "suggested_psu_w", deserialize_with = "lenient::text")]
    pub suggested_psu: Option<String>,

    /// Power connectors
    #[serde(deserialize_with = "lenient::text")]
    pub power_connectors: Option<String>,

    /// Display outputs
    #[serde(deserialize_with = "lenient::text")]
    pub display_connectors: Option<String>,

    /// Single-precision throughput in GFLOP/s
    #[serde(
        rename = "single_float_performance_gflop_s",
        deserialize_with = "lenient::decimal"
    )]
    pub fp32: Option<f64>,
}

impl GpuRecord {
    /// Create a record carrying only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Read a field through the accessor table.
    #[must_use]
    pub fn field(&self, field: RecordField) -> FieldValue {
        field.value(self)
    }
}

/// A field value extracted from a record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Whole number
    Integer(i64),
    /// Decimal number
    Float(f64),
    /// Free text
    Text(String),
    /// The record has no value for this field
    Missing,
}

/// How a field value is rendered as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// No decimals
    Integer,
    /// One decimal place
    OneDecimal,
    /// Two decimal places
    TwoDecimal,
    /// As stored
    Raw,
}

impl FieldValue {
    /// Placeholder used for missing values.
    pub const PLACEHOLDER: &'static str = "N/A";

    /// Whether the record had no value.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Render with the given format, substituting `N/A` for missing values.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn render(&self, format: ValueFormat) -> String {
        match (self, format) {
            (Self::Missing, _) => Self::PLACEHOLDER.to_string(),
            (Self::Text(text), _) => text.clone(),
            (Self::Integer(value), ValueFormat::Integer | ValueFormat::Raw) => value.to_string(),
            (Self::Integer(value), ValueFormat::OneDecimal) => format!("{:.1}", *value as f64),
            (Self::Integer(value), ValueFormat::TwoDecimal) => format!("{:.2}", *value as f64),
            (Self::Float(value), ValueFormat::Integer) => format!("{value:.0}"),
            (Self::Float(value), ValueFormat::OneDecimal) => format!("{value:.1}"),
            (Self::Float(value), ValueFormat::TwoDecimal) => format!("{value:.2}"),
            (Self::Float(value), ValueFormat::Raw) => value.to_string(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(ValueFormat::Raw))
    }
}

/// Every displayable record attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    /// Vendor
    Manufacturer,
    /// Product generation
    Generation,
    /// Micro-architecture
    Architecture,
    /// Release date
    ReleaseDate,
    /// Process node
    ProcessSize,
    /// Base clock
    BaseClock,
    /// Boost clock
    BoostClock,
    /// Memory clock
    MemoryClock,
    /// Memory size
    MemorySize,
    /// Memory technology
    MemoryType,
    /// Memory bus width
    MemoryBus,
    /// Memory bandwidth
    Bandwidth,
    /// Shading unit count
    ShadingUnits,
    /// Tensor core count
    TensorCores,
    /// Ray tracing core count
    RayTracingCores,
    /// FP32 throughput
    Fp32,
    /// Thermal design power
    Tdp,
    /// Suggested power supply
    SuggestedPsu,
    /// Power connectors
    PowerConnectors,
}

impl RecordField {
    /// All fields, in display order.
    pub const ALL: [RecordField; 19] = [
        Self::Manufacturer,
        Self::Generation,
        Self::Architecture,
        Self::ReleaseDate,
        Self::ProcessSize,
        Self::BaseClock,
        Self::BoostClock,
        Self::MemoryClock,
        Self::MemorySize,
        Self::MemoryType,
        Self::MemoryBus,
        Self::Bandwidth,
        Self::ShadingUnits,
        Self::TensorCores,
        Self::RayTracingCores,
        Self::Fp32,
        Self::Tdp,
        Self::SuggestedPsu,
        Self::PowerConnectors,
    ];

    /// Machine-readable key, accepted by [`RecordField::from_str`].
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Manufacturer => "manufacturer",
            Self::Generation => "generation",
            Self::Architecture => "architecture",
            Self::ReleaseDate => "release_date",
            Self::ProcessSize => "process_size",
            Self::BaseClock => "base_clock",
            Self::BoostClock => "boost_clock",
            Self::MemoryClock => "memory_clock",
            Self::MemorySize => "memory_size",
            Self::MemoryType => "memory_type",
            Self::MemoryBus => "memory_bus",
            Self::Bandwidth => "bandwidth",
            Self::ShadingUnits => "shading_units",
            Self::TensorCores => "tensor_cores",
            Self::RayTracingCores => "ray_tracing_cores",
            Self::Fp32 => "fp32",
            Self::Tdp => "tdp",
            Self::SuggestedPsu => "suggested_psu",
            Self::PowerConnectors => "power_connectors",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Manufacturer => "Manufacturer",
            Self::Generation => "Generation",
            Self::Architecture => "Architecture",
            Self::ReleaseDate => "Release Date",
            Self::ProcessSize => "Process Size",
            Self::BaseClock => "Base Clock",
            Self::BoostClock => "Boost Clock",
            Self::MemoryClock => "Memory Clock",
            Self::MemorySize => "Memory Size",
            Self::MemoryType => "Memory Type",
            Self::MemoryBus => "Memory Bus",
            Self::Bandwidth => "Bandwidth",
            Self::ShadingUnits => "Shading Units",
            Self::TensorCores => "Tensor Cores",
            Self::RayTracingCores => "RT Cores",
            Self::Fp32 => "FP32",
            Self::Tdp => "TDP",
            Self::SuggestedPsu => "Suggested PSU",
            Self::PowerConnectors => "Power Connectors",
        }
    }

    /// Unit suffix, if the field has one.
    #[must_use]
    pub fn unit(&self) -> Option<&'static str> {
        match self {
            Self::ProcessSize => Some("nm"),
            Self::BaseClock | Self::BoostClock | Self::MemoryClock => Some("MHz"),
            Self::MemorySize => Some("GB"),
            Self::MemoryBus => Some("bits"),
            Self::Bandwidth => Some("GB/s"),
            Self::Fp32 => Some("GFLOPs"),
            Self::Tdp | Self::SuggestedPsu => Some("W"),
            _ => None,
        }
    }

    /// Extract this field from a record.
    #[must_use]
    pub fn value(&self, record: &GpuRecord) -> FieldValue {
        match self {
            Self::Manufacturer => text(record.manufacturer.as_ref()),
            Self::Generation => text(record.generation.as_ref()),
            Self::Architecture => text(record.architecture.as_ref()),
            Self::ReleaseDate => text(record.release_date.as_ref()),
            Self::ProcessSize => whole(record.process_size_nm),
            Self::BaseClock => whole(record.base_clock),
            Self::BoostClock => whole(record.boost_clock),
            Self::MemoryClock => decimal(record.memory_clock_mhz),
            Self::MemorySize => decimal(record.memory_size),
            Self::MemoryType => text(record.memory_type.as_ref()),
            Self::MemoryBus => whole(record.memory_bus),
            Self::Bandwidth => decimal(record.bandwidth),
            Self::ShadingUnits => whole(record.shading_units),
            Self::TensorCores => whole(record.tensor_cores),
            Self::RayTracingCores => whole(record.ray_tracing_cores),
            Self::Fp32 => decimal(record.fp32),
            Self::Tdp => text(record.tdp.as_ref()),
            Self::SuggestedPsu => text(record.suggested_psu.as_ref()),
            Self::PowerConnectors => text(record.power_connectors.as_ref()),
        }
    }
}

impl FromStr for RecordField {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.key() == wanted)
            .ok_or_else(|| CatalogError::UnknownField(s.to_string()))
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn text(value: Option<&String>) -> FieldValue {
    value.map_or(FieldValue::Missing, |v| FieldValue::Text(v.clone()))
}

fn whole(value: Option<u32>) -> FieldValue {
    value.map_or(FieldValue::Missing, |v| FieldValue::Integer(i64::from(v)))
}

fn decimal(value: Option<f64>) -> FieldValue {
    value.map_or(FieldValue::Missing, FieldValue::Float)
}

/// Tolerant decoders for the catalogue's loosely typed columns.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
        .filter(|v: &f64| v.is_finite()))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn whole<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        let as_float = match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(n)) => {
                if let Some(v) = n.as_u64() {
                    return Ok(u32::try_from(v).ok());
                }
                n.as_f64()
            }
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        Ok(as_float
            .filter(|v| v.is_finite() && *v >= 0.0 && *v <= f64::from(u32::MAX))
            .map(|v| v.round() as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> GpuRecord {
        serde_json::from_str(
            r#"{
                "name": "GeForce RTX 3060",
                "gpu_name": "GA106",
                "manufacturer": "NVIDIA",
                "architecture": "Ampere",
                "release_date": "2021-01-12",
                "base_clock_mhz": 1320,
                "boost_clock_mhz": 1777.0,
                "memory_size_gb": 12,
                "memory_bus_bits": "192",
                "memory_type": "GDDR6",
                "memory_bandwidth_gb_s": 360.0,
                "shading_units": 3584,
                "thermal_design_power_w": 170,
                "suggested_psu_w": "450",
                "single_float_performance_gflop_s": 12740.0,
                "board_slot_width": "Dual-slot"
            }"#,
        )
        .expect("parse sample record")
    }

    #[test]
    fn test_record_lenient_decoding() {
        let record = sample_record();
        assert_eq!(record.name, "GeForce RTX 3060");
        assert_eq!(record.boost_clock, Some(1777));
        assert_eq!(record.memory_bus, Some(192));
        assert_eq!(record.memory_size, Some(12.0));
        assert_eq!(record.tdp.as_deref(), Some("170"));
        assert_eq!(record.suggested_psu.as_deref(), Some("450"));
        assert_eq!(record.foundry, None);
    }

    #[test]
    fn test_record_null_and_blank_fields() {
        let record: GpuRecord = serde_json::from_str(
            r#"{"name": "Radeon RX 6600", "memory_type": "", "shading_units": null}"#,
        )
        .expect("parse record");
        assert_eq!(record.memory_type, None);
        assert_eq!(record.shading_units, None);
    }

    #[test]
    fn test_field_accessors() {
        let record = sample_record();
        assert_eq!(
            record.field(RecordField::Architecture),
            FieldValue::Text("Ampere".to_string())
        );
        assert_eq!(
            record.field(RecordField::ShadingUnits),
            FieldValue::Integer(3584)
        );
        assert_eq!(record.field(RecordField::Fp32), FieldValue::Float(12740.0));
        assert!(record.field(RecordField::TensorCores).is_missing());
    }

    #[test]
    fn test_field_from_str() {
        for field in RecordField::ALL {
            let parsed: RecordField = field.key().parse().expect("parse field key");
            assert_eq!(parsed, field);
        }

        let unknown = "transistor_magic".parse::<RecordField>();
        assert!(matches!(unknown, Err(CatalogError::UnknownField(_))));
    }

    #[test]
    fn test_value_rendering() {
        assert_eq!(FieldValue::Missing.render(ValueFormat::TwoDecimal), "N/A");
        assert_eq!(FieldValue::Integer(1320).render(ValueFormat::Integer), "1320");
        assert_eq!(FieldValue::Float(12.0).render(ValueFormat::OneDecimal), "12.0");
        assert_eq!(
            FieldValue::Float(12740.0).render(ValueFormat::TwoDecimal),
            "12740.00"
        );
        assert_eq!(
            FieldValue::Text("GDDR6".to_string()).render(ValueFormat::Integer),
            "GDDR6"
        );
    }
}
