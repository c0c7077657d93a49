//! Tabular projection shared by the spreadsheet and CSV writers.

use gpudex_lists::GpuSummary;

/// Header row, in column order.
pub const COLUMNS: [&str; 10] = [
    "GPU Name",
    "Shading Units",
    "TDP(W)",
    "VRAM(GB)",
    "Memory Type",
    "Memory Bus(bits)",
    "Bandwidth(GB/s)",
    "FP32(GFLOPs)",
    "Base Clock(MHz)",
    "Boost Clock(MHz)",
];

/// Text written for missing text fields.
pub const TEXT_PLACEHOLDER: &str = "N/A";

/// One spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Text cell
    Text(String),
    /// Numeric cell
    Number(f64),
}

impl Cell {
    /// Plain-text form for CSV output.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(value) => value.to_string(),
        }
    }
}

/// Build the data row for one entry.
///
/// Missing numbers become 0 and missing text becomes [`TEXT_PLACEHOLDER`].
/// TDP is stored as text; it is written as a number when it parses as one
/// and as [`TEXT_PLACEHOLDER`] when absent.
#[must_use]
pub fn row(entry: &GpuSummary) -> Vec<Cell> {
    vec![
        Cell::Text(entry.name.clone()),
        whole(entry.shading_units),
        tdp(entry.tdp.as_deref()),
        decimal(entry.memory_size),
        text(entry.memory_type.as_deref()),
        whole(entry.memory_bus),
        decimal(entry.bandwidth),
        decimal(entry.fp32),
        whole(entry.base_clock),
        whole(entry.boost_clock),
    ]
}

fn whole(value: Option<u32>) -> Cell {
    Cell::Number(value.map_or(0.0, f64::from))
}

fn decimal(value: Option<f64>) -> Cell {
    Cell::Number(value.unwrap_or(0.0))
}

fn text(value: Option<&str>) -> Cell {
    Cell::Text(value.unwrap_or(TEXT_PLACEHOLDER).to_string())
}

fn tdp(value: Option<&str>) -> Cell {
    match value.map(str::trim) {
        None => Cell::Text(TEXT_PLACEHOLDER.to_string()),
        Some(raw) => raw
            .trim_end_matches(|c: char| c.eq_ignore_ascii_case(&'w'))
            .trim()
            .parse::<f64>()
            .map_or_else(|_| Cell::Text(raw.to_string()), Cell::Number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_fills_missing_values() {
        let entry = GpuSummary {
            name: "Arc A380".to_string(),
            shading_units: Some(1024),
            tdp: None,
            memory_size: Some(6.0),
            memory_type: None,
            memory_bus: None,
            bandwidth: None,
            fp32: None,
            base_clock: None,
            boost_clock: Some(2050),
        };

        let cells = row(&entry);
        assert_eq!(cells.len(), COLUMNS.len());
        assert_eq!(cells[0], Cell::Text("Arc A380".to_string()));
        assert_eq!(cells[1], Cell::Number(1024.0));
        assert_eq!(cells[2], Cell::Text("N/A".to_string()));
        assert_eq!(cells[4], Cell::Text("N/A".to_string()));
        assert_eq!(cells[7], Cell::Number(0.0));
        assert_eq!(cells[9], Cell::Number(2050.0));
    }

    #[test]
    fn test_tdp_parsing() {
        assert_eq!(tdp(Some("170")), Cell::Number(170.0));
        assert_eq!(tdp(Some(" 75 W")), Cell::Number(75.0));
        assert_eq!(tdp(Some("unknown")), Cell::Text("unknown".to_string()));
        assert_eq!(tdp(None), Cell::Text(TEXT_PLACEHOLDER.to_string()));
    }
}
