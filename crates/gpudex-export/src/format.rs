//! Export formats.

use crate::error::ExportError;
use std::fmt;
use std::str::FromStr;

/// Output format for `list export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// `{listName, gpus}` document
    #[default]
    Json,
    /// Spreadsheet with a frozen header row
    Xlsx,
    /// Comma-separated table with the spreadsheet's columns
    Csv,
}

impl ExportFormat {
    /// File extension, without the dot.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "xlsx" | "excel" => Ok(Self::Xlsx),
            "csv" => Ok(Self::Csv),
            _ => Err(ExportError::UnknownFormat(s.trim().to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        assert_eq!("JSON".parse::<ExportFormat>().expect("parse"), ExportFormat::Json);
        assert_eq!(" xlsx ".parse::<ExportFormat>().expect("parse"), ExportFormat::Xlsx);
        assert_eq!("excel".parse::<ExportFormat>().expect("parse"), ExportFormat::Xlsx);
        assert_eq!("csv".parse::<ExportFormat>().expect("parse"), ExportFormat::Csv);
    }

    #[test]
    fn test_unknown_format() {
        let result = "pdf".parse::<ExportFormat>();
        assert!(matches!(result, Err(ExportError::UnknownFormat(f)) if f == "pdf"));
    }
}
