//! Writing lists to export files.

use crate::{
    error::{ExportError, Result},
    format::ExportFormat,
    table::{self, Cell, COLUMNS},
};
use gpudex_lists::NamedList;
use regex::Regex;
use rust_xlsxwriter::{Format, Workbook};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::info;

/// Writes snapshots of a named list to files under an output directory.
pub struct ExportEngine {
    output_dir: PathBuf,
}

impl ExportEngine {
    /// Create an engine writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Directory export files are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// File name used when the caller gives none: the list name with every
    /// character outside `[A-Za-z0-9]` replaced by `_`.
    #[must_use]
    pub fn default_filename(list_name: &str) -> String {
        static UNSAFE_CHARS: OnceLock<Regex> = OnceLock::new();
        let regex = UNSAFE_CHARS.get_or_init(|| Regex::new(r"[^A-Za-z0-9]").expect("valid regex"));
        regex.replace_all(list_name, "_").into_owned()
    }

    /// Resolve the target path, appending the format's extension if missing.
    ///
    /// # Errors
    /// Returns error if the given file name is blank.
    pub fn target_path(
        &self,
        list_name: &str,
        format: ExportFormat,
        filename: Option<&str>,
    ) -> Result<PathBuf> {
        let base = match filename.map(str::trim) {
            Some("") => {
                return Err(ExportError::InvalidFilename(
                    "file name must not be empty".to_string(),
                ))
            }
            Some(name) => name.to_string(),
            None => Self::default_filename(list_name),
        };

        let suffix = format!(".{}", format.extension());
        let file = if base.to_ascii_lowercase().ends_with(&suffix) {
            base
        } else {
            format!("{base}{suffix}")
        };

        Ok(self.output_dir.join(file))
    }

    /// Export a list and return the written path.
    ///
    /// # Errors
    /// Returns error if the list is empty or the file cannot be written.
    pub fn export(
        &self,
        list: &NamedList,
        format: ExportFormat,
        filename: Option<&str>,
    ) -> Result<PathBuf> {
        if list.is_empty() {
            return Err(ExportError::EmptyList {
                name: list.name().to_string(),
            });
        }

        let path = self.target_path(list.name().as_str(), format, filename)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ExportError::Io {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        match format {
            ExportFormat::Json => write_json(list, &path)?,
            ExportFormat::Xlsx => write_xlsx(list, &path)?,
            ExportFormat::Csv => write_csv(list, &path)?,
        }

        info!(
            list = %list.name(),
            format = %format,
            entries = list.len(),
            path = %path.display(),
            "exported list"
        );

        Ok(path)
    }
}

fn write_json(list: &NamedList, path: &Path) -> Result<()> {
    let contents = serde_json::to_string_pretty(&list.to_document())?;
    fs::write(path, contents).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

fn write_xlsx(list: &NamedList, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name("GPU List")?;

    for (col, title) in (0u16..).zip(COLUMNS) {
        sheet.write_string_with_format(0, col, title, &header)?;
    }

    for (row, entry) in (1u32..).zip(list.entries()) {
        for (col, cell) in (0u16..).zip(table::row(entry)) {
            match cell {
                Cell::Text(text) => sheet.write_string(row, col, text)?,
                Cell::Number(value) => sheet.write_number(row, col, value)?,
            };
        }
    }

    sheet.set_freeze_panes(1, 0)?;
    sheet.autofit();

    workbook.save(path)?;
    Ok(())
}

fn write_csv(list: &NamedList, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(COLUMNS)?;

    for entry in list.entries() {
        let fields: Vec<String> = table::row(entry).iter().map(Cell::to_text).collect();
        writer.write_record(&fields)?;
    }

    writer.flush().map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filename() {
        assert_eq!(ExportEngine::default_filename("My Picks!"), "My_Picks_");
        assert_eq!(ExportEngine::default_filename("rtx-4070.ti"), "rtx_4070_ti");
        assert_eq!(ExportEngine::default_filename("Plain123"), "Plain123");
    }

    #[test]
    fn test_target_path_extension() {
        let engine = ExportEngine::new("out");

        let path = engine
            .target_path("Budget Build", ExportFormat::Json, None)
            .expect("default path");
        assert_eq!(path, PathBuf::from("out").join("Budget_Build.json"));

        let path = engine
            .target_path("ignored", ExportFormat::Xlsx, Some("report.XLSX"))
            .expect("explicit path");
        assert_eq!(path, PathBuf::from("out").join("report.XLSX"));

        let path = engine
            .target_path("ignored", ExportFormat::Csv, Some("report"))
            .expect("explicit path");
        assert_eq!(path, PathBuf::from("out").join("report.csv"));

        assert!(matches!(
            engine.target_path("ignored", ExportFormat::Json, Some("  ")),
            Err(ExportError::InvalidFilename(_))
        ));
    }
}
