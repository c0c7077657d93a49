//! Per-list document storage.
//!
//! Every list lives in its own JSON document named after the list. Writes
//! always overwrite the whole document.

use crate::{
    error::{ListError, Result},
    summary::{GpuSummary, ListDocument},
};
use gpudex_core::ListName;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Storage backend for named lists.
pub trait ListStorage {
    /// Write the whole document, replacing any previous copy.
    fn save(&self, document: &ListDocument) -> Result<()>;

    /// Remove the stored copy of a list. Removing a missing list is not an error.
    fn delete(&self, name: &ListName) -> Result<()>;

    /// Read every stored list, skipping documents that cannot be decoded.
    fn load_all(&self) -> Result<Vec<ListDocument>>;
}

/// Stores each list as `<directory>/<list name>.json`.
pub struct JsonDirStorage {
    directory: PathBuf,
}

/// Document as found on disk; the name may be absent in hand-written files.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDocument {
    list_name: Option<String>,
    #[serde(default)]
    gpus: Vec<GpuSummary>,
}

impl JsonDirStorage {
    /// Open the lists directory, creating it if absent.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub fn open(directory: impl Into<PathBuf>) -> Result<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(|e| ListError::Storage {
            path: directory.display().to_string(),
            source: e,
        })?;
        Ok(Self { directory })
    }

    /// Directory holding the list documents.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the document for a list.
    #[must_use]
    pub fn path_for(&self, name: &ListName) -> PathBuf {
        self.directory.join(format!("{}.json", name.as_str()))
    }

    fn read_document(path: &Path) -> Result<ListDocument> {
        let contents = fs::read_to_string(path).map_err(|e| ListError::Storage {
            path: path.display().to_string(),
            source: e,
        })?;

        let stored: StoredDocument =
            serde_json::from_str(&contents).map_err(|e| ListError::Document {
                path: path.display().to_string(),
                source: e,
            })?;

        let name = match stored.list_name {
            Some(name) => name,
            None => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };

        Ok(ListDocument {
            list_name: ListName::new(name)?,
            gpus: stored.gpus,
        })
    }

    /// Move a document whose file name disagrees with its list name to
    /// [`JsonDirStorage::path_for`], so later saves and deletes hit the same file.
    ///
    /// An existing file at the target is left alone unless it differs from
    /// `path` only in case.
    fn relocate(&self, path: &Path, name: &ListName) {
        let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            return;
        };
        if stem == name.as_str() {
            return;
        }

        let target = self.path_for(name);
        let case_only = stem.to_lowercase() == name.as_str().to_lowercase();
        if target.exists() && !case_only {
            warn!(
                path = %path.display(),
                target = %target.display(),
                "list document name differs from its file, target already exists"
            );
            return;
        }

        match fs::rename(path, &target) {
            Ok(()) => info!(
                list = %name,
                from = %path.display(),
                to = %target.display(),
                "moved list document to match its name"
            ),
            Err(e) => warn!(path = %path.display(), error = %e, "could not move list document"),
        }
    }
}

impl ListStorage for JsonDirStorage {
    fn save(&self, document: &ListDocument) -> Result<()> {
        let path = self.path_for(&document.list_name);
        let contents =
            serde_json::to_string_pretty(document).map_err(|e| ListError::Document {
                path: path.display().to_string(),
                source: e,
            })?;

        fs::write(&path, contents).map_err(|e| ListError::Storage {
            path: path.display().to_string(),
            source: e,
        })?;

        debug!(list = %document.list_name, entries = document.gpus.len(), "saved list document");
        Ok(())
    }

    fn delete(&self, name: &ListName) -> Result<()> {
        let path = self.path_for(name);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(list = %name, "deleted list document");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ListError::Storage {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }

    fn load_all(&self) -> Result<Vec<ListDocument>> {
        let entries = match fs::read_dir(&self.directory) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(ListError::Storage {
                    path: self.directory.display().to_string(),
                    source: e,
                })
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            match Self::read_document(&path) {
                Ok(document) => {
                    self.relocate(&path, &document.list_name);
                    documents.push(document);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable list document");
                }
            }
        }

        info!(
            count = documents.len(),
            directory = %self.directory.display(),
            "loaded list documents"
        );

        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn document(name: &str, entries: &[&str]) -> ListDocument {
        ListDocument {
            list_name: ListName::new(name).expect("valid name"),
            gpus: entries
                .iter()
                .map(|n| GpuSummary::from(&gpudex_catalog::GpuRecord::named(*n)))
                .collect(),
        }
    }

    #[test]
    fn test_open_creates_directory() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let directory = temp_dir.path().join("saved_lists");

        let storage = JsonDirStorage::open(&directory).expect("open storage");
        assert!(directory.is_dir());
        assert_eq!(storage.directory(), directory.as_path());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let storage = JsonDirStorage::open(temp_dir.path()).expect("open storage");

        let saved = document("Gaming Rigs", &["GeForce RTX 4070", "Radeon RX 7800 XT"]);
        storage.save(&saved).expect("save list");
        assert!(temp_dir.path().join("Gaming Rigs.json").exists());

        let loaded = storage.load_all().expect("load lists");
        assert_eq!(loaded, vec![saved]);
    }

    #[test]
    fn test_load_skips_invalid_documents() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let storage = JsonDirStorage::open(temp_dir.path()).expect("open storage");

        storage.save(&document("Good", &["Arc A770"])).expect("save list");
        fs::write(temp_dir.path().join("broken.json"), "{ not json").expect("write file");
        fs::write(temp_dir.path().join("notes.txt"), "ignored").expect("write file");

        let loaded = storage.load_all().expect("load lists");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].list_name.as_str(), "Good");
    }

    #[test]
    fn test_load_falls_back_to_file_stem() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let storage = JsonDirStorage::open(temp_dir.path()).expect("open storage");

        fs::write(
            temp_dir.path().join("Workstation.json"),
            r#"{"gpus": [{"name": "RTX A4000", "memorySize": 16.0}]}"#,
        )
        .expect("write file");

        let loaded = storage.load_all().expect("load lists");
        assert_eq!(loaded[0].list_name.as_str(), "Workstation");
        assert_eq!(loaded[0].gpus[0].memory_size, Some(16.0));
    }

    #[test]
    fn test_load_moves_document_to_its_list_name() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let storage = JsonDirStorage::open(temp_dir.path()).expect("open storage");

        fs::write(
            temp_dir.path().join("odd.json"),
            r#"{"listName": "Gaming", "gpus": []}"#,
        )
        .expect("write file");

        let loaded = storage.load_all().expect("load lists");
        assert_eq!(loaded[0].list_name.as_str(), "Gaming");
        assert!(!temp_dir.path().join("odd.json").exists());
        assert!(temp_dir.path().join("Gaming.json").exists());

        storage.delete(&loaded[0].list_name).expect("delete list");
        assert!(storage.load_all().expect("reload lists").is_empty());
    }

    #[test]
    fn test_load_keeps_document_when_target_taken() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let storage = JsonDirStorage::open(temp_dir.path()).expect("open storage");

        storage.save(&document("Gaming", &["Arc A770"])).expect("save list");
        fs::write(
            temp_dir.path().join("copy.json"),
            r#"{"listName": "Gaming", "gpus": []}"#,
        )
        .expect("write file");

        storage.load_all().expect("load lists");
        assert!(temp_dir.path().join("copy.json").exists());
        let kept = fs::read_to_string(temp_dir.path().join("Gaming.json")).expect("read list");
        assert!(kept.contains("Arc A770"));
    }

    #[test]
    fn test_delete_missing_is_ok() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let storage = JsonDirStorage::open(temp_dir.path()).expect("open storage");

        let name = ListName::new("Never Saved").expect("valid name");
        assert!(storage.delete(&name).is_ok());
    }
}
