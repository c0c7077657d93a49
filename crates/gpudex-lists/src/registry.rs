//! The list registry: named lists, the active pointer, write-through persistence.

use crate::{
    error::{ListError, Result},
    storage::ListStorage,
    summary::{GpuSummary, ListDocument},
};
use gpudex_catalog::SearchEngine;
use gpudex_core::{ListName, MAX_LIST_SIZE};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Whether the on-disk copy matches memory after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    /// The document was written
    Saved,
    /// The write failed; memory holds the newer state
    Stale {
        /// Why the write failed
        reason: String,
    },
}

/// Outcome of a mutation that has been applied in memory.
///
/// The mutation is never rolled back when persisting fails; callers check
/// [`Applied::persistence`] to warn that the stored copy may be stale.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied<T> {
    /// Operation result
    pub value: T,
    /// Outcome of the write that followed
    pub persistence: Persistence,
}

impl<T> Applied<T> {
    /// Whether the on-disk copy may be behind memory.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        matches!(self.persistence, Persistence::Stale { .. })
    }
}

/// A named, ordered, size-bounded collection of GPU summaries.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedList {
    name: ListName,
    entries: Vec<GpuSummary>,
}

impl NamedList {
    /// An empty list.
    #[must_use]
    pub fn new(name: ListName) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &ListName {
        &self.name
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[GpuSummary] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether another entry would exceed [`MAX_LIST_SIZE`].
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_LIST_SIZE
    }

    /// Snapshot in the persisted document shape.
    #[must_use]
    pub fn to_document(&self) -> ListDocument {
        ListDocument {
            list_name: self.name.clone(),
            gpus: self.entries.clone(),
        }
    }
}

/// Result of adding a GPU to the active list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Added {
    /// Name of the GPU that was added
    pub gpu: String,
    /// List it was added to
    pub list: ListName,
    /// Entry count after the addition
    pub count: usize,
}

/// Owns every named list and the active-list pointer.
///
/// Lists are keyed by [`ListName::key`], so names compare case-insensitively
/// while keeping their original casing. The active pointer, when set, always
/// names a key present in the map.
pub struct ListRegistry {
    lists: HashMap<String, NamedList>,
    active: Option<String>,
    storage: Box<dyn ListStorage>,
}

impl ListRegistry {
    /// An empty registry writing through to the given storage.
    #[must_use]
    pub fn new(storage: Box<dyn ListStorage>) -> Self {
        Self {
            lists: HashMap::new(),
            active: None,
            storage,
        }
    }

    /// Create a registry and load every stored list.
    ///
    /// No list is active afterwards.
    ///
    /// # Errors
    /// Returns error if the storage cannot be enumerated.
    pub fn load(storage: Box<dyn ListStorage>) -> Result<Self> {
        let mut registry = Self::new(storage);
        registry.reload()?;
        Ok(registry)
    }

    /// Replace in-memory lists with the stored documents.
    ///
    /// The active pointer survives only if its list was reloaded. Documents
    /// whose name duplicates an already loaded list are skipped, and entries
    /// beyond [`MAX_LIST_SIZE`] are dropped.
    ///
    /// # Errors
    /// Returns error if the storage cannot be enumerated.
    pub fn reload(&mut self) -> Result<usize> {
        let documents = self.storage.load_all()?;
        let mut lists = HashMap::with_capacity(documents.len());

        for document in documents {
            let key = document.list_name.key();
            if lists.contains_key(&key) {
                warn!(list = %document.list_name, "skipping duplicate list document");
                continue;
            }

            let mut entries = document.gpus;
            if entries.len() > MAX_LIST_SIZE {
                warn!(
                    list = %document.list_name,
                    stored = entries.len(),
                    "list document exceeds the size limit, truncating"
                );
                entries.truncate(MAX_LIST_SIZE);
            }

            lists.insert(
                key,
                NamedList {
                    name: document.list_name,
                    entries,
                },
            );
        }

        self.lists = lists;
        if self
            .active
            .as_ref()
            .is_some_and(|key| !self.lists.contains_key(key))
        {
            self.active = None;
        }

        info!(count = self.lists.len(), "reloaded named lists");
        Ok(self.lists.len())
    }

    /// Number of lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Whether no lists exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Look up a list by name, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&NamedList> {
        self.lists.get(&ListName::normalize(name))
    }

    /// The active list, if any.
    #[must_use]
    pub fn active(&self) -> Option<&NamedList> {
        self.active.as_ref().and_then(|key| self.lists.get(key))
    }

    /// The active list, required to hold at least one entry.
    ///
    /// # Errors
    /// Returns [`ListError::NoActiveList`] or [`ListError::EmptyList`].
    pub fn active_entries(&self) -> Result<&NamedList> {
        let list = self.active().ok_or(ListError::NoActiveList)?;
        if list.is_empty() {
            return Err(ListError::EmptyList {
                name: list.name.to_string(),
            });
        }
        Ok(list)
    }

    /// Iterate over every list in arbitrary order.
    pub fn lists(&self) -> impl Iterator<Item = &NamedList> {
        self.lists.values()
    }

    /// Whether this list is the active one.
    #[must_use]
    pub fn is_active(&self, list: &NamedList) -> bool {
        self.active.as_deref() == Some(list.name.key().as_str())
    }

    /// Create an empty list and make it active.
    ///
    /// # Errors
    /// Returns error if the name is invalid or already taken.
    pub fn create(&mut self, name: &str) -> Result<Applied<ListName>> {
        let name = ListName::new(name)?;
        let key = name.key();

        if self.lists.contains_key(&key) {
            return Err(ListError::AlreadyExists {
                name: name.to_string(),
            });
        }

        self.lists.insert(key.clone(), NamedList::new(name.clone()));
        self.active = Some(key.clone());
        debug!(list = %name, "created list");

        let persistence = self.persist(&key);
        Ok(Applied {
            value: name,
            persistence,
        })
    }

    /// Resolve a query against the catalogue and append it to the active list.
    ///
    /// Resolution tries an exact name first, then the first search hit.
    ///
    /// # Errors
    /// Returns error if no list is active, the list is full, or nothing matches.
    pub fn add_to_active(&mut self, query: &str, engine: &SearchEngine) -> Result<Applied<Added>> {
        let key = self.active.clone().ok_or(ListError::NoActiveList)?;
        let list = self.lists.get(&key).ok_or(ListError::NoActiveList)?;

        if list.is_full() {
            return Err(ListError::Capacity {
                name: list.name.to_string(),
            });
        }

        let record = engine.resolve(query).map_err(|_| ListError::GpuNotFound {
            query: query.trim().to_string(),
        })?;
        let summary = GpuSummary::from(record);

        let list = self.active_mut(&key)?;
        let gpu = summary.name.clone();
        list.entries.push(summary);
        let added = Added {
            gpu,
            list: list.name.clone(),
            count: list.len(),
        };
        debug!(list = %added.list, gpu = %added.gpu, count = added.count, "added GPU to list");

        let persistence = self.persist(&key);
        Ok(Applied {
            value: added,
            persistence,
        })
    }

    /// Remove the entry at a 1-based position in the active list.
    ///
    /// # Errors
    /// Returns error if no list is active, it is empty, or the index is out of range.
    pub fn remove_by_index(&mut self, index: usize) -> Result<Applied<GpuSummary>> {
        let key = self.non_empty_active_key()?;
        let list = self.active_mut(&key)?;

        let size = list.len();
        if index == 0 || index > size {
            return Err(ListError::IndexOutOfRange { index, size });
        }

        let removed = list.entries.remove(index - 1);
        debug!(list = %list.name, gpu = %removed.name, index, "removed GPU from list");

        let persistence = self.persist(&key);
        Ok(Applied {
            value: removed,
            persistence,
        })
    }

    /// Remove the first entry whose name contains `fragment`, ignoring case.
    ///
    /// # Errors
    /// Returns error if no list is active, it is empty, or nothing matches.
    pub fn remove_by_name(&mut self, fragment: &str) -> Result<Applied<GpuSummary>> {
        let key = self.non_empty_active_key()?;
        let list = self.active_mut(&key)?;

        let wanted = fragment.trim().to_lowercase();
        let position = list
            .entries
            .iter()
            .position(|entry| entry.name.to_lowercase().contains(&wanted))
            .ok_or_else(|| ListError::GpuNotFound {
                query: fragment.trim().to_string(),
            })?;

        let removed = list.entries.remove(position);
        debug!(list = %list.name, gpu = %removed.name, "removed GPU from list by name");

        let persistence = self.persist(&key);
        Ok(Applied {
            value: removed,
            persistence,
        })
    }

    /// Remove several 1-based positions at once.
    ///
    /// Every index is checked before anything is removed. Indices refer to
    /// positions before the removal; duplicates count once. The returned
    /// names follow the order in which indices were given.
    ///
    /// # Errors
    /// Returns error if no list is active, it is empty, no indices were given,
    /// or any index is out of range (the first offending one is reported).
    pub fn remove_batch(&mut self, indices: &[usize]) -> Result<Applied<Vec<String>>> {
        let key = self.non_empty_active_key()?;
        if indices.is_empty() {
            return Err(ListError::EmptySelection);
        }

        let list = self.active_mut(&key)?;
        let size = list.len();
        if let Some(&index) = indices.iter().find(|&&i| i == 0 || i > size) {
            return Err(ListError::IndexOutOfRange { index, size });
        }

        let mut requested: Vec<usize> = Vec::with_capacity(indices.len());
        for &index in indices {
            if !requested.contains(&index) {
                requested.push(index);
            }
        }

        let names: Vec<String> = requested
            .iter()
            .map(|&i| list.entries[i - 1].name.clone())
            .collect();

        let mut descending = requested;
        descending.sort_unstable_by(|a, b| b.cmp(a));
        for index in descending {
            list.entries.remove(index - 1);
        }
        debug!(list = %list.name, removed = names.len(), "removed GPUs from list");

        let persistence = self.persist(&key);
        Ok(Applied {
            value: names,
            persistence,
        })
    }

    /// Make another list active. The pointer is not persisted.
    ///
    /// # Errors
    /// Returns [`ListError::NotFound`] and leaves the pointer unchanged if
    /// no such list exists.
    pub fn switch_active(&mut self, name: &str) -> Result<&NamedList> {
        let key = ListName::normalize(name);
        if !self.lists.contains_key(&key) {
            return Err(ListError::NotFound {
                name: name.trim().to_string(),
            });
        }

        self.active = Some(key.clone());
        let list = self.active_mut(&key)?;
        debug!(list = %list.name, "switched active list");
        Ok(&*list)
    }

    /// Rename a list, moving its stored document.
    ///
    /// A rename that only changes case is rejected as a duplicate.
    ///
    /// # Errors
    /// Returns error if `old` is missing, `new` is invalid or already taken.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<Applied<ListName>> {
        let old_key = ListName::normalize(old);
        if !self.lists.contains_key(&old_key) {
            return Err(ListError::NotFound {
                name: old.trim().to_string(),
            });
        }

        let new_name = ListName::new(new)?;
        let new_key = new_name.key();
        if self.lists.contains_key(&new_key) {
            return Err(ListError::AlreadyExists {
                name: new_name.to_string(),
            });
        }

        let mut list = self
            .lists
            .remove(&old_key)
            .ok_or_else(|| ListError::NotFound {
                name: old.trim().to_string(),
            })?;
        let old_name = std::mem::replace(&mut list.name, new_name.clone());
        self.lists.insert(new_key.clone(), list);

        if self.active.as_deref() == Some(old_key.as_str()) {
            self.active = Some(new_key.clone());
        }
        debug!(from = %old_name, to = %new_name, "renamed list");

        let removed = self.storage.delete(&old_name);
        let mut persistence = self.persist(&new_key);
        if let Err(e) = removed {
            warn!(list = %old_name, error = %e, "failed to delete old list document");
            persistence = Persistence::Stale {
                reason: e.to_string(),
            };
        }

        Ok(Applied {
            value: new_name,
            persistence,
        })
    }

    /// Delete a list and its stored document.
    ///
    /// # Errors
    /// Returns [`ListError::NotFound`] if no such list exists.
    pub fn delete(&mut self, name: &str) -> Result<Applied<ListName>> {
        let key = ListName::normalize(name);
        let list = self.lists.remove(&key).ok_or_else(|| ListError::NotFound {
            name: name.trim().to_string(),
        })?;

        if self.active.as_deref() == Some(key.as_str()) {
            self.active = None;
        }
        debug!(list = %list.name, "deleted list");

        let persistence = match self.storage.delete(&list.name) {
            Ok(()) => Persistence::Saved,
            Err(e) => {
                warn!(list = %list.name, error = %e, "failed to delete list document");
                Persistence::Stale {
                    reason: e.to_string(),
                }
            }
        };

        Ok(Applied {
            value: list.name,
            persistence,
        })
    }

    /// Empty the active list in place.
    ///
    /// Returns `None` when no list is active; otherwise the number of
    /// entries removed.
    pub fn clear_active(&mut self) -> Option<Applied<usize>> {
        let key = self.active.clone()?;
        let list = self.lists.get_mut(&key)?;

        let removed = list.entries.len();
        list.entries.clear();
        debug!(list = %list.name, removed, "cleared list");

        let persistence = self.persist(&key);
        Some(Applied {
            value: removed,
            persistence,
        })
    }

    fn non_empty_active_key(&self) -> Result<String> {
        let list = self.active_entries()?;
        Ok(list.name.key())
    }

    fn active_mut(&mut self, key: &str) -> Result<&mut NamedList> {
        self.lists.get_mut(key).ok_or(ListError::NoActiveList)
    }

    fn persist(&self, key: &str) -> Persistence {
        let Some(list) = self.lists.get(key) else {
            return Persistence::Saved;
        };

        match self.storage.save(&list.to_document()) {
            Ok(()) => Persistence::Saved,
            Err(e) => {
                warn!(list = %list.name, error = %e, "failed to persist list, stored copy is stale");
                Persistence::Stale {
                    reason: e.to_string(),
                }
            }
        }
    }
}
