//! Index (staging area)
//!
//! The index tracks the files that go into the next commit, together with
//! their content. Committing snapshots the whole index; entries stay staged
//! across commits until they are overwritten by a new `add`.
//!
//! ## Index File Format
//!
//! A JSON object keyed by repository-relative path, see
//! `artifacts::index`.

use crate::artifacts::index::index_entry::IndexEntry;
use anyhow::Context;
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::Path;

/// Staging area
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.gitx/index`)
    path: Box<Path>,
    /// Staged files mapped by path
    entries: BTreeMap<String, IndexEntry>,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entry_by_path(&self, path: &str) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.changed = false;
    }

    /// Load the index from disk
    ///
    /// A missing or empty index file is an empty index.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.clear();

        if !self.path().exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .read(true)
            .open(self.path())
            .with_context(|| format!("Unable to open index file {}", self.path.display()))?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        let mut content = String::new();
        lock.deref_mut().read_to_string(&mut content)?;

        if content.trim().is_empty() {
            return Ok(());
        }

        let entries: BTreeMap<String, IndexEntry> = serde_json::from_str(&content)
            .with_context(|| format!("Invalid index file {}", self.path.display()))?;

        self.entries = entries
            .into_iter()
            .map(|(name, entry)| {
                let entry = IndexEntry {
                    name: name.clone(),
                    ..entry
                };
                (name, entry)
            })
            .collect();

        Ok(())
    }

    /// Insert or overwrite the entry for its path
    pub fn add(&mut self, entry: IndexEntry) {
        self.entries.insert(entry.name.clone(), entry);
        self.changed = true;
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Persist the index
    ///
    /// # Locking
    ///
    /// Acquires an exclusive lock on the index file during writing.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let content =
            serde_json::to_vec_pretty(&self.entries).context("Unable to serialize index")?;

        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())
            .with_context(|| format!("Unable to open index file {}", self.path.display()))?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        lock.deref_mut().write_all(&content)?;
        self.changed = false;

        Ok(())
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
