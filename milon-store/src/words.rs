//! The persisted word collection.
//!
//! The store is a single JSON file, `{"words": [WordEntry...]}`. It is read
//! whole at session start and rewritten whole on commit; the rewrite goes
//! through a temp file in the same directory plus a rename so a failed write
//! leaves the previous file intact.

use milon_core::model::WordEntry;
use milon_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// On-disk shape of the word store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordFile {
    #[serde(default)]
    pub words: Vec<WordEntry>,
}

impl WordFile {
    /// Load the collection. A missing file is an empty collection, not an
    /// error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Word store {} not found, starting empty", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Serialization(format!("Word store is not valid JSON: {}", e)))
    }

    /// Rewrite the whole collection. Writes to a sibling temp file first and
    /// renames over the target, so the store stays at last-known-good if the
    /// write fails partway.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| Error::Persistence(format!("Cannot create {}: {}", parent.display(), e)))?;
            }
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Serialization(format!("Cannot serialize word store: {}", e)))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json.as_bytes())
            .map_err(|e| Error::Persistence(format!("Cannot write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, path)
            .map_err(|e| Error::Persistence(format!("Cannot replace {}: {}", path.display(), e)))?;

        info!("Word store saved: {} entries", self.words.len());
        Ok(())
    }

    /// Ids already present in the collection.
    pub fn ids(&self) -> HashSet<String> {
        self.words.iter().map(|w| w.id.clone()).collect()
    }
}

/// Upsert by id: remove any existing entry with the same id, append the new
/// one. Last write wins per id, safe to re-run after a partial commit.
pub fn upsert(entries: Vec<WordEntry>, new_entry: WordEntry) -> Vec<WordEntry> {
    let mut remaining: Vec<WordEntry> = entries
        .into_iter()
        .filter(|entry| entry.id != new_entry.id)
        .collect();
    remaining.push(new_entry);
    remaining
}
