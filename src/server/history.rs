//! File-backed history stores: table-lookup searches and successful
//! translations, persisted as pretty-printed JSON under the configured data
//! directory. Missing or corrupt files read back as empty history.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

const SEARCH_HISTORY_FILE: &str = "search_history.json";
const TRANSLATION_HISTORY_FILE: &str = "translation_history.json";

/// Cap on retained translation entries; oldest are dropped first.
const MAX_TRANSLATION_ENTRIES: usize = 200;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("History I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("History serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One logical/physical table lookup, deduplicated and sorted by physical name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEntry {
    pub physical: String,
    pub logical: String,
}

/// One successful translation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationEntry {
    pub query: String,
    pub sql: String,
    pub translated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct HistoryStore {
    data_dir: PathBuf,
}

impl HistoryStore {
    /// Open (and create if needed) the data directory.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self, HistoryError> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        })
    }

    pub fn search_history(&self) -> Vec<SearchEntry> {
        self.read_or_default(SEARCH_HISTORY_FILE)
    }

    /// Record a table lookup; duplicates are ignored, entries stay sorted by
    /// physical name.
    pub fn add_search(&self, entry: SearchEntry) -> Result<(), HistoryError> {
        let mut history = self.search_history();
        if !history.contains(&entry) {
            history.push(entry);
            history.sort_by_key(|e| e.physical.to_lowercase());
            self.write(SEARCH_HISTORY_FILE, &history)?;
        }
        Ok(())
    }

    pub fn translation_history(&self) -> Vec<TranslationEntry> {
        self.read_or_default(TRANSLATION_HISTORY_FILE)
    }

    pub fn add_translation(&self, query: &str, sql: &str) -> Result<(), HistoryError> {
        let mut history = self.translation_history();
        history.push(TranslationEntry {
            query: query.to_string(),
            sql: sql.to_string(),
            translated_at: Utc::now(),
        });
        if history.len() > MAX_TRANSLATION_ENTRIES {
            let excess = history.len() - MAX_TRANSLATION_ENTRIES;
            history.drain(..excess);
        }
        self.write(TRANSLATION_HISTORY_FILE, &history)
    }

    fn read_or_default<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.data_dir.join(name);
        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("Ignoring corrupt history file {}: {}", path.display(), e);
                T::default()
            }),
            Err(_) => T::default(),
        }
    }

    fn write<T: Serialize>(&self, name: &str, value: &T) -> Result<(), HistoryError> {
        let content = serde_json::to_string_pretty(value)?;
        fs::write(self.data_dir.join(name), content)?;
        Ok(())
    }
}
