use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use kupu_types::{VocabularyEntry, VocabularyRecord, normalize_key};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to read vocabulary: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed vocabulary json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Vocabulary keyed by [`normalize_key`] of each headword.
///
/// Immutable once built; share it behind an `Arc` and rebuild to pick up a
/// new vocabulary snapshot. When two entries normalize to the same key the
/// later one replaces the earlier one, keeping the earlier one's position in
/// [`iter`](Self::iter).
#[derive(Debug, Clone, Default)]
pub struct VocabularyIndex {
    entries: Vec<VocabularyEntry>,
    keys: HashMap<String, usize>,
}

impl VocabularyIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn build<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = VocabularyEntry>,
    {
        let mut index = Self::empty();
        let mut replaced = 0usize;
        for entry in entries {
            let key = normalize_key(entry.headword());
            match index.keys.get(&key) {
                Some(&pos) => {
                    index.entries[pos] = entry;
                    replaced += 1;
                }
                None => {
                    index.keys.insert(key, index.entries.len());
                    index.entries.push(entry);
                }
            }
        }
        debug!(
            entries = index.entries.len(),
            replaced, "built vocabulary index"
        );
        index
    }

    /// Build from raw records, skipping (and logging) any that fail conversion.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = VocabularyRecord>,
    {
        let entries = records
            .into_iter()
            .filter_map(|record| {
                let id = record.id.clone();
                match VocabularyEntry::try_from(record) {
                    Ok(entry) => Some(entry),
                    Err(err) => {
                        warn!(id = ?id, error = %err, "skipping vocabulary record");
                        None
                    }
                }
            })
            .collect::<Vec<_>>();
        Self::build(entries)
    }

    /// Parse a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self, IndexError> {
        let records: Vec<VocabularyRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Arc<Self>, IndexError> {
        let path_ref = path.as_ref();
        let raw = fs::read_to_string(path_ref)?;
        let index = Self::from_json(&raw)?;
        info!(
            "loaded {} vocabulary entries from {}",
            index.len(),
            path_ref.display()
        );
        Ok(Arc::new(index))
    }

    /// Exact lookup on the normalized form of `phrase`.
    pub fn lookup(&self, phrase: &str) -> Option<&VocabularyEntry> {
        self.keys
            .get(&normalize_key(phrase))
            .and_then(|&pos| self.entries.get(pos))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VocabularyEntry> {
        self.entries.iter()
    }
}

impl FromIterator<VocabularyEntry> for VocabularyIndex {
    fn from_iter<T: IntoIterator<Item = VocabularyEntry>>(iter: T) -> Self {
        Self::build(iter)
    }
}
