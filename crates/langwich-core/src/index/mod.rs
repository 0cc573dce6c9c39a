//! Cross-text inverted index of annotated word occurrences.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub mod builder;
pub mod cache;
pub mod entry;

pub use builder::{Admission, IndexBuilder, build_index};
pub use cache::IndexCache;
pub use entry::{BackRef, FieldValue, IndexEntry, OccurrenceEntry, PointerEntry};

/// Every indexed surface word of one language mapped to its entries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordIndex {
    #[serde(skip)]
    language: String,
    words: BTreeMap<String, Vec<IndexEntry>>,
}

impl WordIndex {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            words: BTreeMap::new(),
        }
    }

    pub(crate) fn from_parts(language: String, words: BTreeMap<String, Vec<IndexEntry>>) -> Self {
        Self { language, words }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub(crate) fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    pub fn get(&self, word: &str) -> &[IndexEntry] {
        self.words.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn entry_count(&self) -> usize {
        self.words.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[IndexEntry])> {
        self.words.iter().map(|(w, e)| (w.as_str(), e.as_slice()))
    }
}
