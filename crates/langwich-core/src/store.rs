use std::collections::BTreeMap;

use langwich_types::{Field, OccurrenceRecord};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Per-text mapping from surface word to its occurrences, in parse order.
///
/// Every mutation marks the store dirty; writing it back is the caller's job
/// (see [`crate::storage::DataTree::save_store`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordStore {
    words: BTreeMap<String, Vec<OccurrenceRecord>>,
    #[serde(skip)]
    dirty: bool,
}

impl WordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, word: &str) -> &[OccurrenceRecord] {
        self.words.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn record(&self, word: &str, list_index: usize) -> Result<&OccurrenceRecord> {
        self.words
            .get(word)
            .and_then(|records| records.get(list_index))
            .ok_or_else(|| CoreError::occurrence_not_found(word, list_index))
    }

    fn record_mut(&mut self, word: &str, list_index: usize) -> Result<&mut OccurrenceRecord> {
        self.words
            .get_mut(word)
            .and_then(|records| records.get_mut(list_index))
            .ok_or_else(|| CoreError::occurrence_not_found(word, list_index))
    }

    pub(crate) fn records_mut(&mut self, word: &str) -> Option<&mut Vec<OccurrenceRecord>> {
        self.dirty = true;
        self.words.get_mut(word)
    }

    /// Appends a record produced by the importer
    pub fn push(&mut self, word: impl Into<String>, record: OccurrenceRecord) -> usize {
        let records = self.words.entry(word.into()).or_default();
        records.push(record);
        self.dirty = true;
        records.len() - 1
    }

    pub fn update_field(
        &mut self,
        word: &str,
        list_index: usize,
        field: Field,
        value: impl Into<String>,
    ) -> Result<()> {
        let record = self.record_mut(word, list_index)?;
        record.set(field, value);
        self.dirty = true;
        Ok(())
    }

    pub fn set_skip(&mut self, word: &str, list_index: usize, skip: bool) -> Result<()> {
        let record = self.record_mut(word, list_index)?;
        record.skip = skip;
        self.dirty = true;
        Ok(())
    }

    /// Removes a phrase record. Word records come from the source text and stay.
    pub fn delete(&mut self, word: &str, list_index: usize) -> Result<OccurrenceRecord> {
        if !self.record(word, list_index)?.is_phrase() {
            return Err(CoreError::Invariant(format!(
                "'{word}' occurrence {list_index} is an imported word and cannot be deleted"
            )));
        }

        let records = self
            .words
            .get_mut(word)
            .ok_or_else(|| CoreError::occurrence_not_found(word, list_index))?;
        let removed = records.remove(list_index);
        if records.is_empty() {
            self.words.remove(word);
        }
        self.dirty = true;
        Ok(removed)
    }

    pub fn has_phrase_at(&self, phrase: &str, index: usize, sent_inx: usize) -> bool {
        self.get(phrase)
            .iter()
            .any(|r| r.is_phrase() && r.index == index && r.sent_inx == sent_inx)
    }

    /// Appends a phrase record and returns its list index
    pub fn insert_phrase(&mut self, phrase: &str, record: OccurrenceRecord) -> Result<usize> {
        if !record.is_phrase() {
            return Err(CoreError::Invariant(format!(
                "'{phrase}' must be inserted as a phrase record"
            )));
        }
        if self.has_phrase_at(phrase, record.index, record.sent_inx) {
            return Err(CoreError::Invariant(format!(
                "phrase '{phrase}' already exists at word {} of sentence {}",
                record.index, record.sent_inx
            )));
        }
        Ok(self.push(phrase, record))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[OccurrenceRecord])> {
        self.words.iter().map(|(w, r)| (w.as_str(), r.as_slice()))
    }

    pub fn word_count(&self) -> usize {
        self.words.values().map(Vec::len).sum()
    }

    pub fn unique_word_count(&self) -> usize {
        self.words.len()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WordStore {
        let mut store = WordStore::new();
        store.push("cat", OccurrenceRecord::word(1, 0));
        store.push("cat", OccurrenceRecord::word(3, 2));
        store.mark_clean();
        store
    }

    #[test]
    fn update_marks_dirty() {
        let mut store = sample();
        store.update_field("cat", 1, Field::Translation, "кіт").unwrap();
        assert!(store.is_dirty());
        assert_eq!(store.record("cat", 1).unwrap().translation, "кіт");
    }

    #[test]
    fn update_missing_occurrence_fails() {
        let mut store = sample();
        let err = store.update_field("cat", 5, Field::Base, "x").unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
        assert!(!store.is_dirty());
    }

    #[test]
    fn word_records_cannot_be_deleted() {
        let mut store = sample();
        let before = store.clone();
        let err = store.delete("cat", 0).unwrap_err();
        assert!(matches!(err, CoreError::Invariant(_)));
        assert_eq!(store, before);
    }

    #[test]
    fn deleting_last_phrase_drops_the_key() {
        let mut store = sample();
        let i = store
            .insert_phrase("black cat", OccurrenceRecord::phrase(0, 0))
            .unwrap();
        assert_eq!(i, 0);
        store.delete("black cat", 0).unwrap();
        assert!(store.get("black cat").is_empty());
    }

    #[test]
    fn duplicate_phrase_is_rejected() {
        let mut store = sample();
        store
            .insert_phrase("black cat", OccurrenceRecord::phrase(0, 0))
            .unwrap();
        let err = store
            .insert_phrase("black cat", OccurrenceRecord::phrase(0, 0))
            .unwrap_err();
        assert!(matches!(err, CoreError::Invariant(_)));
        assert_eq!(store.get("black cat").len(), 1);

        store
            .insert_phrase("black cat", OccurrenceRecord::phrase(0, 1))
            .unwrap();
        assert_eq!(store.get("black cat").len(), 2);
    }

    #[test]
    fn loads_from_plain_json_map() {
        let json = r#"{"dog": [{"internal_type": "word", "type": "", "translation": "",
            "sent_inx": 0, "skip": false, "index": 0}]}"#;
        let store: WordStore = serde_json::from_str(json).unwrap();
        assert_eq!(store.get("dog").len(), 1);
        assert!(!store.is_dirty());
    }
}
