use std::collections::BTreeMap;

use langwich_config::LanguageSettings;
use langwich_config::index::IndexConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{CoreError, Result};
use crate::index::WordIndex;
use crate::index::entry::{IndexEntry, OccurrenceEntry, PointerEntry};
use crate::language::FrequentWords;
use crate::store::WordStore;

/// Sampling gate for unannotated frequent words
pub struct Admission {
    rng: StdRng,
    one_in: u32,
}

impl Admission {
    pub fn random(one_in: u32) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            one_in,
        }
    }

    pub fn seeded(one_in: u32, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            one_in,
        }
    }

    pub fn from_config(config: &IndexConfig) -> Self {
        match config.sample_seed {
            Some(seed) => Self::seeded(config.frequent_one_in, seed),
            None => Self::random(config.frequent_one_in),
        }
    }

    fn admit(&mut self) -> bool {
        self.one_in <= 1 || self.rng.gen_range(0..self.one_in) == 0
    }
}

/// Accumulates occurrence stores of one language into a [`WordIndex`]
pub struct IndexBuilder<'a> {
    language: String,
    frequents: &'a dyn FrequentWords,
    wide_chars: bool,
    admission: Admission,
    words: BTreeMap<String, Vec<IndexEntry>>,
    throttled: usize,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(
        language: impl Into<String>,
        frequents: &'a dyn FrequentWords,
        wide_chars: bool,
        admission: Admission,
    ) -> Self {
        Self {
            language: language.into(),
            frequents,
            wide_chars,
            admission,
            words: BTreeMap::new(),
            throttled: 0,
        }
    }

    pub fn for_language(
        language: impl Into<String>,
        settings: &'a LanguageSettings,
        config: &IndexConfig,
    ) -> Self {
        Self::new(
            language,
            &settings.frequents,
            settings.alt_representation_required,
            Admission::from_config(config),
        )
    }

    pub fn add_store(&mut self, hash: &str, store: &WordStore) {
        for (word, records) in store.iter() {
            for (list_index, record) in records.iter().enumerate() {
                if record.skip {
                    continue;
                }

                if record.is_unannotated()
                    && self.frequents.is_frequent(word)
                    && !self.admission.admit()
                {
                    self.throttled += 1;
                    continue;
                }

                let entry =
                    OccurrenceEntry::from_record(word, hash, list_index, record, self.wide_chars);
                self.words
                    .entry(word.to_string())
                    .or_default()
                    .push(IndexEntry::Occurrence(entry));

                let special = &record.special_alt_rep;
                if !special.is_empty() && special != word {
                    self.words
                        .entry(special.clone())
                        .or_default()
                        .push(IndexEntry::Pointer(PointerEntry {
                            word_ptr: word.to_string(),
                            hash: hash.to_string(),
                            index: record.index,
                        }));
                }
            }
        }
    }

    pub fn finish(self) -> Result<WordIndex> {
        let index = WordIndex::from_parts(self.language, self.words);
        if index.is_empty() {
            return Err(CoreError::EmptyIndex(index.language().to_string()));
        }
        tracing::info!(
            language = index.language(),
            words = index.word_count(),
            entries = index.entry_count(),
            throttled = self.throttled,
            "built word index"
        );
        Ok(index)
    }
}

/// Builds the index for `language` from `(hash, store)` pairs
pub fn build_index<'s>(
    language: &str,
    stores: impl IntoIterator<Item = (&'s str, &'s WordStore)>,
    settings: &LanguageSettings,
    config: &IndexConfig,
) -> Result<WordIndex> {
    let mut builder = IndexBuilder::for_language(language, settings, config);
    let mut texts = 0;
    for (hash, store) in stores {
        builder.add_store(hash, store);
        texts += 1;
    }
    if texts == 0 {
        return Err(CoreError::NotFound(format!("texts for language {language}")));
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use langwich_types::{Field, OccurrenceRecord};

    use super::*;
    use crate::language::NoFrequentWords;

    #[test]
    fn skipped_records_are_not_indexed() {
        let mut store = WordStore::new();
        let mut record = OccurrenceRecord::word(0, 0);
        record.skip = true;
        store.push("—", record);

        let mut builder =
            IndexBuilder::new("english", &NoFrequentWords, false, Admission::random(10));
        builder.add_store("h1", &store);
        assert!(matches!(builder.finish(), Err(CoreError::EmptyIndex(_))));
    }

    #[test]
    fn special_alt_rep_registers_a_pointer() {
        let mut store = WordStore::new();
        let mut record = OccurrenceRecord::word(3, 1);
        record.special_alt_rep = "たべる".into();
        store.push("食べる", record);

        let mut builder =
            IndexBuilder::new("japanese", &NoFrequentWords, true, Admission::random(10));
        builder.add_store("h1", &store);
        let index = builder.finish().unwrap();

        match index.get("たべる") {
            [IndexEntry::Pointer(p)] => {
                assert_eq!(p.word_ptr, "食べる");
                assert_eq!((p.hash.as_str(), p.index), ("h1", 3));
            }
            other => panic!("unexpected entries: {other:?}"),
        }
    }

    #[test]
    fn no_texts_is_not_found() {
        let settings = LanguageSettings::default();
        let err = build_index(
            "english",
            std::iter::empty::<(&str, &WordStore)>(),
            &settings,
            &IndexConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[test]
    fn frequent_words_enter_once_annotated() {
        let frequents = vec!["the".to_string()];
        let mut store = WordStore::new();
        for i in 0..50 {
            store.push("the", OccurrenceRecord::word(0, i));
        }
        let mut annotated = OccurrenceRecord::word(0, 50);
        annotated.translation = "цей".into();
        store.push("the", annotated);

        let mut builder =
            IndexBuilder::new("english", &frequents, false, Admission::seeded(10, 7));
        builder.add_store("h1", &store);
        let index = builder.finish().unwrap();

        let entries = index.get("the");
        assert!(entries.len() < 51);
        assert!(
            entries
                .iter()
                .any(|e| e.value(Field::Translation, "the").is_some())
        );
    }

    #[test]
    fn one_in_one_admits_everything() {
        let frequents = vec!["the".to_string()];
        let mut store = WordStore::new();
        for i in 0..5 {
            store.push("the", OccurrenceRecord::word(0, i));
        }
        let mut builder =
            IndexBuilder::new("english", &frequents, false, Admission::seeded(1, 0));
        builder.add_store("h1", &store);
        assert_eq!(builder.finish().unwrap().get("the").len(), 5);
    }
}
