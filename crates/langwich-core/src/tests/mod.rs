use langwich_config::LanguageSettings;
use langwich_config::index::IndexConfig;
use langwich_types::OccurrenceRecord;

use crate::error::Result;
use crate::index::{WordIndex, build_index};
use crate::language::Inflector;
use crate::store::WordStore;

mod storage_tests;

/// English-ish inflector good enough for ranking tests
pub(crate) struct SuffixInflector;

impl Inflector for SuffixInflector {
    fn infinitivize(&self, word: &str, _language: &str) -> Result<Vec<String>> {
        let stem = word.strip_suffix("ed").unwrap_or(word);
        Ok(vec![format!("(to) {stem}")])
    }

    fn singularize(&self, word: &str, _language: &str) -> Result<Vec<String>> {
        Ok(vec![word.strip_suffix('s').unwrap_or(word).to_string()])
    }
}

pub(crate) fn annotated(
    index: usize,
    sent_inx: usize,
    f: impl FnOnce(&mut OccurrenceRecord),
) -> OccurrenceRecord {
    let mut record = OccurrenceRecord::word(index, sent_inx);
    f(&mut record);
    record
}

pub(crate) fn seeded_config() -> IndexConfig {
    IndexConfig {
        sample_seed: Some(42),
        ..Default::default()
    }
}

pub(crate) fn index_of(language: &str, stores: &[(&str, &WordStore)]) -> WordIndex {
    build_index(
        language,
        stores.iter().copied(),
        &LanguageSettings::default(),
        &seeded_config(),
    )
    .unwrap()
}
