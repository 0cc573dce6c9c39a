//! Turns raw text into sentences and a fresh [`WordStore`].

use langwich_types::OccurrenceRecord;

use crate::preprocess::Preprocessor;
use crate::store::WordStore;

/// One sentence per non-empty line
pub fn split_sentences(text: &str, preprocessor: &dyn Preprocessor) -> Vec<String> {
    text.lines()
        .map(|line| preprocessor.normalize_sentence(line))
        .filter(|line| !line.is_empty())
        .collect()
}

/// Tokenizes every sentence on whitespace into word records.
///
/// Tokens made only of delimiters are kept verbatim with `skip` set so word
/// positions inside a sentence stay aligned with the text. When `previous`
/// is given, its annotations and phrases are carried over.
pub fn parse_text(
    sentences: &[String],
    preprocessor: &dyn Preprocessor,
    previous: Option<&WordStore>,
) -> WordStore {
    let mut store = WordStore::new();

    for (sent_inx, sentence) in sentences.iter().enumerate() {
        for (index, token) in sentence.split_whitespace().enumerate() {
            let mut record = OccurrenceRecord::word(index, sent_inx);
            let word = match preprocessor.normalize_word(token) {
                w if w.is_empty() => {
                    record.skip = true;
                    token.to_string()
                }
                w => w,
            };
            store.push(word, record);
        }
    }

    if let Some(previous) = previous {
        merge_annotations(&mut store, previous);
    }

    tracing::debug!(
        sentences = sentences.len(),
        words = store.word_count(),
        unique = store.unique_word_count(),
        "parsed text"
    );
    store
}

fn merge_annotations(store: &mut WordStore, previous: &WordStore) {
    for (word, records) in previous.iter() {
        for old in records {
            if old.is_phrase() {
                if !store.has_phrase_at(word, old.index, old.sent_inx) {
                    store.push(word, old.clone());
                }
                continue;
            }

            let Some(current) = store.records_mut(word) else {
                continue;
            };
            if let Some(slot) = current
                .iter_mut()
                .find(|r| !r.is_phrase() && r.index == old.index && r.sent_inx == old.sent_inx)
            {
                *slot = old.clone();
            }
        }
    }
}

/// Builds a phrase from `len` consecutive words starting at `index`.
///
/// Returns `None` when `len < 2` or the span runs past the sentence end.
pub fn create_phrase(
    words_in_sentence: &[&str],
    index: usize,
    len: usize,
    sent_inx: usize,
    preprocessor: &dyn Preprocessor,
) -> Option<(String, OccurrenceRecord)> {
    if len < 2 || index + len > words_in_sentence.len() {
        return None;
    }
    let phrase = preprocessor.normalize_word(&words_in_sentence[index..index + len].join(" "));
    if phrase.is_empty() {
        return None;
    }
    Some((phrase, OccurrenceRecord::phrase(index, sent_inx)))
}
