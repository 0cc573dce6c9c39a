use std::collections::HashSet;

use crate::error::Result;

/// Rule-based derivation of base forms, implemented by the rule engine
pub trait Inflector {
    /// Candidate infinitives for a (possibly comma-joined) verb gloss
    fn infinitivize(&self, word: &str, language: &str) -> Result<Vec<String>>;

    /// Candidate singulars for a (possibly comma-joined) noun gloss
    fn singularize(&self, word: &str, language: &str) -> Result<Vec<String>>;
}

/// Stop-word-like terms that are throttled while they carry no annotations
pub trait FrequentWords {
    fn is_frequent(&self, word: &str) -> bool;
}

impl FrequentWords for HashSet<String> {
    fn is_frequent(&self, word: &str) -> bool {
        self.contains(word)
    }
}

impl FrequentWords for Vec<String> {
    fn is_frequent(&self, word: &str) -> bool {
        self.iter().any(|w| w == word)
    }
}

/// No word is frequent
pub struct NoFrequentWords;

impl FrequentWords for NoFrequentWords {
    fn is_frequent(&self, _word: &str) -> bool {
        false
    }
}
