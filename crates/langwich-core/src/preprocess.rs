use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    /// Characters stripped from both ends of a token
    fn word_delims(&self) -> &str;

    /// Canonical surface form of a token: NFKC, lowercase, delimiters trimmed
    fn normalize_word(&self, word: &str) -> String {
        let word: String = word.nfkc().collect();
        let delims = self.word_delims();
        word.to_lowercase()
            .trim_matches(|c: char| c.is_whitespace() || delims.contains(c))
            .to_string()
    }

    fn normalize_sentence(&self, sentence: &str) -> String {
        sentence.trim().to_string()
    }
}

pub struct DefaultPreprocessor {
    delims: String,
}

impl DefaultPreprocessor {
    pub fn new(delims: impl Into<String>) -> Self {
        Self {
            delims: delims.into(),
        }
    }
}

impl Preprocessor for DefaultPreprocessor {
    fn word_delims(&self) -> &str {
        &self.delims
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_delimiters_and_lowercases() {
        let p = DefaultPreprocessor::new(".,!?\"«»");
        assert_eq!(p.normalize_word("«Canada!»"), "canada");
        assert_eq!(p.normalize_word("...,"), "");
    }

    #[test]
    fn folds_fullwidth_forms() {
        let p = DefaultPreprocessor::new("。");
        assert_eq!(p.normalize_word("ＡＢＣ。"), "abc");
    }
}
