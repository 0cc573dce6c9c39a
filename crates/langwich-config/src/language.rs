use serde::{Deserialize, Serialize};

fn default_word_delims() -> String {
    ".,!?;:\"'()[]{}«»“”„…".to_string()
}

/// One entry of `languages.json`: either a bare language code or full settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LanguageEntry {
    Code(String),
    Settings(LanguageSettings),
}

impl LanguageEntry {
    pub fn into_settings(self) -> LanguageSettings {
        match self {
            LanguageEntry::Code(lang_code) => LanguageSettings {
                lang_code,
                ..Default::default()
            },
            LanguageEntry::Settings(settings) => settings,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageSettings {
    pub lang_code: String,
    /// Words carry an alternate script (kana, romaji, ...)
    pub alt_representation_required: bool,
    /// High-frequency words throttled while unannotated
    pub frequents: Vec<String>,
    /// Extra characters stripped from token edges, added to the defaults
    #[serde(rename = "word_delims")]
    pub extra_word_delims: String,
}

impl LanguageSettings {
    pub fn word_delims(&self) -> String {
        format!("{}{}", default_word_delims(), self.extra_word_delims)
    }
}

impl Default for LanguageSettings {
    fn default() -> Self {
        Self {
            lang_code: String::new(),
            alt_representation_required: false,
            frequents: Vec::new(),
            extra_word_delims: String::new(),
        }
    }
}
