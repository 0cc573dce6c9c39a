use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Per-text metadata as stored in `metadata.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextMetadata {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub text_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_hash: Option<String>,
    #[serde(default)]
    pub study_count: i64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataStore {
    texts: BTreeMap<String, TextMetadata>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, hash: impl Into<String>, metadata: TextMetadata) {
        self.texts.insert(hash.into(), metadata);
    }

    /// Metadata of `hash`, created empty when the text is new
    pub fn entry(&mut self, hash: impl Into<String>) -> &mut TextMetadata {
        self.texts.entry(hash.into()).or_default()
    }

    pub fn get(&self, hash: &str) -> Result<&TextMetadata> {
        self.texts
            .get(hash)
            .ok_or_else(|| CoreError::NotFound(format!("text {hash}")))
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TextMetadata)> {
        self.texts.iter().map(|(h, m)| (h.as_str(), m))
    }

    /// Hashes of every text written in `language`, in hash order
    pub fn texts_for_language(&self, language: &str) -> Vec<&str> {
        self.iter()
            .filter(|(_, m)| m.language.eq_ignore_ascii_case(language))
            .map(|(h, _)| h)
            .collect()
    }

    /// The single text whose hash starts with `prefix`
    pub fn find_by_prefix(&self, prefix: &str) -> Result<&str> {
        let mut matches = self.texts.keys().filter(|h| h.starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(hash), None) => Ok(hash),
            (None, _) => Err(CoreError::NotFound(format!(
                "no text with hash prefix '{prefix}'"
            ))),
            (Some(_), Some(_)) => Err(CoreError::NotFound(format!(
                "hash prefix '{prefix}' matches several texts"
            ))),
        }
    }

    /// All parts of a multipart text, first part first, for any part's hash
    pub fn hash_chain(&self, hash: &str) -> Result<Vec<String>> {
        self.get(hash)?;

        let mut seen = HashSet::from([hash.to_string()]);
        let mut chain = vec![hash.to_string()];

        let mut cursor = self.get(hash)?.prev_hash.clone();
        while let Some(prev) = cursor {
            if !seen.insert(prev.clone()) {
                break;
            }
            cursor = self.get(&prev)?.prev_hash.clone();
            chain.insert(0, prev);
        }

        let mut cursor = self.get(hash)?.next_hash.clone();
        while let Some(next) = cursor {
            if !seen.insert(next.clone()) {
                break;
            }
            cursor = self.get(&next)?.next_hash.clone();
            chain.push(next);
        }

        Ok(chain)
    }
}
