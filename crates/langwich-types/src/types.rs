use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InternalType {
    /// Created by the text importer, one per token
    #[default]
    Word,
    /// Created by the user, spans several consecutive words
    Phrase,
}

/// One annotated occurrence of a surface word inside a text
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OccurrenceRecord {
    #[serde(default)]
    pub internal_type: InternalType,
    #[serde(rename = "type", default)]
    pub word_type: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub base: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub base_translation: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub alt_representation: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub special_alt_rep: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub stress_marks: String,
    #[serde(default)]
    pub sent_inx: usize,
    #[serde(default)]
    pub index: usize,
    #[serde(default)]
    pub skip: bool,
    /// Keys this crate does not interpret (tags, notes, ...), kept for round trips
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl OccurrenceRecord {
    pub fn word(index: usize, sent_inx: usize) -> Self {
        Self {
            internal_type: InternalType::Word,
            index,
            sent_inx,
            ..Default::default()
        }
    }

    pub fn phrase(index: usize, sent_inx: usize) -> Self {
        Self {
            internal_type: InternalType::Phrase,
            index,
            sent_inx,
            ..Default::default()
        }
    }

    pub fn is_phrase(&self) -> bool {
        self.internal_type == InternalType::Phrase
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Type => &self.word_type,
            Field::Base => &self.base,
            Field::Translation => &self.translation,
            Field::BaseTranslation => &self.base_translation,
            Field::AltRepresentation => &self.alt_representation,
            Field::SpecialAltRep => &self.special_alt_rep,
            Field::StressMarks => &self.stress_marks,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Type => &mut self.word_type,
            Field::Base => &mut self.base,
            Field::Translation => &mut self.translation,
            Field::BaseTranslation => &mut self.base_translation,
            Field::AltRepresentation => &mut self.alt_representation,
            Field::SpecialAltRep => &mut self.special_alt_rep,
            Field::StressMarks => &mut self.stress_marks,
        };
        *slot = value.into();
    }

    /// True when no annotation field carries a value yet
    pub fn is_unannotated(&self) -> bool {
        Field::ALL
            .into_iter()
            .filter(|f| *f != Field::Type)
            .all(|f| self.get(f).is_empty())
    }
}
