use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Annotation fields a user can fill in for a word occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Type,
    Base,
    Translation,
    BaseTranslation,
    AltRepresentation,
    SpecialAltRep,
    StressMarks,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Type,
        Field::Base,
        Field::Translation,
        Field::BaseTranslation,
        Field::AltRepresentation,
        Field::SpecialAltRep,
        Field::StressMarks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Type => "type",
            Field::Base => "base",
            Field::Translation => "translation",
            Field::BaseTranslation => "base_translation",
            Field::AltRepresentation => "alt_representation",
            Field::SpecialAltRep => "special_alt_rep",
            Field::StressMarks => "stress_marks",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field: {}", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_field_name() {
        for field in Field::ALL {
            assert_eq!(field.as_str().parse::<Field>(), Ok(field));
        }
        assert!("word_ptr".parse::<Field>().is_err());
    }

    #[test]
    fn serde_names_match_index_keys() {
        for field in Field::ALL {
            assert_eq!(serde_json::to_value(field).unwrap(), field.as_str());
        }
    }
}
