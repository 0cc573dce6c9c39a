use std::collections::BTreeMap;

use langwich_types::{Field, OccurrenceRecord, pos};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use unicode_width::UnicodeWidthStr;

/// Display width a back-reference is charged in the size comparison
pub const BACK_REFERENCE_WIDTH: usize = 3;

/// Marks a literal that would otherwise read as a back-reference token
const TOKEN_ESCAPE: char = '\\';

/// Another value of the same entry that a field can point at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackRef {
    SurfaceWord,
    Translation,
    AltRepresentation,
}

impl BackRef {
    const ALL: [BackRef; 3] = [
        BackRef::SurfaceWord,
        BackRef::Translation,
        BackRef::AltRepresentation,
    ];

    /// Token written to the index file in place of the value
    pub fn token(self) -> &'static str {
        match self {
            BackRef::SurfaceWord => "_w_",
            BackRef::Translation => "_t_",
            BackRef::AltRepresentation => "_a_",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.token() == token)
    }
}

/// A stored field: either the literal text or a reference to a sibling value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Literal(String),
    SameAs(BackRef),
}

impl FieldValue {
    pub fn literal(value: impl Into<String>) -> Self {
        FieldValue::Literal(value.into())
    }

    pub fn same_as(back_ref: BackRef) -> Self {
        FieldValue::SameAs(back_ref)
    }

    /// File form; a literal that reads like a token gains one leading backslash
    pub fn encode(&self) -> String {
        match self {
            FieldValue::SameAs(back_ref) => back_ref.token().to_string(),
            FieldValue::Literal(s) if looks_like_token(s) => format!("{TOKEN_ESCAPE}{s}"),
            FieldValue::Literal(s) => s.clone(),
        }
    }

    pub fn decode(raw: &str) -> Self {
        if let Some(back_ref) = BackRef::from_token(raw) {
            return FieldValue::SameAs(back_ref);
        }
        match raw.strip_prefix(TOKEN_ESCAPE) {
            Some(unescaped) if looks_like_token(unescaped) => FieldValue::literal(unescaped),
            _ => FieldValue::literal(raw),
        }
    }
}

fn looks_like_token(value: &str) -> bool {
    BackRef::from_token(value.trim_start_matches(TOKEN_ESCAPE)).is_some()
}

/// Back-references a field may be compressed into, tried in order
pub fn back_refs(field: Field) -> &'static [BackRef] {
    match field {
        Field::Base | Field::AltRepresentation => &[BackRef::SurfaceWord],
        Field::BaseTranslation => &[BackRef::Translation],
        Field::SpecialAltRep => &[BackRef::AltRepresentation, BackRef::SurfaceWord],
        Field::Type | Field::Translation | Field::StressMarks => &[],
    }
}

/// Width of a value as the learner sees it; wide CJK glyphs count double
pub fn display_width(value: &str, wide_chars: bool) -> usize {
    if wide_chars {
        value.width()
    } else {
        value.chars().count()
    }
}

fn back_ref_source<'a>(back_ref: BackRef, word: &'a str, record: &'a OccurrenceRecord) -> &'a str {
    match back_ref {
        BackRef::SurfaceWord => word,
        BackRef::Translation => &record.translation,
        BackRef::AltRepresentation => &record.alt_representation,
    }
}

fn compress(field: Field, word: &str, record: &OccurrenceRecord, wide_chars: bool) -> FieldValue {
    let value = record.get(field);
    if field == Field::Type {
        return FieldValue::literal(pos::abbreviate(value));
    }
    if display_width(value, wide_chars) > BACK_REFERENCE_WIDTH {
        if let Some(back_ref) = back_refs(field)
            .iter()
            .find(|r| back_ref_source(**r, word, record) == value)
        {
            return FieldValue::same_as(*back_ref);
        }
    }
    FieldValue::literal(value)
}

/// One occurrence of a word, or a redirect to the word that holds the data.
///
/// On disk both shapes are flat objects; a pointer is the one with `word_ptr`:
///
/// ```json
/// {"hash": "h1", "list_index": 0, "index": 3, "sent_inx": 1, "type": "v", "base": "_w_"}
/// {"word_ptr": "食べる", "hash": "h1", "index": 3}
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawEntry")]
pub enum IndexEntry {
    Occurrence(OccurrenceEntry),
    /// Registered under a special alternate representation, redirects to the real word
    Pointer(PointerEntry),
}

impl IndexEntry {
    pub fn hash(&self) -> &str {
        match self {
            IndexEntry::Occurrence(e) => &e.hash,
            IndexEntry::Pointer(p) => &p.hash,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            IndexEntry::Occurrence(e) => e.index,
            IndexEntry::Pointer(p) => p.index,
        }
    }

    /// Expanded field value; pointer entries carry no fields
    pub fn value(&self, field: Field, surface_word: &str) -> Option<String> {
        match self {
            IndexEntry::Occurrence(e) => e.value(field, surface_word),
            IndexEntry::Pointer(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccurrenceEntry {
    pub hash: String,
    /// Position in the owning store's list for this word
    pub list_index: usize,
    pub index: usize,
    pub sent_inx: usize,
    pub fields: BTreeMap<Field, FieldValue>,
}

impl OccurrenceEntry {
    pub fn from_record(
        word: &str,
        hash: &str,
        list_index: usize,
        record: &OccurrenceRecord,
        wide_chars: bool,
    ) -> Self {
        let fields = Field::ALL
            .into_iter()
            .filter(|f| !record.get(*f).is_empty())
            .map(|f| (f, compress(f, word, record, wide_chars)))
            .collect();

        Self {
            hash: hash.to_string(),
            list_index,
            index: record.index,
            sent_inx: record.sent_inx,
            fields,
        }
    }

    pub fn raw(&self, field: Field) -> Option<&FieldValue> {
        self.fields.get(&field)
    }

    /// Concrete value of `field` with back-references and type codes expanded
    pub fn value(&self, field: Field, surface_word: &str) -> Option<String> {
        let value = self.expand(self.fields.get(&field)?, surface_word, true);
        if field == Field::Type {
            return Some(pos::expand(&value));
        }
        Some(value)
    }

    fn expand(&self, value: &FieldValue, surface_word: &str, follow: bool) -> String {
        let back_ref = match value {
            FieldValue::Literal(s) => return s.clone(),
            FieldValue::SameAs(back_ref) => *back_ref,
        };
        let target = match back_ref {
            BackRef::SurfaceWord => return surface_word.to_string(),
            BackRef::Translation => Field::Translation,
            BackRef::AltRepresentation => Field::AltRepresentation,
        };
        // Referenced values may only point back at the surface word
        match (follow, self.fields.get(&target)) {
            (true, Some(v)) => self.expand(v, surface_word, false),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEntry {
    /// Surface word whose entries hold the data
    pub word_ptr: String,
    pub hash: String,
    pub index: usize,
}

impl Serialize for IndexEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            IndexEntry::Pointer(p) => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("word_ptr", &p.word_ptr)?;
                map.serialize_entry("hash", &p.hash)?;
                map.serialize_entry("index", &p.index)?;
                map.end()
            }
            IndexEntry::Occurrence(e) => {
                let mut map = serializer.serialize_map(Some(4 + e.fields.len()))?;
                map.serialize_entry("hash", &e.hash)?;
                map.serialize_entry("list_index", &e.list_index)?;
                map.serialize_entry("index", &e.index)?;
                map.serialize_entry("sent_inx", &e.sent_inx)?;
                for (field, value) in &e.fields {
                    map.serialize_entry(field.as_str(), &value.encode())?;
                }
                map.end()
            }
        }
    }
}

/// Flat file shape shared by both entry kinds
#[derive(Deserialize)]
struct RawEntry {
    #[serde(default)]
    word_ptr: Option<String>,
    hash: String,
    #[serde(default)]
    list_index: Option<usize>,
    index: usize,
    #[serde(default)]
    sent_inx: Option<usize>,
    #[serde(flatten)]
    rest: BTreeMap<String, serde_json::Value>,
}

impl TryFrom<RawEntry> for IndexEntry {
    type Error = String;

    fn try_from(raw: RawEntry) -> Result<Self, Self::Error> {
        if let Some(word_ptr) = raw.word_ptr {
            return Ok(IndexEntry::Pointer(PointerEntry {
                word_ptr,
                hash: raw.hash,
                index: raw.index,
            }));
        }

        let list_index = raw
            .list_index
            .ok_or_else(|| format!("entry of text {} has neither word_ptr nor list_index", raw.hash))?;

        let mut fields = BTreeMap::new();
        for (key, value) in raw.rest {
            // keys this index does not know about are dropped
            let Ok(field) = key.parse::<Field>() else {
                continue;
            };
            let serde_json::Value::String(value) = value else {
                return Err(format!("field {field} of text {} is not a string", raw.hash));
            };
            if !value.is_empty() {
                fields.insert(field, FieldValue::decode(&value));
            }
        }

        Ok(IndexEntry::Occurrence(OccurrenceEntry {
            hash: raw.hash,
            list_index,
            index: raw.index,
            sent_inx: raw.sent_inx.unwrap_or_default(),
            fields,
        }))
    }
}
