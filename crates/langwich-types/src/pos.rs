//! Part-of-speech tags and their short codes.
//!
//! Tags are an open set: anything missing from the table passes through
//! unchanged in both directions.

/// (long form, short code)
const PART_OF_SPEECH: &[(&str, &str)] = &[
    ("adjective", "a"),
    ("pre-noun adjectival", "np"),
    ("adverb", "av"),
    ("verb", "v"),
    ("suru verb", "sv"),
    ("auxiliary verb", "xv"),
    ("prenominal verb", "pv"),
    ("auxiliary", "ax"),
    ("noun", "n"),
    ("nominalizing suffix", "ns"),
    ("noun suffix", "nx"),
    ("noun prefix", "nf"),
    ("noun phrase", "nh"),
    ("suffix", "sx"),
    ("prefix", "px"),
    ("pronoun", "pr"),
    ("particle", "pa"),
    ("preposition", "pp"),
    ("phrase", "ph"),
    ("conjunction", "c"),
    ("counter", "ct"),
    ("numeric", "nm"),
    ("number", "nu"),
    ("expression", "x"),
    ("interrogative", "i"),
    ("interjection", "in"),
    ("place", "pl"),
    ("station", "s"),
    ("copula", "cp"),
    ("date", "d"),
    ("name", "na"),
    ("full name", "fn"),
    ("surname", "sn"),
    ("company", "co"),
    ("group", "g"),
    ("organization", "o"),
    ("abbreviation", "ab"),
];

/// Alternate spellings accepted on either side of the table
const LONG_ALIASES: &[(&str, &str)] = &[
    ("pre-noun adjective", "pre-noun adjectival"),
    ("org", "organization"),
];

const SHORT_ALIASES: &[(&str, &str)] = &[("ad", "adverb"), ("pn", "pronoun")];

const VERB_TYPES: &[&str] = &["verb", "suru verb"];

/// Short code for a long part-of-speech tag
pub fn abbreviate(word_type: &str) -> String {
    let long = LONG_ALIASES
        .iter()
        .find(|(alias, _)| *alias == word_type)
        .map(|(_, long)| *long)
        .unwrap_or(word_type);

    PART_OF_SPEECH
        .iter()
        .find(|(l, _)| *l == long)
        .map(|(_, short)| short.to_string())
        .unwrap_or_else(|| word_type.to_string())
}

/// Long form of a short part-of-speech code
pub fn expand(word_type: &str) -> String {
    if let Some((_, long)) = SHORT_ALIASES.iter().find(|(s, _)| *s == word_type) {
        return long.to_string();
    }
    PART_OF_SPEECH
        .iter()
        .find(|(_, s)| *s == word_type)
        .map(|(long, _)| long.to_string())
        .unwrap_or_else(|| word_type.to_string())
}

pub fn is_verb(word_type: &str) -> bool {
    VERB_TYPES.contains(&expand(word_type).as_str())
}

pub fn is_noun(word_type: &str) -> bool {
    expand(word_type) == "noun"
}
