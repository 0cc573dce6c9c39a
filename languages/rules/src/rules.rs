//! Rule-set files and their compiled form.
//!
//! A rule-set file looks like
//!
//! ```json
//! {
//!   "infinitive_verb_options": [
//!     {"search_pattern": "ied$", "replace_pattern": "ied$", "replace": "y",
//!      "min_length": 5, "prefix": "(to) "}
//!   ],
//!   "infinitive_verb_exceptions": {"went": "(to) go"},
//!   "singular_noun_options": [],
//!   "singular_noun_exceptions": {"mice": "mouse"},
//!   "alphabets": "simple"
//! }
//! ```
//!
//! `alphabets` is either the keyword `"simple"` or a map of script name to
//! `{"simple": bool, "ranges": [["3041", "3096"], ...]}` with hex code points.

use std::collections::{BTreeMap, HashMap};
use std::ops::RangeInclusive;

use regex::Regex;
use serde::Deserialize;

use crate::error::RuleError;

#[derive(Debug, Clone, Deserialize)]
pub struct RuleSpec {
    pub search_pattern: String,
    pub replace_pattern: String,
    /// Replacement template, `$1`-style group references
    pub replace: String,
    #[serde(default)]
    pub min_length: usize,
    #[serde(default)]
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptSpec {
    pub simple: bool,
    #[serde(default)]
    pub ranges: Vec<(String, String)>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AlphabetSpec {
    Keyword(String),
    Scripts(BTreeMap<String, ScriptSpec>),
}

impl Default for AlphabetSpec {
    fn default() -> Self {
        AlphabetSpec::Keyword("simple".to_string())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RuleSetFile {
    pub infinitive_verb_options: Vec<RuleSpec>,
    pub infinitive_verb_exceptions: HashMap<String, String>,
    pub singular_noun_options: Vec<RuleSpec>,
    pub singular_noun_exceptions: HashMap<String, String>,
    pub alphabets: AlphabetSpec,
}

#[derive(Debug, Clone)]
pub struct Rule {
    search: Regex,
    replace_pattern: Regex,
    replace: String,
    min_length: usize,
    prefix: Option<String>,
}

impl Rule {
    pub fn compile(spec: &RuleSpec) -> Result<Self, RuleError> {
        Ok(Self {
            search: compile_pattern(&spec.search_pattern)?,
            replace_pattern: compile_pattern(&spec.replace_pattern)?,
            replace: spec.replace.clone(),
            min_length: spec.min_length,
            prefix: spec.prefix.clone(),
        })
    }

    /// Candidate for `word`, or `None` when the word is too short or does not match
    pub fn apply(&self, word: &str) -> Option<String> {
        if word.chars().count() < self.min_length || !self.search.is_match(word) {
            return None;
        }
        let replaced = self
            .replace_pattern
            .replace_all(word, self.replace.as_str());
        Some(match &self.prefix {
            Some(prefix) => format!("{prefix}{replaced}"),
            None => replaced.into_owned(),
        })
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex, RuleError> {
    Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Ordered rules for one operation plus its irregular forms
#[derive(Debug, Clone, Default)]
pub struct GrammarRules {
    pub rules: Vec<Rule>,
    pub exceptions: HashMap<String, String>,
}

impl GrammarRules {
    fn compile(
        specs: &[RuleSpec],
        exceptions: HashMap<String, String>,
    ) -> Result<Self, RuleError> {
        let rules = specs.iter().map(Rule::compile).collect::<Result<_, _>>()?;
        Ok(Self { rules, exceptions })
    }

    /// Distinct candidates for one variant, in rule order
    pub fn candidates(&self, word: &str) -> Vec<String> {
        if let Some(irregular) = self.exceptions.get(word) {
            return vec![irregular.clone()];
        }

        let mut candidates: Vec<String> = Vec::new();
        for rule in &self.rules {
            if let Some(candidate) = rule.apply(word) {
                if !candidates.contains(&candidate) {
                    candidates.push(candidate);
                }
            }
        }
        if candidates.is_empty() {
            candidates.push(word.to_string());
        }
        candidates
    }
}

#[derive(Debug, Clone)]
pub struct Script {
    pub name: String,
    pub simple: bool,
    pub ranges: Vec<RangeInclusive<u32>>,
}

#[derive(Debug, Clone)]
pub enum Alphabet {
    /// Every word counts as simple
    Simple,
    Scripts(Vec<Script>),
}

impl Alphabet {
    fn compile(spec: AlphabetSpec) -> Result<Self, RuleError> {
        let scripts = match spec {
            AlphabetSpec::Keyword(k) if k == "simple" => return Ok(Alphabet::Simple),
            AlphabetSpec::Keyword(k) => {
                return Err(RuleError::InvalidRange {
                    script: "alphabets".to_string(),
                    message: format!("unknown keyword '{k}'"),
                });
            }
            AlphabetSpec::Scripts(scripts) => scripts,
        };

        scripts
            .into_iter()
            .map(|(name, spec)| -> Result<Script, RuleError> {
                let ranges = spec
                    .ranges
                    .iter()
                    .map(|(start, end)| parse_range(&name, start, end))
                    .collect::<Result<_, _>>()?;
                Ok(Script {
                    name,
                    simple: spec.simple,
                    ranges,
                })
            })
            .collect::<Result<_, _>>()
            .map(Alphabet::Scripts)
    }

    /// False as soon as a character falls in a range of a non-simple script
    pub fn is_simple(&self, word: &str) -> bool {
        let Alphabet::Scripts(scripts) = self else {
            return true;
        };
        !word.chars().any(|c| {
            scripts
                .iter()
                .filter(|s| !s.simple)
                .flat_map(|s| &s.ranges)
                .any(|r| r.contains(&u32::from(c)))
        })
    }
}

fn parse_range(script: &str, start: &str, end: &str) -> Result<RangeInclusive<u32>, RuleError> {
    let parse = |hex: &str| {
        u32::from_str_radix(hex.trim_start_matches("0x"), 16).map_err(|e| RuleError::InvalidRange {
            script: script.to_string(),
            message: format!("'{hex}': {e}"),
        })
    };
    let (start, end) = (parse(start)?, parse(end)?);
    if start > end {
        return Err(RuleError::InvalidRange {
            script: script.to_string(),
            message: format!("{start:X} > {end:X}"),
        });
    }
    Ok(start..=end)
}

/// Compiled rules of one language
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub infinitive: GrammarRules,
    pub singular: GrammarRules,
    pub alphabet: Alphabet,
}

impl RuleSet {
    pub fn compile(file: RuleSetFile) -> Result<Self, RuleError> {
        Ok(Self {
            infinitive: GrammarRules::compile(
                &file.infinitive_verb_options,
                file.infinitive_verb_exceptions,
            )?,
            singular: GrammarRules::compile(
                &file.singular_noun_options,
                file.singular_noun_exceptions,
            )?,
            alphabet: Alphabet::compile(file.alphabets)?,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, RuleError> {
        Self::compile(serde_json::from_str(json)?)
    }
}
