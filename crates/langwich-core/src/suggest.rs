//! Ranked suggestions for a field of a word, drawn from the word index.

use std::collections::{BTreeMap, HashMap};

use langwich_types::{Field, pos};

use crate::error::Result;
use crate::index::{IndexEntry, WordIndex};
use crate::language::Inflector;

/// Exact-match constraints an index entry must satisfy to contribute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchKeys {
    hash: Option<String>,
    index: Option<usize>,
    fields: BTreeMap<Field, String>,
}

impl MatchKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    pub fn index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn field(mut self, field: Field, value: impl Into<String>) -> Self {
        let value = value.into();
        let value = if field == Field::Type {
            pos::expand(&value)
        } else {
            value
        };
        self.fields.insert(field, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.hash.is_none() && self.index.is_none() && self.fields.is_empty()
    }

    pub fn matches(&self, entry: &IndexEntry, surface_word: &str) -> bool {
        if self.hash.as_deref().is_some_and(|h| h != entry.hash()) {
            return false;
        }
        if self.index.is_some_and(|i| i != entry.index()) {
            return false;
        }
        self.fields.iter().all(|(field, expected)| {
            entry.value(*field, surface_word).unwrap_or_default() == *expected
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionQuery {
    pub word: String,
    pub base: Option<String>,
    pub word_type: Option<String>,
    pub search_keys: Vec<Field>,
    /// Fields read on the target word when a pointer entry matches
    pub sub_search_keys: Vec<Field>,
    pub match_keys: MatchKeys,
    pub include: Vec<String>,
}

impl SuggestionQuery {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            base: None,
            word_type: None,
            search_keys: vec![Field::Translation, Field::BaseTranslation],
            sub_search_keys: Vec::new(),
            match_keys: MatchKeys::default(),
            include: Vec::new(),
        }
    }

    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn word_type(mut self, word_type: impl Into<String>) -> Self {
        self.word_type = Some(word_type.into());
        self
    }

    pub fn search(mut self, keys: &[Field]) -> Self {
        self.search_keys = keys.to_vec();
        self
    }

    /// Follows pointer entries and reads `keys` on the word they point to
    pub fn follow_pointers(mut self, keys: &[Field]) -> Self {
        self.sub_search_keys = keys.to_vec();
        self
    }

    pub fn match_keys(mut self, match_keys: MatchKeys) -> Self {
        self.match_keys = match_keys;
        self
    }

    pub fn include<I, S>(mut self, seeds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include.extend(seeds.into_iter().map(Into::into));
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Suggestions {
    ranked: Vec<String>,
    by_field: BTreeMap<Field, Vec<String>>,
}

impl Suggestions {
    /// Candidates, most frequent first
    pub fn ranked(&self) -> &[String] {
        &self.ranked
    }

    pub fn into_ranked(self) -> Vec<String> {
        self.ranked
    }

    pub fn best(&self) -> Option<&str> {
        self.ranked.first().map(String::as_str)
    }

    /// Raw values collected from `field`, in index order, before ranking
    pub fn field(&self, field: Field) -> &[String] {
        self.by_field.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expansion {
    None,
    Infinitive,
    Singular,
}

#[derive(Default)]
struct Tally {
    counts: HashMap<String, usize>,
    order: Vec<String>,
    by_field: BTreeMap<Field, Vec<String>>,
}

impl Tally {
    fn add(&mut self, value: String) {
        match self.counts.get_mut(&value) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(value.clone(), 1);
                self.order.push(value);
            }
        }
    }

    fn into_suggestions(self) -> Suggestions {
        let Tally {
            counts,
            mut order,
            by_field,
        } = self;
        order.retain(|v| !v.is_empty());
        // stable: ties keep first-seen order
        order.sort_by(|a, b| counts[b].cmp(&counts[a]));
        Suggestions {
            ranked: order,
            by_field,
        }
    }
}

/// Read-only view over an index that answers suggestion queries
pub struct Resolver<'a> {
    index: &'a WordIndex,
    inflector: &'a dyn Inflector,
    native_language: &'a str,
}

impl<'a> Resolver<'a> {
    pub fn new(
        index: &'a WordIndex,
        inflector: &'a dyn Inflector,
        native_language: &'a str,
    ) -> Self {
        Self {
            index,
            inflector,
            native_language,
        }
    }

    pub fn resolve(&self, query: &SuggestionQuery) -> Result<Suggestions> {
        let expansion = match query.word_type.as_deref() {
            Some(t) if pos::is_verb(t) => Expansion::Infinitive,
            Some(t) if pos::is_noun(t) => Expansion::Singular,
            _ => Expansion::None,
        };
        let mut tally = Tally::default();

        let expand_seeds = query.search_keys.contains(&Field::BaseTranslation);
        for seed in &query.include {
            tally.add(seed.clone());
            if expand_seeds {
                self.expand(seed, expansion, &mut tally)?;
            }
        }

        let follow = !query.sub_search_keys.is_empty();
        let targets = self.scan(
            &query.word,
            &query.search_keys,
            query,
            expansion,
            follow,
            &mut tally,
        )?;
        for target in targets {
            tracing::debug!(from = %query.word, to = %target, "following pointer entry");
            self.scan(
                &target,
                &query.sub_search_keys,
                query,
                expansion,
                false,
                &mut tally,
            )?;
        }

        let base = query
            .base
            .as_deref()
            .filter(|b| !b.is_empty() && *b != query.word && self.index.contains(b));
        if let Some(base) = base {
            self.scan(base, &query.search_keys, query, expansion, false, &mut tally)?;
        }

        Ok(tally.into_suggestions())
    }

    /// Highest-ranked candidate only
    pub fn resolve_one(&self, query: &SuggestionQuery) -> Result<Option<String>> {
        Ok(self.resolve(query)?.into_ranked().into_iter().next())
    }

    /// Collects `keys` from the entries of `surface_word`; returns pointer targets
    fn scan(
        &self,
        surface_word: &str,
        keys: &[Field],
        query: &SuggestionQuery,
        expansion: Expansion,
        follow: bool,
        tally: &mut Tally,
    ) -> Result<Vec<String>> {
        let mut targets: Vec<String> = Vec::new();

        for entry in self.index.get(surface_word) {
            if !query.match_keys.matches(entry, surface_word) {
                continue;
            }
            match entry {
                IndexEntry::Occurrence(_) => {
                    for field in keys {
                        let Some(value) = entry.value(*field, surface_word) else {
                            continue;
                        };
                        if value.is_empty() {
                            continue;
                        }
                        tally.by_field.entry(*field).or_default().push(value.clone());
                        tally.add(value.clone());
                        if *field == Field::BaseTranslation {
                            self.expand(&value, expansion, tally)?;
                        }
                    }
                }
                IndexEntry::Pointer(pointer) => {
                    if follow && !targets.contains(&pointer.word_ptr) {
                        targets.push(pointer.word_ptr.clone());
                    }
                }
            }
        }

        Ok(targets)
    }

    fn expand(&self, value: &str, expansion: Expansion, tally: &mut Tally) -> Result<()> {
        let candidates = match expansion {
            Expansion::None => return Ok(()),
            Expansion::Infinitive => self.inflector.infinitivize(value, self.native_language)?,
            Expansion::Singular => self.inflector.singularize(value, self.native_language)?,
        };
        for candidate in candidates {
            tally.add(candidate);
        }
        Ok(())
    }
}
