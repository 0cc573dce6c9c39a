use std::collections::HashMap;

use langwich_core::Result as CoreResult;
use langwich_core::language::Inflector;

use crate::error::RuleError;
use crate::rules::{GrammarRules, RuleSet};

/// Upper bound on combinations produced for comma-separated variants
pub const MAX_COMBINATIONS: usize = 64;

#[derive(Debug, Clone, Copy)]
enum Operation {
    Infinitive,
    Singular,
}

/// Loaded rule sets keyed by language name
#[derive(Debug, Default)]
pub struct RulesManager {
    rules: HashMap<String, RuleSet>,
}

impl RulesManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, language: impl Into<String>, rules: RuleSet) {
        self.rules.insert(language.into(), rules);
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn get_rules(&self, language: &str) -> Result<&RuleSet, RuleError> {
        self.rules
            .get(language)
            .ok_or_else(|| RuleError::NotLoaded(language.to_string()))
    }

    pub fn is_infinitive(word: &str) -> bool {
        word.starts_with("(to)") || word.starts_with("to ")
    }

    /// Plausible infinitives of `word`, each prefixed the way the rules say
    pub fn infinitivize(&self, word: &str, language: &str) -> Result<Vec<String>, RuleError> {
        let rules = self.get_rules(language)?;
        if Self::is_infinitive(word) {
            return Ok(vec![word.to_string()]);
        }
        Ok(self.apply(word, &rules.infinitive, Operation::Infinitive))
    }

    pub fn singularize(&self, word: &str, language: &str) -> Result<Vec<String>, RuleError> {
        let rules = self.get_rules(language)?;
        Ok(self.apply(word, &rules.singular, Operation::Singular))
    }

    pub fn is_simple(&self, word: &str, language: &str) -> Result<bool, RuleError> {
        Ok(self.get_rules(language)?.alphabet.is_simple(word))
    }

    fn apply(&self, word: &str, grammar: &GrammarRules, operation: Operation) -> Vec<String> {
        let mut per_variant: Vec<Vec<String>> = word
            .split(',')
            .map(str::trim)
            .map(|variant| match operation {
                Operation::Infinitive if Self::is_infinitive(variant) => vec![variant.to_string()],
                _ => grammar.candidates(variant),
            })
            .collect();

        tracing::debug!(word, ?operation, candidates = ?per_variant, "applied grammar rules");

        if per_variant.len() == 1 {
            return per_variant.remove(0);
        }
        cartesian(word, &per_variant)
    }
}

fn cartesian(word: &str, per_variant: &[Vec<String>]) -> Vec<String> {
    let mut combos: Vec<Vec<&str>> = vec![Vec::new()];
    let mut capped = false;

    for candidates in per_variant {
        let mut next = Vec::with_capacity(combos.len() * candidates.len());
        'fill: for combo in &combos {
            for candidate in candidates {
                if next.len() == MAX_COMBINATIONS {
                    capped = true;
                    break 'fill;
                }
                let mut extended = combo.clone();
                extended.push(candidate.as_str());
                next.push(extended);
            }
        }
        combos = next;
    }

    if capped {
        tracing::warn!(
            word,
            limit = MAX_COMBINATIONS,
            "too many variant combinations, keeping the first ones"
        );
    }
    combos.into_iter().map(|c| c.join(",")).collect()
}

impl Inflector for RulesManager {
    fn infinitivize(&self, word: &str, language: &str) -> CoreResult<Vec<String>> {
        Ok(RulesManager::infinitivize(self, word, language)?)
    }

    fn singularize(&self, word: &str, language: &str) -> CoreResult<Vec<String>> {
        Ok(RulesManager::singularize(self, word, language)?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::loader::RulesLoader;

    fn english() -> RulesManager {
        RulesLoader::load_embedded().unwrap()
    }

    fn unordered(v: Vec<String>) -> HashSet<String> {
        v.into_iter().collect()
    }

    #[test]
    fn length_gate_blocks_short_words() {
        assert_eq!(english().infinitivize("seed", "english").unwrap(), ["seed"]);
    }

    #[test]
    fn every_matching_rule_contributes() {
        let m = english();
        assert_eq!(
            unordered(m.infinitivize("duped", "english").unwrap()),
            unordered(vec!["(to) dupe".into(), "(to) dup".into()])
        );
        assert_eq!(
            unordered(m.infinitivize("jumped", "english").unwrap()),
            unordered(vec!["(to) jump".into(), "(to) jumpe".into()])
        );
        assert_eq!(m.infinitivize("copied", "english").unwrap(), ["(to) copy"]);
    }

    #[test]
    fn infinitives_are_left_alone() {
        let m = english();
        for w in ["(to) run", "to be", "(to)walk"] {
            assert_eq!(m.infinitivize(w, "english").unwrap(), [w]);
        }
    }

    #[test]
    fn irregular_forms() {
        let m = english();
        assert_eq!(m.infinitivize("went", "english").unwrap(), ["(to) go"]);
        assert_eq!(m.singularize("children", "english").unwrap(), ["child"]);
    }

    #[test]
    fn variants_combine() {
        let m = english();
        let a = m.infinitivize("duped", "english").unwrap();
        let b = m.infinitivize("copied", "english").unwrap();
        let expected: HashSet<String> = a
            .iter()
            .flat_map(|x| b.iter().map(move |y| format!("{x},{y}")))
            .collect();
        assert_eq!(
            unordered(m.infinitivize("duped, copied", "english").unwrap()),
            expected
        );
    }

    #[test]
    fn combinations_are_capped() {
        let m = english();
        // 2 candidates per variant, 2^7 combinations before the cap
        let word = vec!["jumped"; 7].join(",");
        assert_eq!(m.infinitivize(&word, "english").unwrap().len(), MAX_COMBINATIONS);
    }

    #[test]
    fn singular_nouns() {
        let m = english();
        assert_eq!(m.singularize("cities", "english").unwrap(), ["city"]);
        assert_eq!(m.singularize("cats", "english").unwrap(), ["cat"]);
        assert_eq!(m.singularize("sheep", "english").unwrap(), ["sheep"]);
    }

    #[test]
    fn script_simplicity() {
        let m = english();
        assert!(m.is_simple("たべる", "japanese").unwrap());
        assert!(m.is_simple("カタカナ", "japanese").unwrap());
        assert!(!m.is_simple("食べる", "japanese").unwrap());
        assert!(m.is_simple("anything", "english").unwrap());
    }

    #[test]
    fn unknown_language_is_not_loaded() {
        let m = english();
        assert!(matches!(
            m.infinitivize("walked", "klingon"),
            Err(RuleError::NotLoaded(_))
        ));
        assert!(matches!(
            m.is_simple("x", "klingon"),
            Err(RuleError::NotLoaded(_))
        ));
    }
}
