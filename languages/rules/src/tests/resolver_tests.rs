use std::collections::HashSet;

use langwich_config::LanguageSettings;
use langwich_config::index::IndexConfig;
use langwich_core::index::build_index;
use langwich_core::{CoreError, Resolver, SuggestionQuery, WordIndex, WordStore};
use langwich_types::{Field, OccurrenceRecord};

use crate::loader::RulesLoader;
use crate::manager::RulesManager;

fn index_with(word: &str, f: impl FnOnce(&mut OccurrenceRecord)) -> WordIndex {
    let mut record = OccurrenceRecord::word(0, 0);
    f(&mut record);
    let mut store = WordStore::new();
    store.push(word, record);

    let config = IndexConfig {
        sample_seed: Some(1),
        ..Default::default()
    };
    build_index(
        "ukrainian",
        [("h1", &store)],
        &LanguageSettings::default(),
        &config,
    )
    .unwrap()
}

fn rules() -> RulesManager {
    RulesLoader::load_embedded().unwrap()
}

#[test]
fn verb_glosses_gain_infinitives() {
    let index = index_with("стрибнула", |r| {
        r.word_type = "verb".into();
        r.base_translation = "jumped".into();
    });
    let rules = rules();
    let resolver = Resolver::new(&index, &rules, "english");

    let query = SuggestionQuery::new("стрибнула")
        .word_type("verb")
        .search(&[Field::BaseTranslation]);
    let ranked = resolver.resolve(&query).unwrap().into_ranked();

    assert_eq!(ranked[0], "jumped");
    let rest: HashSet<&str> = ranked[1..].iter().map(String::as_str).collect();
    assert_eq!(rest, HashSet::from(["(to) jump", "(to) jumpe"]));
}

#[test]
fn noun_seeds_are_singularized() {
    let index = index_with("міста", |r| r.translation = "cities".into());
    let rules = rules();
    let resolver = Resolver::new(&index, &rules, "english");

    let query = SuggestionQuery::new("міста")
        .word_type("n")
        .search(&[Field::Translation, Field::BaseTranslation])
        .include(["towns"]);
    let ranked = resolver.resolve(&query).unwrap().into_ranked();
    assert_eq!(ranked, ["towns", "town", "cities"]);
}

#[test]
fn missing_native_rules_surface_as_configuration_errors() {
    let index = index_with("бігла", |r| {
        r.word_type = "verb".into();
        r.base_translation = "ran".into();
    });
    let rules = rules();
    let resolver = Resolver::new(&index, &rules, "klingon");

    let query = SuggestionQuery::new("бігла")
        .word_type("verb")
        .search(&[Field::BaseTranslation]);
    assert!(matches!(
        resolver.resolve(&query),
        Err(CoreError::Configuration(_))
    ));
}
