use std::fs;

use langwich_config::LanguageSettings;
use langwich_config::backup::BackupConfig;
use langwich_types::Field;
use tempfile::TempDir;

use super::{annotated, seeded_config};
use crate::error::CoreError;
use crate::index::build_index;
use crate::metadata::{MetadataStore, TextMetadata};
use crate::storage::DataTree;
use crate::store::WordStore;

fn tree() -> (TempDir, DataTree) {
    let dir = TempDir::new().unwrap();
    let tree = DataTree::new(dir.path(), BackupConfig::default());
    (dir, tree)
}

fn with_texts(tree: &DataTree, texts: &[(&str, &str)]) {
    let mut metadata = MetadataStore::new();
    for (hash, language) in texts {
        metadata.insert(
            *hash,
            TextMetadata {
                language: language.to_string(),
                title: format!("text {hash}"),
                ..Default::default()
            },
        );
    }
    tree.save_metadata(&metadata).unwrap();
}

#[test]
fn missing_files_are_not_found() {
    let (_dir, tree) = tree();
    assert!(matches!(tree.load_metadata(), Err(CoreError::NotFound(_))));
    assert!(matches!(tree.load_store("english", "h1"), Err(CoreError::NotFound(_))));
    assert!(matches!(tree.load_languages(), Err(CoreError::Configuration(_))));
}

#[test]
fn reads_language_settings() {
    let (_dir, tree) = tree();
    fs::create_dir_all(tree.root().join("data")).unwrap();
    fs::write(
        tree.languages_path(),
        r#"{"english": "en", "japanese": {"lang_code": "ja", "alt_representation_required": true}}"#,
    )
    .unwrap();

    assert!(tree.language_settings("japanese").unwrap().alt_representation_required);
    assert_eq!(tree.language_settings("english").unwrap().lang_code, "en");
    assert!(matches!(
        tree.language_settings("klingon"),
        Err(CoreError::Configuration(_))
    ));
}

#[test]
fn saving_a_store_backs_up_the_previous_one() {
    let (_dir, tree) = tree();
    let mut store = WordStore::new();
    store.push("cat", annotated(0, 0, |r| r.translation = "кіт".into()));
    tree.save_store("english", "h1", &mut store).unwrap();
    assert!(!store.is_dirty());
    assert!(!tree.backups_dir().exists());

    store.update_field("cat", 0, Field::Translation, "котик").unwrap();
    tree.save_store("english", "h1", &mut store).unwrap();

    let backups: Vec<_> = fs::read_dir(tree.backups_dir()).unwrap().collect();
    assert_eq!(backups.len(), 1);
    let loaded = tree.load_store("english", "h1").unwrap();
    assert_eq!(loaded.record("cat", 0).unwrap().translation, "котик");
}

#[test]
fn saving_metadata_backs_up_the_previous_file() {
    let (_dir, tree) = tree();
    with_texts(&tree, &[("h1", "english")]);
    assert!(!tree.metadata_backups_dir().exists());

    let mut metadata = tree.load_metadata().unwrap();
    metadata.insert("h2", TextMetadata::default());
    tree.save_metadata(&metadata).unwrap();

    let backups: Vec<String> = fs::read_dir(tree.metadata_backups_dir())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(backups.len(), 1);
    assert!(backups[0].starts_with("metadata_"));

    let saved: MetadataStore =
        serde_json::from_slice(&fs::read(tree.metadata_backups_dir().join(&backups[0])).unwrap())
            .unwrap();
    assert!(saved.get("h2").is_err());
    assert_eq!(tree.load_metadata().unwrap().get("h2").unwrap().title, "");
}

#[test]
fn import_keeps_earlier_annotations() {
    let (_dir, tree) = tree();
    let settings = LanguageSettings::default();

    let mut store = tree
        .import_text("english", "h1", "The cat sat.\nA dog ran!", &settings)
        .unwrap();
    assert_eq!(store.get("cat").len(), 1);
    store.update_field("cat", 0, Field::Translation, "кіт").unwrap();
    tree.save_store("english", "h1", &mut store).unwrap();

    let store = tree
        .import_text("english", "h1", "The cat sat.\nA dog ran!", &settings)
        .unwrap();
    assert_eq!(store.record("cat", 0).unwrap().translation, "кіт");
    assert_eq!(tree.load_sentences("english", "h1").unwrap().len(), 2);
}

#[test]
fn rebuilds_and_reloads_the_index() {
    let (_dir, tree) = tree();
    with_texts(&tree, &[("h1", "english"), ("h2", "German")]);

    let mut store = WordStore::new();
    store.push("cat", annotated(0, 0, |r| r.translation = "кіт".into()));
    tree.save_store("english", "h1", &mut store).unwrap();

    let settings = LanguageSettings::default();
    let built = tree
        .rebuild_index("english", &settings, &seeded_config())
        .unwrap();
    let loaded = tree.load_index("english").unwrap();
    assert_eq!(loaded, built);
    assert_eq!(loaded.language(), "english");

    assert!(matches!(
        tree.rebuild_index("french", &settings, &seeded_config()),
        Err(CoreError::NotFound(_))
    ));
}

#[test]
fn rebuild_builds_from_every_text_of_the_language() {
    let (_dir, tree) = tree();
    with_texts(&tree, &[("h1", "english"), ("h2", "German"), ("h3", "English")]);

    let mut first = WordStore::new();
    first.push(
        "house",
        annotated(0, 0, |r| {
            r.base = "house".into();
            r.translation = "будинок".into();
        }),
    );
    let mut second = WordStore::new();
    second.push("house", annotated(2, 1, |r| r.translation = "дім".into()));
    tree.save_store("english", "h1", &mut first).unwrap();
    tree.save_store("english", "h3", &mut second).unwrap();

    let settings = LanguageSettings::default();
    let rebuilt = tree
        .rebuild_index("english", &settings, &seeded_config())
        .unwrap();
    let direct = build_index(
        "english",
        [("h1", &first), ("h3", &second)],
        &settings,
        &seeded_config(),
    )
    .unwrap();
    assert_eq!(rebuilt, direct);
    assert_eq!(rebuilt.get("house").len(), 2);

    let on_disk = fs::read_to_string(tree.index_path("english")).unwrap();
    assert!(on_disk.contains(r#""base": "_w_""#));
    assert!(!on_disk.contains("\"kind\""));
}

#[test]
fn seeded_rebuild_is_byte_identical() {
    let (_dir, tree) = tree();
    with_texts(&tree, &[("h1", "english")]);
    let settings = LanguageSettings {
        frequents: vec!["the".into()],
        ..Default::default()
    };

    let mut store = WordStore::new();
    for i in 0..30 {
        store.push("the", annotated(0, i, |_| {}));
    }
    store.push(
        "cat",
        annotated(1, 0, |r| {
            r.base = "cat".into();
            r.translation = "кіт".into();
        }),
    );
    tree.save_store("english", "h1", &mut store).unwrap();

    tree.rebuild_index("english", &settings, &seeded_config()).unwrap();
    let first = fs::read(tree.index_path("english")).unwrap();
    tree.rebuild_index("english", &settings, &seeded_config()).unwrap();
    let second = fs::read(tree.index_path("english")).unwrap();
    assert_eq!(first, second);
}
