//! Layout of the user's data tree on disk.
//!
//! ```text
//! <root>/metadata.json
//! <root>/backups/metadata_<timestamp>.json
//! <root>/data/languages.json
//! <root>/text_sentences/<language>/<hash>.json
//! <root>/text_words/<language>/<hash>.json
//! <root>/text_words/backups/<hash>_<timestamp>.json
//! <root>/words/<language>_index.json
//! ```

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use langwich_config::backup::BackupConfig;
use langwich_config::index::IndexConfig;
use langwich_config::{LanguageEntry, LanguageSettings};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use crate::backup;
use crate::error::{CoreError, Result};
use crate::importer;
use crate::index::{WordIndex, build_index};
use crate::metadata::MetadataStore;
use crate::preprocess::DefaultPreprocessor;
use crate::store::WordStore;

pub struct DataTree {
    root: PathBuf,
    backup: BackupConfig,
}

impl DataTree {
    pub fn new(root: impl Into<PathBuf>, backup: BackupConfig) -> Self {
        Self {
            root: root.into(),
            backup,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.root.join("metadata.json")
    }

    pub fn languages_path(&self) -> PathBuf {
        self.root.join("data").join("languages.json")
    }

    pub fn sentences_path(&self, language: &str, hash: &str) -> PathBuf {
        self.root
            .join("text_sentences")
            .join(language)
            .join(format!("{hash}.json"))
    }

    pub fn store_path(&self, language: &str, hash: &str) -> PathBuf {
        self.root
            .join("text_words")
            .join(language)
            .join(format!("{hash}.json"))
    }

    pub fn backups_dir(&self) -> PathBuf {
        self.root.join("text_words").join("backups")
    }

    pub fn metadata_backups_dir(&self) -> PathBuf {
        self.root.join("backups")
    }

    pub fn index_path(&self, language: &str) -> PathBuf {
        self.root.join("words").join(format!("{language}_index.json"))
    }

    pub fn load_metadata(&self) -> Result<MetadataStore> {
        read_json(&self.metadata_path(), "metadata file")
    }

    /// Writes the metadata, backing up the previous version first
    pub fn save_metadata(&self, metadata: &MetadataStore) -> Result<()> {
        let path = self.metadata_path();
        if self.backup.enabled && path.exists() {
            let dir = self.metadata_backups_dir();
            backup::backup_file(&path, &dir, "metadata")?;
            backup::rotate(&dir, "metadata", self.backup.keep)?;
        }
        write_json(&path, metadata)
    }

    pub fn load_languages(&self) -> Result<BTreeMap<String, LanguageSettings>> {
        let path = self.languages_path();
        let entries: BTreeMap<String, LanguageEntry> = match read_json(&path, "languages file") {
            Ok(entries) => entries,
            Err(CoreError::NotFound(what)) => return Err(CoreError::Configuration(what)),
            Err(e) => return Err(e),
        };
        Ok(entries
            .into_iter()
            .map(|(lang, entry)| (lang, entry.into_settings()))
            .collect())
    }

    pub fn language_settings(&self, language: &str) -> Result<LanguageSettings> {
        self.load_languages()?
            .remove(language)
            .ok_or_else(|| CoreError::Configuration(format!("language {language} is not configured")))
    }

    pub fn load_sentences(&self, language: &str, hash: &str) -> Result<Vec<String>> {
        read_json(&self.sentences_path(language, hash), "sentence file")
    }

    pub fn load_store(&self, language: &str, hash: &str) -> Result<WordStore> {
        read_json(&self.store_path(language, hash), "text words file")
    }

    /// Writes the store, backing up the previous version first
    pub fn save_store(&self, language: &str, hash: &str, store: &mut WordStore) -> Result<()> {
        let path = self.store_path(language, hash);
        if self.backup.enabled && path.exists() {
            backup::backup_file(&path, &self.backups_dir(), hash)?;
            backup::rotate(&self.backups_dir(), hash, self.backup.keep)?;
        }
        write_json(&path, &*store)?;
        store.mark_clean();
        tracing::info!(language, hash, words = store.word_count(), "saved text words");
        Ok(())
    }

    /// Splits and tokenizes a text, keeping annotations of an earlier import
    pub fn import_text(
        &self,
        language: &str,
        hash: &str,
        text: &str,
        settings: &LanguageSettings,
    ) -> Result<WordStore> {
        let preprocessor = DefaultPreprocessor::new(settings.word_delims());
        let sentences = importer::split_sentences(text, &preprocessor);

        let previous = match self.load_store(language, hash) {
            Ok(store) => Some(store),
            Err(CoreError::NotFound(_)) => None,
            Err(e) => return Err(e),
        };
        let mut store = importer::parse_text(&sentences, &preprocessor, previous.as_ref());

        write_json(&self.sentences_path(language, hash), &sentences)?;
        self.save_store(language, hash, &mut store)?;
        Ok(store)
    }

    pub fn load_index(&self, language: &str) -> Result<WordIndex> {
        let mut index: WordIndex = read_json(&self.index_path(language), "word index")?;
        index.set_language(language);
        Ok(index)
    }

    pub fn save_index(&self, index: &WordIndex) -> Result<()> {
        write_json(&self.index_path(index.language()), index)
    }

    /// Rebuilds and persists the index of `language` from every text in it
    pub fn rebuild_index(
        &self,
        language: &str,
        settings: &LanguageSettings,
        config: &IndexConfig,
    ) -> Result<WordIndex> {
        let metadata = self.load_metadata()?;
        let stores = metadata
            .texts_for_language(language)
            .into_iter()
            .map(|hash| Ok((hash.to_string(), self.load_store(language, hash)?)))
            .collect::<Result<Vec<_>>>()?;
        let index = build_index(
            language,
            stores.iter().map(|(hash, store)| (hash.as_str(), store)),
            settings,
            config,
        )?;
        self.save_index(&index)?;
        Ok(index)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(CoreError::NotFound(format!("{what} {}", path.display())));
        }
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Pretty-printed JSON written through a temp file and renamed into place
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush()?;
    }
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
