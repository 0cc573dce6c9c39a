use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use self::backup::BackupConfig;
use self::index::IndexConfig;

pub mod backup;
pub mod index;
pub mod language;

pub use language::{LanguageEntry, LanguageSettings};

fn default_native_language() -> String {
    "english".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root of the user's data tree (metadata, texts, indices)
    pub data_dir: PathBuf,
    /// Directory with `<language>.json` rule sets; embedded rules when unset
    #[serde(default)]
    pub rules_dir: Option<PathBuf>,
    /// Language the user translates into; its rule set expands glosses
    #[serde(default = "default_native_language")]
    pub native_language: String,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub backup: BackupConfig,
}

impl Config {
    pub fn new() -> Self {
        let data_dir = env::var("LANGWICH_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let rules_dir = env::var("LANGWICH_RULES_DIR").ok().map(PathBuf::from);

        let native_language =
            env::var("LANGWICH_NATIVE_LANGUAGE").unwrap_or_else(|_| default_native_language());

        Config {
            data_dir,
            rules_dir,
            native_language,
            index: IndexConfig::new(),
            backup: BackupConfig::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
