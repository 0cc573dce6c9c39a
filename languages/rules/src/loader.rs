use std::fs;
use std::path::Path;

use crate::error::RuleError;
use crate::manager::RulesManager;
use crate::rules::RuleSet;

const EMBEDDED: &[(&str, &str)] = &[
    ("english", include_str!("../data/english.json")),
    ("japanese", include_str!("../data/japanese.json")),
];

pub struct RulesLoader;

impl RulesLoader {
    /// Load the rule sets compiled into the binary
    pub fn load_embedded() -> Result<RulesManager, RuleError> {
        tracing::info!("Loading embedded rule sets...");
        let mut manager = RulesManager::new();
        for (language, json) in EMBEDDED {
            manager.insert(*language, RuleSet::from_json(json)?);
        }
        tracing::info!("Loaded {} embedded rule sets", EMBEDDED.len());
        Ok(manager)
    }

    /// Load a single `<language>.json` rule set
    pub fn load_from_file(path: &Path) -> Result<RuleSet, RuleError> {
        tracing::debug!("Loading rules from file: {}", path.display());
        let json = fs::read_to_string(path)?;
        RuleSet::from_json(&json)
    }

    /// Load every `<language>.json` in `dir`, or only the listed languages
    pub fn load_dir(dir: &Path, languages: Option<&[String]>) -> Result<RulesManager, RuleError> {
        tracing::info!("Loading rule sets from: {}", dir.display());
        let mut manager = RulesManager::new();

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(language) = path.file_stem().and_then(|s| s.to_str()) else {
                tracing::warn!("Skipping rule file with non UTF-8 name: {}", path.display());
                continue;
            };
            if languages.is_some_and(|wanted| !wanted.iter().any(|l| l == language)) {
                continue;
            }
            let rules = Self::load_from_file(&path)?;
            manager.insert(language, rules);
        }

        tracing::info!("Loaded {} rule sets from directory", manager.languages().count());
        Ok(manager)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn embedded_rule_sets_compile() {
        let manager = RulesLoader::load_embedded().unwrap();
        assert!(manager.get_rules("english").is_ok());
        assert!(manager.get_rules("japanese").is_ok());
    }

    #[test]
    fn loads_only_requested_languages() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ukrainian.json"), r#"{"alphabets": "simple"}"#).unwrap();
        fs::write(dir.path().join("german.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "not rules").unwrap();

        let all = RulesLoader::load_dir(dir.path(), None).unwrap();
        assert_eq!(all.languages().count(), 2);

        let wanted = vec!["ukrainian".to_string()];
        let some = RulesLoader::load_dir(dir.path(), Some(&wanted)).unwrap();
        assert!(some.get_rules("ukrainian").is_ok());
        assert!(matches!(
            some.get_rules("german"),
            Err(RuleError::NotLoaded(_))
        ));
    }

    #[test]
    fn broken_file_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("english.json"), "{ nope").unwrap();
        assert!(matches!(
            RulesLoader::load_dir(dir.path(), None),
            Err(RuleError::Parse(_))
        ));
    }
}
