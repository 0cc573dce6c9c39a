use anyhow::Context;
use langwich_config::Config;
use langwich_core::storage::DataTree;
use langwich_core::{IndexCache, Resolver, SuggestionQuery, Suggestions, WordIndex};
use langwich_rules::{RulesLoader, RulesManager};

pub struct AppState {
    pub config: Config,
    pub tree: DataTree,
    pub rules: RulesManager,
    pub cache: IndexCache,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let rules = match &config.rules_dir {
            Some(dir) => RulesLoader::load_dir(dir, None)
                .with_context(|| format!("failed to load rules from {}", dir.display()))?,
            None => RulesLoader::load_embedded()?,
        };
        let tree = DataTree::new(&config.data_dir, config.backup.clone());
        let cache = IndexCache::new(config.index.lookup_budget);

        Ok(Self {
            config,
            tree,
            rules,
            cache,
        })
    }

    /// Rebuilds, persists and caches the index of `language`
    pub fn rebuild(&mut self, language: &str) -> anyhow::Result<&WordIndex> {
        let settings = self.tree.language_settings(language)?;
        let index = self
            .tree
            .rebuild_index(language, &settings, &self.config.index)?;
        self.cache.install(index);
        self.cache
            .index()
            .context("index missing right after install")
    }

    /// Answers `query` against the cached index, rebuilding it when stale
    pub fn suggest(&mut self, language: &str, query: &SuggestionQuery) -> anyhow::Result<Suggestions> {
        let AppState {
            config,
            tree,
            rules,
            cache,
        } = self;

        let suggestions = {
            let index = cache.ensure(language, |lang| {
                let settings = tree.language_settings(lang)?;
                tree.rebuild_index(lang, &settings, &config.index)
            })?;
            Resolver::new(index, &*rules, &config.native_language).resolve(query)?
        };
        cache.consume();
        Ok(suggestions)
    }

    /// Imports `text` under `hash` and records it in the metadata
    pub fn import(
        &mut self,
        language: &str,
        hash: &str,
        title: &str,
        text: &str,
    ) -> anyhow::Result<usize> {
        let settings = self.tree.language_settings(language)?;
        let store = self.tree.import_text(language, hash, text, &settings)?;

        let mut metadata = match self.tree.load_metadata() {
            Ok(metadata) => metadata,
            Err(langwich_core::CoreError::NotFound(_)) => Default::default(),
            Err(e) => return Err(e.into()),
        };
        // re-imports keep study progress and chain links
        let entry = metadata.entry(hash);
        entry.language = language.to_string();
        if !title.is_empty() {
            entry.title = title.to_string();
        }
        self.tree.save_metadata(&metadata)?;

        if self.cache.language() == Some(language) {
            self.cache.invalidate();
        }
        Ok(store.word_count())
    }
}
