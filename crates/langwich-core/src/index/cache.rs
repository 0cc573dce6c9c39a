use crate::error::{CoreError, Result};
use crate::index::WordIndex;

/// In-memory index of one language with a countdown of lookups it may serve.
///
/// The index is considered stale once the budget is spent or another
/// language is requested; a stale index is rebuilt wholesale.
#[derive(Debug)]
pub struct IndexCache {
    index: Option<WordIndex>,
    budget: u32,
    remaining: u32,
}

impl IndexCache {
    pub fn new(budget: u32) -> Self {
        Self {
            index: None,
            budget,
            remaining: 0,
        }
    }

    pub fn language(&self) -> Option<&str> {
        self.index.as_ref().map(WordIndex::language)
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_stale(&self, language: &str) -> bool {
        self.remaining == 0 || self.language() != Some(language)
    }

    pub fn install(&mut self, index: WordIndex) {
        self.remaining = self.budget.max(1);
        self.index = Some(index);
    }

    pub fn invalidate(&mut self) {
        self.remaining = 0;
    }

    /// Index for `language`, rebuilt through `rebuild` when stale
    pub fn ensure<F>(&mut self, language: &str, rebuild: F) -> Result<&WordIndex>
    where
        F: FnOnce(&str) -> Result<WordIndex>,
    {
        if self.is_stale(language) {
            tracing::debug!(
                language,
                cached = ?self.language(),
                remaining = self.remaining,
                "rebuilding stale index"
            );
            let index = rebuild(language)?;
            self.install(index);
        }
        self.index
            .as_ref()
            .ok_or_else(|| CoreError::NotFound(format!("index for {language}")))
    }

    /// Counts one served lookup against the budget
    pub fn consume(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn index(&self) -> Option<&WordIndex> {
        self.index.as_ref()
    }
}
