pub mod backup;
pub mod error;
pub mod importer;
pub mod index;
pub mod language;
pub mod metadata;
pub mod preprocess;
pub mod storage;
pub mod store;
pub mod suggest;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result};
pub use index::{IndexCache, IndexEntry, WordIndex};
pub use store::WordStore;
pub use suggest::{MatchKeys, Resolver, SuggestionQuery, Suggestions};
