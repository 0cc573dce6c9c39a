pub mod error;
pub mod loader;
pub mod manager;
pub mod rules;

#[cfg(test)]
mod tests;

pub use error::RuleError;
pub use loader::RulesLoader;
pub use manager::RulesManager;
pub use rules::{Alphabet, GrammarRules, Rule, RuleSet};
