use std::env;

use serde::{Deserialize, Serialize};

fn default_lookup_budget() -> u32 {
    5
}

fn default_frequent_one_in() -> u32 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Lookups served by an in-memory index before it is rebuilt
    #[serde(default = "default_lookup_budget")]
    pub lookup_budget: u32,
    /// Unannotated frequent words enter the index with a 1-in-N chance
    #[serde(default = "default_frequent_one_in")]
    pub frequent_one_in: u32,
    /// Fixed seed for frequent-word sampling; random per rebuild when unset
    pub sample_seed: Option<u64>,
}

impl IndexConfig {
    pub fn new() -> Self {
        let lookup_budget = env::var("LANGWICH_LOOKUP_BUDGET")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_lookup_budget);

        let sample_seed = env::var("LANGWICH_SAMPLE_SEED")
            .ok()
            .and_then(|v| v.parse().ok());

        Self {
            lookup_budget,
            frequent_one_in: default_frequent_one_in(),
            sample_seed,
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            lookup_budget: default_lookup_budget(),
            frequent_one_in: default_frequent_one_in(),
            sample_seed: None,
        }
    }
}
