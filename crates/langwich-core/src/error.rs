pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Requested text, language or occurrence does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Rules or language settings are missing or malformed
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Mutation rejected before touching the data
    #[error("invariant violated: {0}")]
    Invariant(String),

    #[error("index build for {0} produced no entries")]
    EmptyIndex(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    pub fn occurrence_not_found(word: &str, list_index: usize) -> Self {
        CoreError::NotFound(format!("occurrence {list_index} of '{word}'"))
    }
}
