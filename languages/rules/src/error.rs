use langwich_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("no rules loaded for language: {0}")]
    NotLoaded(String),

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid code point range in {script}: {message}")]
    InvalidRange { script: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<RuleError> for CoreError {
    fn from(err: RuleError) -> Self {
        CoreError::Configuration(err.to_string())
    }
}
