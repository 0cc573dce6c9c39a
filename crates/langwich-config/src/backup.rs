use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_keep() -> usize {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Newest copies kept per file
    #[serde(default = "default_keep")]
    pub keep: usize,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            keep: default_keep(),
        }
    }
}
