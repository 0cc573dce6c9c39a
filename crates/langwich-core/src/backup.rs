use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::Result;

fn timestamp() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("{millis:015}")
}

/// Copies `source` to `<dir>/<stem>_<timestamp>.json`
pub fn backup_file(source: &Path, dir: &Path, stem: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let target = dir.join(format!("{stem}_{}.json", timestamp()));
    fs::copy(source, &target)?;
    tracing::debug!(source = %source.display(), target = %target.display(), "backed up file");
    Ok(target)
}

/// Deletes all but the newest `keep` backups of `stem`; returns how many went
pub fn rotate(dir: &Path, stem: &str, keep: usize) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let prefix = format!("{stem}_");
    let mut backups: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(&prefix) && n.ends_with(".json"))
        })
        .collect();

    if backups.len() <= keep {
        return Ok(0);
    }

    // zero-padded timestamps sort by name
    backups.sort();
    let stale = backups.len() - keep;
    for path in &backups[..stale] {
        if let Err(e) = fs::remove_file(path) {
            tracing::warn!("Failed to delete backup {}: {}", path.display(), e);
        }
    }
    Ok(stale)
}
