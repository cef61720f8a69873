#![cfg(test)]
use std::path::PathBuf;

use uuid::Uuid;

/// Unique JSON path under the system temp dir; the file itself is not created.
pub fn temp_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("cinema_{tag}_{}.json", Uuid::new_v4()))
}
