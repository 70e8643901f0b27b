#![cfg(test)]
use std::path::{Path, PathBuf};

/// Fresh, not-yet-created directory under the system temp dir.
pub fn temp_dir(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{prefix}_{}", uuid::Uuid::new_v4()))
}

/// Best-effort cleanup for a directory created by a test.
pub async fn cleanup(dir: &Path) {
    let _ = tokio::fs::remove_dir_all(dir).await;
}
