//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

use std::path::Path;

/// Ensure the storage directory exists; warn when the static root is missing.
pub async fn ensure_env(static_dir: impl AsRef<Path>, data_dir: impl AsRef<Path>) -> anyhow::Result<()> {
    common::env::ensure_env(static_dir, data_dir).await
}
