//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the storage directory exists; warn when the static root is missing.
///
/// Creating the storage directory is idempotent, so calling this on every
/// start is fine.
pub async fn ensure_env(static_dir: impl AsRef<Path>, data_dir: impl AsRef<Path>) -> anyhow::Result<()> {
    let static_dir = static_dir.as_ref();
    let data_dir = data_dir.as_ref();
    if tokio::fs::metadata(static_dir).await.is_err() {
        warn!(static_dir = %static_dir.display(), "static root not found; static requests will 404");
    }
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", data_dir.display()))?;
    info!(data_dir = %data_dir.display(), "storage directory ready");
    Ok(())
}
