//! Environment/runtime helpers
//!
//! Sanity checks run before the service or the catalog tooling touch the filesystem.

use std::path::Path;

use tracing::warn;

/// Warn early when the catalog source is missing; the loader reports the hard error.
pub async fn check_catalog_source(path: &Path) -> bool {
    if tokio::fs::metadata(path).await.is_err() {
        warn!(path = %path.display(), "catalog source not found; startup load will fail");
        return false;
    }
    true
}

/// Ensure an output directory exists, creating it (and parents) if needed.
pub async fn ensure_data_dir(data_dir: &Path) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", data_dir.display()))?;
    Ok(())
}
