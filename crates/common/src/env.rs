//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::warn;

/// Warn on a missing static assets directory; returns whether it exists.
pub async fn check_static_dir(static_dir: &str) -> bool {
    let present = tokio::fs::metadata(static_dir).await.map(|m| m.is_dir()).unwrap_or(false);
    if !present {
        warn!(%static_dir, "static assets directory not found; static files will 404");
    }
    present
}

/// Ensure the data directory exists. An already existing directory is not an error.
pub async fn ensure_data_dir(data_dir: &str) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    Ok(())
}
