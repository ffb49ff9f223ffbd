//! Removal of the pipeline's local temporary state.

use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

/// Delete the working directory and the manifest file.
///
/// Either may already be absent; that is not an error, so the cleanup
/// can run repeatedly or against a fresh checkout.
pub async fn clean(dir: &Path, manifest: &Path) -> Result<()> {
    match tokio::fs::remove_dir_all(dir).await {
        Ok(()) => info!(dir = %dir.display(), "Removed working directory"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to remove directory: {}", dir.display()))
        }
    }

    match tokio::fs::remove_file(manifest).await {
        Ok(()) => info!(manifest = %manifest.display(), "Removed manifest"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to remove manifest: {}", manifest.display()))
        }
    }

    Ok(())
}
