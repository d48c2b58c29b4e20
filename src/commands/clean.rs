//! Remove generated article data

use anyhow::{Context, Result};
use std::fs;

use crate::Folio;

/// Delete the manifest and the published article copies. The rest of the
/// public directory is left alone.
pub fn run(folio: &Folio) -> Result<()> {
    let articles_dir = folio.published_articles_dir();
    if articles_dir.exists() {
        fs::remove_dir_all(&articles_dir)
            .with_context(|| format!("Failed to remove {:?}", articles_dir))?;
        tracing::info!("Deleted: {:?}", articles_dir);
    }

    let manifest = folio.manifest_path();
    if manifest.exists() {
        fs::remove_file(&manifest).with_context(|| format!("Failed to remove {:?}", manifest))?;
        tracing::info!("Deleted: {:?}", manifest);
    }

    Ok(())
}
