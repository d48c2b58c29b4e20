//! Prepare the built app for static hosting

use anyhow::{bail, Context, Result};
use std::fs;

use crate::Folio;

/// Copy `index.html` to `404.html` so unknown paths load the app, and
/// write an empty `.nojekyll` so the host serves files as they are
pub fn run(folio: &Folio) -> Result<()> {
    let build_dir = &folio.build_dir;
    let index = build_dir.join("index.html");
    if !index.exists() {
        bail!("{:?} not found. Build the app first.", index);
    }

    let not_found = build_dir.join("404.html");
    fs::copy(&index, &not_found)
        .with_context(|| format!("Failed to copy {:?} to {:?}", index, not_found))?;
    tracing::info!("Copied index.html to 404.html");

    let nojekyll = build_dir.join(".nojekyll");
    fs::write(&nojekyll, "").with_context(|| format!("Failed to write {:?}", nojekyll))?;
    tracing::info!("Created {:?}", nojekyll);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_postbuild_copies_index() {
        let tmp = TempDir::new().unwrap();
        let build = tmp.path().join("build");
        fs::create_dir_all(&build).unwrap();
        fs::write(build.join("index.html"), "<html>app</html>").unwrap();

        let folio = Folio::new(tmp.path()).unwrap();
        run(&folio).unwrap();

        assert_eq!(
            fs::read_to_string(build.join("404.html")).unwrap(),
            "<html>app</html>"
        );
        assert_eq!(fs::read_to_string(build.join(".nojekyll")).unwrap(), "");
    }

    #[test]
    fn test_postbuild_without_index_fails() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();
        let err = run(&folio).unwrap_err();
        assert!(err.to_string().contains("index.html"));
        assert!(!tmp.path().join("build/.nojekyll").exists());
    }
}
