//! Generate the article manifest

use anyhow::{bail, Result};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebouncedEvent};
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::content::loader::{BuildReport, ManifestBuilder};
use crate::Folio;

/// Build the manifest and publish the article documents
pub fn run(folio: &Folio) -> Result<BuildReport> {
    let start = Instant::now();
    let report = ManifestBuilder::new(folio).build()?;

    tracing::info!(
        "Generated {} articles in {:.2}s",
        report.articles,
        start.elapsed().as_secs_f64()
    );
    if !report.skipped.is_empty() {
        tracing::warn!("Skipped {} source files", report.skipped.len());
    }
    Ok(report)
}

/// Regenerate whenever an article source or the site config changes.
///
/// Blocks until the watcher shuts down; `on_build` sees every successful
/// build.
pub fn watch<F>(folio: &Folio, mut on_build: F) -> Result<()>
where
    F: FnMut(&BuildReport),
{
    let source_dir = &folio.articles_source_dir;
    if !source_dir.exists() {
        bail!("Nothing to watch: {:?} does not exist", source_dir);
    }

    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;
    debouncer
        .watcher()
        .watch(source_dir, RecursiveMode::Recursive)?;
    tracing::debug!("Watching: {:?}", source_dir);

    let config_path = folio.base_dir.join("_config.yml");
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let changed: Vec<&DebouncedEvent> =
                    events.iter().filter(|e| is_relevant(&e.path)).collect();
                if changed.is_empty() {
                    continue;
                }
                for event in &changed {
                    tracing::info!("File changed: {}", event.path.display());
                }

                // Paths may have moved with the config
                let folio = match Folio::new(&folio.base_dir) {
                    Ok(fresh) => fresh,
                    Err(e) => {
                        tracing::error!("Reloading config failed: {:#}", e);
                        continue;
                    }
                };
                match run(&folio) {
                    Ok(report) => on_build(&report),
                    Err(e) => tracing::error!("Generation failed: {:#}", e),
                }
            }
            Ok(Err(e)) => tracing::error!("Watch error: {:?}", e),
            Err(e) => {
                tracing::debug!("Watcher closed: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

/// Editor droppings and VCS internals do not trigger a rebuild
fn is_relevant(path: &Path) -> bool {
    let path = path.to_string_lossy();
    !path.contains(".git")
        && !path.contains(".DS_Store")
        && !path.ends_with('~')
        && !path.ends_with(".swp")
}
