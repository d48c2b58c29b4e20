//! Preview server for the built site

use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::commands::generate;
use crate::Folio;

/// Routes for the preview.
///
/// Files come from the build directory first, then from the public
/// directory (so freshly generated articles show up without a rebuild).
/// Any other path gets `index.html`, which is how the static host
/// behaves once `404.html` is in place.
pub fn router(folio: &Folio) -> Router {
    let index = folio.build_dir.join("index.html");
    let files = ServeDir::new(&folio.build_dir)
        .fallback(ServeDir::new(&folio.public_dir).fallback(ServeFile::new(index)));

    Router::new()
        .fallback_service(files)
        .layer(TraceLayer::new_for_http())
}

/// Start the preview server
pub async fn start(folio: &Folio, ip: &str, port: u16, watch: bool) -> Result<()> {
    if !folio.build_dir.join("index.html").exists() {
        tracing::warn!(
            "No index.html in {:?}; only generated data will be served",
            folio.build_dir
        );
    }

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    if watch {
        let folio = folio.clone();
        tokio::task::spawn_blocking(move || {
            let result = generate::watch(&folio, |report| {
                tracing::info!("Regenerated {} articles", report.articles);
            });
            if let Err(e) = result {
                tracing::error!("File watcher error: {:#}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    axum::serve(listener, router(folio))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}
