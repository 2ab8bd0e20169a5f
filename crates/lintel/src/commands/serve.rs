//! Preview command for assembled pages.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::Router;
use tower_http::services::ServeDir;
use walkdir::WalkDir;

use super::assemble;

/// Run the serve command. With no explicit directory, the output dir from
/// site.toml is served, so `lintel assemble && lintel serve` just works.
pub async fn run(config_path: &Path, port: u16, dir: Option<PathBuf>) -> Result<()> {
    let dir = match dir {
        Some(dir) => dir,
        None => assemble::configured_output(config_path)?,
    };

    if !dir.exists() {
        anyhow::bail!(
            "Output directory not found: {}. Run 'lintel assemble' first.",
            dir.display()
        );
    }

    let pages = count_pages(&dir);
    if pages == 0 {
        tracing::warn!(
            "No assembled pages under {}; serving it anyway",
            dir.display()
        );
    }

    let addr: SocketAddr = format!("127.0.0.1:{}", port)
        .parse()
        .context("Invalid address")?;

    tracing::info!(
        "Serving {} assembled pages from {} at http://{}",
        pages,
        dir.display(),
        addr
    );

    let app = Router::new().fallback_service(ServeDir::new(&dir));

    let listener = tokio::net::TcpListener::bind(addr).await?;

    let url = format!("http://{}", addr);
    let _ = open::that(&url);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Count the assembled pages under a directory.
fn count_pages(dir: &Path) -> usize {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| e.path().extension().and_then(|ext| ext.to_str()) == Some("html"))
        .count()
}
