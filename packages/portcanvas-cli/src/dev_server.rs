use anyhow::{Context, Result, bail};
use axum::Router;
use std::net::SocketAddr;
use std::path::Path;
use tower_http::services::ServeDir;
use tracing::info;

/// Serves `dir` as static files, e.g. a built demo page and its wasm bundle.
pub async fn serve(dir: &Path, port: u16) -> Result<()> {
    if !dir.is_dir() {
        bail!("{} is not a directory; run `portcanvas build-demo` first", dir.display());
    }

    let app = Router::new().fallback_service(ServeDir::new(dir));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!("serving {} at http://{}", dir.display(), addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
