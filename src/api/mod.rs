//! HTTP layer exposing an exported dashboard snapshot.
//!
//! The snapshot is what a live Plan server exports: JSON data under `data/`
//! plus static assets. Clients talk to it in static mode, where a missing
//! slice answers 404.

pub mod routes;

use std::{net::SocketAddr, path::PathBuf};

use anyhow::Result;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

#[derive(Clone)]
pub struct SnapshotState {
    pub export_dir: PathBuf,
}

pub fn router(export_dir: PathBuf) -> Router {
    let static_dir = ServeDir::new(&export_dir);
    Router::new()
        .route("/v1/*resource", get(routes::exported_json))
        .fallback_service(static_dir)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(SnapshotState { export_dir })
}

pub async fn serve(export_dir: PathBuf, host: String, port: u16) -> Result<()> {
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, dir = %export_dir.display(), "serving exported snapshot");
    axum::serve(listener, router(export_dir).into_make_service()).await?;
    Ok(())
}
