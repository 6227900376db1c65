//! CLI entry-point for serving an exported snapshot.

use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{api, config::Settings};

/// Run the Axum server.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Snapshot directory; defaults to PLAN_EXPORT_DIR.
    #[arg(long)]
    pub dir: Option<PathBuf>,
    /// Port to bind (default 8804).
    #[arg(long, default_value_t = 8804)]
    pub port: u16,
    /// Host address, defaults to localhost.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let dir = args.dir.unwrap_or(settings.export_dir);
    ensure!(dir.is_dir(), "export directory {} does not exist", dir.display());
    api::serve(dir, args.host, args.port).await
}
