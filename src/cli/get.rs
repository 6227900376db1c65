//! CLI entry-point for reading a backend resource.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{client::BackendClient, config::Settings};

/// Args for the `get` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Path relative to the backend address, e.g. /v1/players.
    pub url: String,
    /// Only return data newer than this (epoch millis or RFC 3339).
    #[arg(long)]
    pub since: Option<String>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let client = BackendClient::new(&settings)?;
    let since = args.since.as_deref().map(super::parse_since).transpose()?;
    info!(url = %args.url, static_site = client.static_site(), "reading resource");
    let outcome = client.get(&args.url, since).await;
    super::print_outcome(&outcome)
}
