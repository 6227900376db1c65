//! CLI entry-point for fetching graph data sets.

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use clap::Args as ClapArgs;
use futures::stream::{self, StreamExt};
use tracing::{info, instrument, warn};

use crate::{
    client::{
        endpoints::{Endpoint, GraphKind},
        BackendClient,
    },
    config::Settings,
};

/// Args for the `graph` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Comma separated graph types (e.g. performance,punchCard).
    #[arg(long = "type", value_delimiter = ',', required = true)]
    pub kinds: Vec<GraphKind>,
    /// Restrict to one server; omitted means network wide.
    #[arg(long)]
    pub server: Option<String>,
    #[arg(long)]
    pub since: Option<String>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let client = BackendClient::new(&settings)?;
    let since = args.since.as_deref().map(super::parse_since).transpose()?;

    let concurrency = 4usize;
    let outcomes = stream::iter(args.kinds.clone())
        .map(|kind| {
            let client = client.clone();
            let server = args.server.clone();
            async move {
                let path = Endpoint::Graph { kind, server }.path();
                info!(%kind, %path, "fetching graph");
                (kind, client.get(&path, since).await)
            }
        })
        .buffer_unordered(concurrency)
        .collect::<Vec<_>>()
        .await;

    let failed = outcomes
        .iter()
        .filter(|(_, o)| !o.is_success() && !o.is_not_exported())
        .count();
    let by_kind: BTreeMap<String, _> = outcomes
        .into_iter()
        .map(|(kind, outcome)| (kind.to_string(), outcome))
        .collect();
    println!("{}", serde_json::to_string_pretty(&by_kind)?);

    if failed > 0 {
        warn!(failed, "some graphs could not be fetched");
        bail!("{failed} of {} graph requests failed", by_kind.len());
    }
    Ok(())
}
