//! Command-line interface wiring for plan-dashboard.

use anyhow::{anyhow, Context, Result};
use chrono::DateTime;
use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::client::{RequestOutcome, NOT_EXPORTED};
use crate::config::Settings;

pub mod extensions;
pub mod get;
pub mod graph;
pub mod serve;
pub mod trend;
pub mod write;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Plan analytics dashboard client", long_about = None)]
pub struct Cli {
    /// Treat the backend as an exported snapshot (404 = not exported).
    #[arg(long = "static", global = true)]
    static_site: bool,
    /// Override the backend address.
    #[arg(long, global = true)]
    address: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, mut settings: Settings) -> Result<()> {
        if self.static_site {
            settings.static_site = true;
        }
        if let Some(address) = self.address {
            settings.base_address = address;
        }
        match self.command {
            Commands::Get(args) => get::run(args, settings).await,
            Commands::Post(args) => write::run_post(args, settings).await,
            Commands::Delete(args) => write::run_delete(args, settings).await,
            Commands::Graph(args) => graph::run(args, settings).await,
            Commands::Extensions(args) => extensions::run(args, settings).await,
            Commands::Trend(args) => trend::run(args),
            Commands::Serve(args) => serve::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Read a backend resource.
    Get(get::Args),
    /// Send a JSON body to a backend resource.
    Post(write::Args),
    /// Delete a backend resource.
    Delete(write::Args),
    /// Fetch one or more graph data sets.
    Graph(graph::Args),
    /// Show plugin extension data for a server.
    Extensions(extensions::Args),
    /// Classify a trend and print its marker.
    Trend(trend::Args),
    /// Serve an exported snapshot over HTTP.
    Serve(serve::Args),
}

/// Freshness token: epoch milliseconds or an RFC 3339 timestamp.
pub fn parse_since(value: &str) -> Result<i64> {
    if let Ok(millis) = value.parse::<i64>() {
        return Ok(millis);
    }
    let parsed = DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("'{value}' is neither epoch millis nor RFC 3339"))?;
    Ok(parsed.timestamp_millis())
}

/// Print an outcome as JSON on stdout; failed outcomes become an error exit.
/// A slice missing from a static snapshot is reported, not failed.
pub fn print_outcome(outcome: &RequestOutcome<Value>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(outcome)?);
    if outcome.is_success() {
        Ok(())
    } else if outcome.is_not_exported() {
        eprintln!("{NOT_EXPORTED}");
        Ok(())
    } else {
        Err(anyhow!(
            "request did not succeed (status {:?})",
            outcome.status()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn since_accepts_millis_and_rfc3339() {
        assert_eq!(parse_since("1700000000000").unwrap(), 1_700_000_000_000);
        assert_eq!(
            parse_since("2023-11-14T22:13:20Z").unwrap(),
            1_700_000_000_000
        );
        assert!(parse_since("yesterday").is_err());
    }
}
