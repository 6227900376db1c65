//! CLI entry-points for `post` and `delete`.

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use serde_json::Value;
use tracing::instrument;

use crate::{
    client::{ApiResponse, BackendClient, StatusOption},
    config::Settings,
};

/// Args shared by the write sub-commands.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Path relative to the backend address.
    pub url: String,
    /// JSON request body.
    #[arg(long)]
    pub body: Option<String>,
    /// Status codes to accept, in priority order.
    #[arg(long, value_delimiter = ',', default_value = "200")]
    pub expect: Vec<u16>,
}

impl Args {
    fn body(&self) -> Result<Option<Value>> {
        self.body
            .as_deref()
            .map(|raw| serde_json::from_str(raw).context("--body is not valid JSON"))
            .transpose()
    }

    /// Every expected status yields the response body.
    fn options(&self) -> Vec<StatusOption<Value>> {
        self.expect
            .iter()
            .map(|&status| {
                StatusOption::new(status, |reply| {
                    reply
                        .response()
                        .map(ApiResponse::json_or_text)
                        .unwrap_or(Value::Null)
                })
            })
            .collect()
    }
}

#[instrument(skip(settings))]
pub async fn run_post(args: Args, settings: Settings) -> Result<()> {
    let client = BackendClient::new(&settings)?;
    let body = args.body()?.unwrap_or(Value::Null);
    let outcome = client.post(&args.url, &args.options(), &body).await;
    super::print_outcome(&outcome)
}

#[instrument(skip(settings))]
pub async fn run_delete(args: Args, settings: Settings) -> Result<()> {
    let client = BackendClient::new(&settings)?;
    let body = args.body()?;
    let outcome = client.delete(&args.url, &args.options(), body.as_ref()).await;
    super::print_outcome(&outcome)
}
