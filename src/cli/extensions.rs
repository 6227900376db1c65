//! CLI entry-point for plugin extension data.

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    client::{endpoints::Endpoint, BackendClient, NOT_EXPORTED},
    config::Settings,
    extensions::{ExtensionData, TabSection, ValueLine},
};

/// Args for the `extensions` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Server name or UUID.
    #[arg(long)]
    pub server: String,
    /// Print rendered sections as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let client = BackendClient::new(&settings)?;
    let path = Endpoint::ExtensionData {
        server: args.server.clone(),
    }
    .path();
    let outcome = client.get(&path, None).await;
    if outcome.is_not_exported() {
        println!("{NOT_EXPORTED}");
        return Ok(());
    }
    let payload = match outcome.into_result() {
        Ok(payload) => payload,
        Err(err) => anyhow::bail!("fetching {path} failed: {}", serde_json::to_string(&err)?),
    };
    let data = ExtensionData::from_json(payload).context("parsing extension data")?;

    for extension in &data.extensions {
        let mut rendered = Vec::new();
        for tab in &extension.tabs {
            rendered.push((tab.tab_information.tab_name.clone(), tab.render()?));
        }
        if args.json {
            println!("{}", serde_json::to_string_pretty(&rendered)?);
            continue;
        }
        println!("== {}", extension.extension_information.plugin_name);
        for (tab_name, sections) in rendered {
            if !extension.only_generic_tab {
                println!("-- {tab_name}");
            }
            for section in sections {
                print_section(&section);
            }
        }
    }
    Ok(())
}

fn print_section(section: &TabSection) {
    match section {
        TabSection::Values { lines } => {
            for line in lines {
                match line {
                    ValueLine::Markup { name, html, .. } => println!("{name}: {html}"),
                    ValueLine::Component {
                        name, component, ..
                    } => println!("{name}: {component}"),
                    ValueLine::Datapoint(point) => {
                        if let Some(text) = point.render_plain() {
                            println!("{text}");
                        }
                    }
                }
            }
        }
        TabSection::Table { columns, rows } => {
            println!("{}", columns.join(" | "));
            for row in rows {
                let cells: Vec<String> = row
                    .iter()
                    .map(|cell| match cell.as_str() {
                        Some(text) => text.to_string(),
                        None => cell.to_string(),
                    })
                    .collect();
                println!("{}", cells.join(" | "));
            }
        }
    }
}
