//! CLI entry-point for classifying a trend.

use anyhow::Result;
use clap::Args as ClapArgs;

use crate::trend::{
    presentation::{marker, Presentation},
    TrendDescriptor,
};

/// Args for the `trend` sub-command. Without `--direction` the trend is
/// treated as unknown.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// `+`, `-`, or anything else for no change.
    #[arg(long, allow_hyphen_values = true)]
    pub direction: Option<String>,
    #[arg(long, default_value = "")]
    pub text: String,
    /// An increase is bad for this metric.
    #[arg(long)]
    pub reversed: bool,
    /// Inline caret instead of a badge.
    #[arg(long)]
    pub compact: bool,
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: Args) -> Result<()> {
    let descriptor = args
        .direction
        .map(|direction| TrendDescriptor::new(direction, args.text, args.reversed));
    let mode = if args.compact {
        Presentation::Compact
    } else {
        Presentation::Badge
    };
    let marker = marker(descriptor.as_ref(), mode);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&marker)?);
    } else {
        println!("{}", marker.to_plain());
    }
    Ok(())
}
