//! Client toolkit for the Plan player analytics web API.
//!
//! Reads pre-aggregated statistics from a Plan webserver (or an exported
//! snapshot of one) and prepares them for display.

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod extensions;
pub mod logging;
pub mod trend;
