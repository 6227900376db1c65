//! Runtime configuration utilities for plan-dashboard.

use std::{env, path::PathBuf};

use tracing::warn;

/// Backend used when no usable address is configured.
pub const DEFAULT_BASE_ADDRESS: &str = "http://localhost:8804";

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Root address of the Plan webserver.
    pub base_address: String,
    /// The backend is an exported snapshot rather than a live server.
    pub static_site: bool,
    /// Per-request timeout.
    pub request_timeout_ms: u64,
    /// Snapshot directory served by `serve`.
    pub export_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_address: DEFAULT_BASE_ADDRESS.to_string(),
            static_site: false,
            request_timeout_ms: 10_000,
            export_dir: PathBuf::from("./export"),
        }
    }
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Ok(Self::from_lookup(|key| env::var(key).ok()))
    }

    /// Resolve settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let base_address = resolve_base_address(lookup("PLAN_BASE_ADDRESS"));
        let static_site = lookup("PLAN_EXPORTED_VERSION").is_some_and(|v| v == "true");
        let request_timeout_ms = lookup("PLAN_REQUEST_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.request_timeout_ms);
        let export_dir = lookup("PLAN_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.export_dir);

        Self {
            base_address,
            static_site,
            request_timeout_ms,
            export_dir,
        }
    }
}

/// Unset, blank, or still-templated (`PLAN_...`) addresses fall back to the
/// default backend.
fn resolve_base_address(configured: Option<String>) -> String {
    match configured {
        Some(address) if address.starts_with("PLAN_") => {
            warn!(
                %address,
                fallback = DEFAULT_BASE_ADDRESS,
                "base address placeholder was never replaced"
            );
            DEFAULT_BASE_ADDRESS.to_string()
        }
        Some(address) if !address.trim().is_empty() => address.trim().to_string(),
        _ => DEFAULT_BASE_ADDRESS.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(vars: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_environment() {
        let s = settings(&[]);
        assert_eq!(s.base_address, DEFAULT_BASE_ADDRESS);
        assert!(!s.static_site);
        assert_eq!(s.request_timeout_ms, 10_000);
    }

    #[test]
    fn placeholder_address_falls_back() {
        let s = settings(&[("PLAN_BASE_ADDRESS", "PLAN_BASE_ADDRESS")]);
        assert_eq!(s.base_address, DEFAULT_BASE_ADDRESS);
    }

    #[test]
    fn exported_flag_must_be_literal_true() {
        assert!(settings(&[("PLAN_EXPORTED_VERSION", "true")]).static_site);
        assert!(!settings(&[("PLAN_EXPORTED_VERSION", "PLAN_EXPORTED_VERSION")]).static_site);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let s = settings(&[
            ("PLAN_BASE_ADDRESS", " https://stats.example.net "),
            ("PLAN_REQUEST_TIMEOUT_MS", "2500"),
            ("PLAN_EXPORT_DIR", "/srv/plan"),
        ]);
        assert_eq!(s.base_address, "https://stats.example.net");
        assert_eq!(s.request_timeout_ms, 2500);
        assert_eq!(s.export_dir, PathBuf::from("/srv/plan"));
    }
}
