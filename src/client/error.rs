//! Error values carried inside a [`RequestOutcome`](super::RequestOutcome).

use serde::Serialize;
use thiserror::Error;

/// Generic error record for a failed request that no status option handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message} ({url})")]
pub struct HttpError {
    /// Absent when no response was received at all.
    pub status: Option<u16>,
    pub message: String,
    pub url: String,
    /// Response body, when the failure carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// A successful response whose status has no matching status option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("no status option handles status {status} for {url}")]
pub struct UnmatchedStatus {
    pub status: u16,
    pub url: String,
}

/// Error side of a request outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum OutcomeError<T> {
    /// A status option matched the failed response and produced this value.
    Handled(T),
    Http(HttpError),
    UnmatchedStatus(UnmatchedStatus),
}

impl<T> OutcomeError<T> {
    pub fn handled(&self) -> Option<&T> {
        match self {
            Self::Handled(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for OutcomeError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Handled(value) => write!(f, "{value}"),
            Self::Http(err) => write!(f, "{err}"),
            Self::UnmatchedStatus(err) => write!(f, "{err}"),
        }
    }
}
