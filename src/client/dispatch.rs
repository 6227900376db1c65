//! Status-code driven request dispatch.
//!
//! A request is executed once and its status code is looked up in a
//! caller-supplied, ordered table of [`StatusOption`]s. Every path, including
//! transport failures, ends up as a [`RequestOutcome`] value.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use thiserror::Error;
use tracing::{error, warn};

use super::error::{HttpError, OutcomeError, UnmatchedStatus};

/// Fully read HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub url: String,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            url: url.into(),
            body: body.into(),
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }

    /// Body as JSON, or as a JSON string when it is not valid JSON.
    pub fn json_or_text(&self) -> serde_json::Value {
        self.json()
            .unwrap_or_else(|_| serde_json::Value::String(self.body.clone()))
    }
}

/// A request that did not complete with a 2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RequestFailure {
    pub message: String,
    /// The non-2xx response, absent for transport failures.
    pub response: Option<ApiResponse>,
}

impl RequestFailure {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            response: None,
        }
    }

    pub fn status(response: ApiResponse) -> Self {
        Self {
            message: format!("Request failed with status code {}", response.status),
            response: Some(response),
        }
    }

    pub fn response_status(&self) -> Option<u16> {
        self.response.as_ref().map(|r| r.status)
    }
}

/// What a status option extractor gets to look at.
#[derive(Debug, Clone, Copy)]
pub enum Reply<'a> {
    Success(&'a ApiResponse),
    Failure(&'a RequestFailure),
}

impl<'a> Reply<'a> {
    /// The response behind this reply, whichever path it came through.
    pub fn response(&self) -> Option<&'a ApiResponse> {
        match *self {
            Self::Success(response) => Some(response),
            Self::Failure(failure) => failure.response.as_ref(),
        }
    }

    pub fn failure(&self) -> Option<&'a RequestFailure> {
        match *self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }
}

type Extractor<T> = Box<dyn Fn(Reply<'_>) -> T + Send + Sync>;

/// Expected status code paired with the extractor producing the payload.
pub struct StatusOption<T> {
    pub status: u16,
    get: Extractor<T>,
}

impl<T> StatusOption<T> {
    pub fn new<F>(status: u16, get: F) -> Self
    where
        F: Fn(Reply<'_>) -> T + Send + Sync + 'static,
    {
        Self {
            status,
            get: Box::new(get),
        }
    }

    pub fn extract(&self, reply: Reply<'_>) -> T {
        (self.get)(reply)
    }
}

impl<T> std::fmt::Debug for StatusOption<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusOption")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Uniform result of [`dispatch`]. Exactly one of data and error is set;
/// the fields stay private so that holds for every value.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOutcome<T> {
    status: Option<u16>,
    result: Result<T, OutcomeError<T>>,
}

impl<T> RequestOutcome<T> {
    fn success(status: u16, data: T) -> Self {
        Self {
            status: Some(status),
            result: Ok(data),
        }
    }

    fn failed(status: Option<u16>, error: OutcomeError<T>) -> Self {
        Self {
            status,
            result: Err(error),
        }
    }

    /// Absent when no response was received.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn data(&self) -> Option<&T> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&OutcomeError<T>> {
        self.result.as_ref().err()
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn into_result(self) -> Result<T, OutcomeError<T>> {
        self.result
    }
}

impl<T: Serialize> Serialize for RequestOutcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RequestOutcome", 3)?;
        state.serialize_field("status", &self.status)?;
        state.serialize_field("data", &self.data())?;
        state.serialize_field("error", &self.error())?;
        state.end()
    }
}

fn find<T>(options: &[StatusOption<T>], status: u16) -> Option<&StatusOption<T>> {
    options.iter().find(|option| option.status == status)
}

/// Run `execute` once and classify its result against `options`.
///
/// `url` is only used for diagnostics and generic error records.
pub async fn dispatch<T, F, Fut>(
    url: &str,
    options: &[StatusOption<T>],
    execute: F,
) -> RequestOutcome<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<ApiResponse, RequestFailure>>,
{
    let failure = match execute().await {
        Ok(response) => {
            return match find(options, response.status) {
                Some(option) => RequestOutcome::success(
                    response.status,
                    option.extract(Reply::Success(&response)),
                ),
                None => {
                    warn!(%url, status = response.status, "no status option for response");
                    RequestOutcome::failed(
                        Some(response.status),
                        OutcomeError::UnmatchedStatus(UnmatchedStatus {
                            status: response.status,
                            url: url.to_string(),
                        }),
                    )
                }
            };
        }
        Err(failure) => failure,
    };

    error!(
        %url,
        status = ?failure.response_status(),
        error = %failure.message,
        "request failed"
    );

    let Some(response) = &failure.response else {
        return RequestOutcome::failed(
            None,
            OutcomeError::Http(HttpError {
                status: None,
                message: failure.message.clone(),
                url: url.to_string(),
                data: None,
            }),
        );
    };

    match find(options, response.status) {
        Some(option) => RequestOutcome::failed(
            Some(response.status),
            OutcomeError::Handled(option.extract(Reply::Failure(&failure))),
        ),
        None => RequestOutcome::failed(
            Some(response.status),
            OutcomeError::Http(HttpError {
                status: Some(response.status),
                message: failure.message.clone(),
                url: url.to_string(),
                data: Some(response.body.clone()),
            }),
        ),
    }
}
