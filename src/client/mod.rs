//! HTTP access to the Plan backend.

pub mod dispatch;
pub mod endpoints;
pub mod error;

use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::config::Settings;

pub use dispatch::{dispatch, ApiResponse, Reply, RequestFailure, RequestOutcome, StatusOption};
pub use error::{HttpError, OutcomeError, UnmatchedStatus};

/// Freshness token header; the backend answers with newer data only.
pub const TIMESTAMP_HEADER: &str = "X-Plan-Timestamp";

/// Payload returned for slices missing from an exported snapshot.
pub const NOT_EXPORTED: &str = "Data not yet exported";

/// `200 -> JSON body`.
pub fn standard_200_option() -> StatusOption<Value> {
    StatusOption::new(200, |reply| {
        reply
            .response()
            .map(ApiResponse::json_or_text)
            .unwrap_or(Value::Null)
    })
}

/// `404 -> NOT_EXPORTED`, for static snapshots.
pub fn exported_404_option() -> StatusOption<Value> {
    StatusOption::new(404, |_| Value::String(NOT_EXPORTED.to_string()))
}

impl RequestOutcome<Value> {
    /// True for the handled 404 of a static snapshot.
    pub fn is_not_exported(&self) -> bool {
        matches!(
            self.error().and_then(|e| e.handled()),
            Some(Value::String(message)) if message == NOT_EXPORTED
        )
    }
}

/// Client bound to one backend base address.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_address: String,
    static_site: bool,
}

impl BackendClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("plan-dashboard/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_millis(settings.request_timeout_ms))
            .gzip(true)
            .brotli(true)
            .build()?;
        Ok(Self {
            http,
            base_address: settings.base_address.trim_end_matches('/').to_string(),
            static_site: settings.static_site,
        })
    }

    pub fn static_site(&self) -> bool {
        self.static_site
    }

    fn absolute(&self, url: &str) -> String {
        format!("{}{url}", self.base_address)
    }

    /// Read `url` with the default status options for the current mode.
    pub async fn get(&self, url: &str, update_requested: Option<i64>) -> RequestOutcome<Value> {
        let mut options = vec![standard_200_option()];
        if self.static_site {
            options.push(exported_404_option());
        }
        self.get_with(url, update_requested, &options).await
    }

    pub async fn get_with<T>(
        &self,
        url: &str,
        update_requested: Option<i64>,
        options: &[StatusOption<T>],
    ) -> RequestOutcome<T> {
        let mut request = self.http.get(self.absolute(url));
        if let Some(timestamp) = update_requested {
            request = request.header(TIMESTAMP_HEADER, timestamp.to_string());
        }
        dispatch(url, options, || send(request)).await
    }

    pub async fn post<T, B>(
        &self,
        url: &str,
        options: &[StatusOption<T>],
        body: &B,
    ) -> RequestOutcome<T>
    where
        B: Serialize + ?Sized,
    {
        let request = self.http.post(self.absolute(url)).json(body);
        dispatch(url, options, || send(request)).await
    }

    pub async fn delete<T, B>(
        &self,
        url: &str,
        options: &[StatusOption<T>],
        body: Option<&B>,
    ) -> RequestOutcome<T>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.http.delete(self.absolute(url));
        if let Some(body) = body {
            request = request.json(body);
        }
        dispatch(url, options, || send(request)).await
    }
}

/// Execute a request, surfacing non-2xx responses as failures that keep the
/// response.
pub async fn send(request: RequestBuilder) -> Result<ApiResponse, RequestFailure> {
    let response = request
        .send()
        .await
        .map_err(|err| RequestFailure::transport(err.to_string()))?;
    let status = response.status().as_u16();
    let url = response.url().to_string();
    let body = response.text().await.map_err(|err| err.to_string());
    classify_response(status, url, body)
}

/// A body that could not be read still keeps the status that arrived; the
/// response is recorded with an empty body.
fn classify_response(
    status: u16,
    url: String,
    body: Result<String, String>,
) -> Result<ApiResponse, RequestFailure> {
    match body {
        Ok(body) => {
            let response = ApiResponse::new(status, url, body);
            if (200..300).contains(&status) {
                Ok(response)
            } else {
                Err(RequestFailure::status(response))
            }
        }
        Err(message) => {
            warn!(%url, status, error = %message, "failed to read response body");
            Err(RequestFailure {
                message,
                response: Some(ApiResponse::new(status, url, String::new())),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_body_keeps_status() {
        let failure = classify_response(
            502,
            "http://localhost:8804/v1/players".into(),
            Err("error decoding response body".into()),
        )
        .unwrap_err();
        assert_eq!(failure.response_status(), Some(502));
        assert_eq!(failure.message, "error decoding response body");
        assert_eq!(failure.response.unwrap().body, "");
    }

    #[test]
    fn non_2xx_body_becomes_failure() {
        let failure = classify_response(500, "/v1/players".into(), Ok("boom".into())).unwrap_err();
        assert_eq!(failure.message, "Request failed with status code 500");
        assert!(classify_response(204, "/v1/players".into(), Ok(String::new())).is_ok());
    }

    #[tokio::test]
    async fn only_sentinel_counts_as_not_exported() {
        let options = vec![standard_200_option(), exported_404_option()];
        let missing = dispatch("/v1/graph", &options, || async {
            Err::<ApiResponse, _>(RequestFailure::status(ApiResponse::new(404, "/v1/graph", "")))
        })
        .await;
        assert!(missing.is_not_exported());

        let broken = dispatch("/v1/graph", &options, || async {
            Err::<ApiResponse, _>(RequestFailure::status(ApiResponse::new(500, "/v1/graph", "")))
        })
        .await;
        assert!(!broken.is_not_exported());

        let served = dispatch("/v1/graph", &options, || async {
            Ok::<_, RequestFailure>(ApiResponse::new(200, "/v1/graph", "\"Data not yet exported\""))
        })
        .await;
        assert!(served.is_success());
        assert!(!served.is_not_exported());
    }
}
