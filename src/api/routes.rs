//! HTTP route handlers for Axum.

use std::io::ErrorKind;

use axum::{
    extract::{Path, RawQuery, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use tracing::{debug, warn};

use super::SnapshotState;

type ApiResult<T> = Result<T, (StatusCode, String)>;

/// File stem an exported `/v1/<resource>?<query>` response is stored under.
///
/// `?` becomes `-`, `&` becomes `_`, and the `type=`/`player=` keys are
/// dropped; anything else that is not safe in a file name becomes `_`.
pub fn snapshot_file_name(resource: &str, query: Option<&str>) -> String {
    let mut name = resource.trim_matches('/').to_string();
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        name.push('?');
        name.push_str(query);
    }
    let decoded = urlencoding::decode(&name).map(|d| d.into_owned()).ok();
    let name = decoded.unwrap_or(name);
    name.replace('?', "-")
        .replace('&', "_")
        .replace("type=", "")
        .replace("player=", "")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '=' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub async fn exported_json(
    State(state): State<SnapshotState>,
    Path(resource): Path<String>,
    RawQuery(query): RawQuery,
) -> ApiResult<impl IntoResponse> {
    let name = snapshot_file_name(&resource, query.as_deref());
    if name.is_empty() || name.chars().all(|c| c == '.') {
        return Err((StatusCode::BAD_REQUEST, "invalid resource".to_string()));
    }
    let path = state.export_dir.join("data").join(format!("{name}.json"));
    debug!(path = %path.display(), "reading exported slice");

    match tokio::fs::read_to_string(&path).await {
        Ok(body) => Ok(([(header::CONTENT_TYPE, "application/json")], body)),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            Err((StatusCode::NOT_FOUND, format!("{resource} was not exported")))
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read exported slice");
            Err((StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))
        }
    }
}
