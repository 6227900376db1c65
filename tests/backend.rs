mod common;

use axum::{
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use plan_dashboard::{
    api,
    cli::{get, graph},
    client::{
        endpoints::{Endpoint, GraphKind},
        standard_200_option, ApiResponse, OutcomeError, StatusOption, NOT_EXPORTED,
        TIMESTAMP_HEADER,
    },
};
use serde_json::{json, Value};

fn live_backend() -> Router {
    Router::new()
        .route(
            "/v1/players",
            get(|headers: HeaderMap| async move {
                let since = headers
                    .get(TIMESTAMP_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                Json(json!({ "players": [], "since": since }))
            }),
        )
        .route(
            "/v1/webGroups",
            post(|Json(body): Json<Value>| async move {
                (StatusCode::CREATED, Json(json!({ "saved": body["name"] })))
            }),
        )
        .route(
            "/v1/webGroups/admin",
            delete(|| async { (StatusCode::CONFLICT, "group still has users") }),
        )
}

#[tokio::test]
async fn freshness_token_is_sent_only_when_given() {
    let addr = common::spawn(live_backend()).await;
    let client = common::client(addr, false);

    let fresh = client.get("/v1/players", Some(1_700_000_000_000)).await;
    assert_eq!(fresh.status(), Some(200));
    assert_eq!(fresh.data().unwrap()["since"], json!("1700000000000"));

    let plain = client.get("/v1/players", None).await;
    assert_eq!(plain.data().unwrap()["since"], Value::Null);
}

#[tokio::test]
async fn post_uses_caller_status_options() {
    let addr = common::spawn(live_backend()).await;
    let client = common::client(addr, false);

    let options = vec![StatusOption::new(201, |reply| {
        reply.response().map(ApiResponse::json_or_text)
    })];
    let outcome = client
        .post("/v1/webGroups", &options, &json!({ "name": "moderators" }))
        .await;
    assert_eq!(outcome.status(), Some(201));
    assert_eq!(outcome.data(), Some(&Some(json!({ "saved": "moderators" }))));
}

#[tokio::test]
async fn post_with_unlisted_success_status_is_unmatched() {
    let addr = common::spawn(live_backend()).await;
    let client = common::client(addr, false);

    let outcome = client
        .post("/v1/webGroups", &[standard_200_option()], &json!({ "name": "x" }))
        .await;
    assert!(matches!(
        outcome.error(),
        Some(OutcomeError::UnmatchedStatus(err)) if err.status == 201
    ));
}

#[tokio::test]
async fn delete_conflict_reaches_error_extractor() {
    let addr = common::spawn(live_backend()).await;
    let client = common::client(addr, false);

    let options = vec![
        StatusOption::new(200, |_| "deleted".to_string()),
        StatusOption::new(409, |reply| {
            reply
                .response()
                .map(|r| r.body.clone())
                .unwrap_or_default()
        }),
    ];
    let outcome = client
        .delete::<_, Value>("/v1/webGroups/admin", &options, None)
        .await;
    assert_eq!(outcome.status(), Some(409));
    assert_eq!(
        outcome.error(),
        Some(&OutcomeError::Handled("group still has users".to_string()))
    );
}

#[tokio::test]
async fn static_snapshot_maps_missing_slice_to_sentinel() {
    let dir = tempfile::tempdir().unwrap();
    common::write_slice(dir.path(), "graph-performance", r#"{"values":[[0,20.0]]}"#);
    let addr = common::spawn(api::router(dir.path().to_path_buf())).await;
    let client = common::client(addr, true);

    let present = Endpoint::Graph {
        kind: GraphKind::Performance,
        server: None,
    };
    let outcome = client.get(&present.path(), None).await;
    assert_eq!(outcome.status(), Some(200));
    assert_eq!(outcome.data(), Some(&json!({"values": [[0, 20.0]]})));

    let missing = Endpoint::Graph {
        kind: GraphKind::PunchCard,
        server: None,
    };
    let outcome = client.get(&missing.path(), None).await;
    assert_eq!(outcome.status(), Some(404));
    assert!(outcome.data().is_none());
    assert_eq!(
        outcome.error(),
        Some(&OutcomeError::Handled(Value::String(NOT_EXPORTED.into())))
    );
    assert!(outcome.is_not_exported());
}

fn graph_args(kinds: Vec<GraphKind>) -> graph::Args {
    graph::Args {
        kinds,
        server: None,
        since: None,
    }
}

#[tokio::test]
async fn graph_command_tolerates_unexported_slices_in_static_mode() {
    let dir = tempfile::tempdir().unwrap();
    common::write_slice(dir.path(), "graph-performance", r#"{"values":[[0,20.0]]}"#);
    let addr = common::spawn(api::router(dir.path().to_path_buf())).await;

    let kinds = vec![GraphKind::Performance, GraphKind::PunchCard];
    let result = graph::run(graph_args(kinds), common::settings(addr, true)).await;
    assert!(result.is_ok(), "static graph run failed: {result:?}");
}

#[tokio::test]
async fn graph_command_fails_on_missing_slice_in_live_mode() {
    let dir = tempfile::tempdir().unwrap();
    common::write_slice(dir.path(), "graph-performance", r#"{"values":[[0,20.0]]}"#);
    let addr = common::spawn(api::router(dir.path().to_path_buf())).await;

    let kinds = vec![GraphKind::Performance, GraphKind::PunchCard];
    let err = graph::run(graph_args(kinds), common::settings(addr, false))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "1 of 2 graph requests failed");
}

#[tokio::test]
async fn get_command_tolerates_unexported_slice_in_static_mode() {
    let dir = tempfile::tempdir().unwrap();
    let addr = common::spawn(api::router(dir.path().to_path_buf())).await;

    let args = get::Args {
        url: "/v1/network/overview".into(),
        since: None,
    };
    assert!(get::run(args, common::settings(addr, true)).await.is_ok());
}

#[tokio::test]
async fn live_mode_reports_missing_slice_as_http_error() {
    let dir = tempfile::tempdir().unwrap();
    let addr = common::spawn(api::router(dir.path().to_path_buf())).await;
    let client = common::client(addr, false);

    let outcome = client.get("/v1/network/overview", None).await;
    match outcome.into_result() {
        Err(OutcomeError::Http(err)) => {
            assert_eq!(err.status, Some(404));
            assert_eq!(err.url, "/v1/network/overview");
            assert_eq!(err.message, "Request failed with status code 404");
            assert!(err.data.unwrap().contains("was not exported"));
        }
        other => panic!("expected http error, got {other:?}"),
    }
}

#[tokio::test]
async fn refused_connection_has_no_status() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = common::client(addr, true);
    let outcome = client.get("/v1/metadata", None).await;
    assert_eq!(outcome.status(), None);
    assert!(outcome.data().is_none());
    match outcome.into_result() {
        Err(OutcomeError::Http(err)) => {
            assert_eq!(err.status, None);
            assert_eq!(err.url, "/v1/metadata");
            assert!(err.data.is_none());
            assert!(!err.message.is_empty());
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}
