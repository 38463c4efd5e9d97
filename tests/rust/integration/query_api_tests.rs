use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use graphlens::graph_catalog::ColorSchema;
use graphlens::graph_model::PathRecord;
use graphlens::server::{
    build_router,
    query_executor::{QueryExecutionError, QueryExecutor},
    query_service::QueryService,
    AppState,
};
use mockall::{mock, predicate};
use serde_json::{json, Value};
use tower::ServiceExt;

mock! {
    pub Executor {}

    #[async_trait]
    impl QueryExecutor for Executor {
        async fn execute(
            &self,
            query: &str,
            database: &str,
        ) -> Result<Vec<PathRecord>, QueryExecutionError>;
    }
}

const SCHEMA: &str = r#"{
    "default": "gray",
    "property": { "status": { "active": "green", "inactive": "red" } },
    "labels": { "Person": "blue", "Company": "orange" },
    "input_properties": ["status", "name"]
}"#;

fn app(executor: MockExecutor) -> Router {
    let schema = Arc::new(ColorSchema::from_json_str(SCHEMA).unwrap());
    let state = Arc::new(AppState {
        query_service: QueryService::new(Arc::new(executor), "neo4j", schema),
    });
    build_router(state, None, 64 * 1024)
}

fn query_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/query")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn person(id: &str, status: Option<&str>) -> Value {
    let properties = match status {
        Some(s) => json!({ "name": id, "status": s }),
        None => json!({ "name": id }),
    };
    json!({ "elementId": id, "labels": ["Person"], "properties": properties })
}

fn knows(from: &str, to: &str) -> Value {
    json!({
        "type": "KNOWS",
        "startNodeElementId": from,
        "endNodeElementId": to,
        "properties": {}
    })
}

#[tokio::test]
async fn query_returns_colored_graph() {
    let mut executor = MockExecutor::new();
    executor
        .expect_execute()
        .with(
            predicate::eq("MATCH p=(:Person)-[:KNOWS]->() RETURN p"),
            predicate::eq("neo4j"),
        )
        .times(1)
        .returning(|_, _| {
            Ok(vec![
                PathRecord::from_parts(
                    vec![person("alice", Some("Active")), person("bob", None)],
                    vec![knows("alice", "bob")],
                ),
                PathRecord::from_parts(
                    vec![person("alice", Some("inactive")), person("carol", Some("INACTIVE"))],
                    vec![knows("alice", "carol")],
                ),
            ])
        });

    let (status, body) = send(
        app(executor),
        query_request(r#"{"query": "MATCH p=(:Person)-[:KNOWS]->() RETURN p"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let nodes = body["nodes"].as_array().unwrap();
    let colors: Vec<(&str, &str)> = nodes
        .iter()
        .map(|n| (n["id"].as_str().unwrap(), n["color"].as_str().unwrap()))
        .collect();
    assert_eq!(colors, vec![("alice", "green"), ("bob", "blue"), ("carol", "red")]);
    assert_eq!(nodes[0]["properties"]["status"], json!("Active"));
    assert_eq!(body["links"].as_array().unwrap().len(), 2);
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn executor_timeout_is_reported_as_error_body() {
    let mut executor = MockExecutor::new();
    executor
        .expect_execute()
        .returning(|_, _| Err(QueryExecutionError::Timeout("timeout".to_string())));

    let (status, body) = send(app(executor), query_request(r#"{"query": "MATCH (n) RETURN n"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "error": "timeout" }));
}

#[tokio::test]
async fn malformed_rows_yield_error_without_partial_graph() {
    let mut executor = MockExecutor::new();
    executor.expect_execute().returning(|_, _| {
        Ok(vec![
            PathRecord::from_parts(vec![person("alice", None)], vec![]),
            // `RETURN 1` row: plain column values, no graph column
            PathRecord::new(json!([1])),
        ])
    });

    let (_, body) = send(app(executor), query_request(r#"{"query": "RETURN 1"}"#)).await;
    assert!(body["error"].as_str().unwrap().contains("Record 1"));
    assert!(body.get("nodes").is_none());
    assert!(body.get("links").is_none());
}

#[tokio::test]
async fn missing_query_is_rejected_without_execution() {
    for payload in [r#"{}"#, r#"{"query": ""}"#, r#"{"query": null}"#, r#"{"query": "  "}"#, "not json"] {
        let mut executor = MockExecutor::new();
        executor.expect_execute().times(0);

        let (status, body) = send(app(executor), query_request(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
        assert_eq!(body, json!({ "error": "No query provided" }));
    }
}

#[tokio::test]
async fn oversized_body_keeps_its_own_status() {
    let mut executor = MockExecutor::new();
    executor.expect_execute().times(0);

    let payload = format!(
        r#"{{"query": "MATCH (n) WHERE n.note = '{}' RETURN n"}}"#,
        "x".repeat(100 * 1024)
    );
    let (status, body) = send(app(executor), query_request(&payload)).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    let error = body["error"].as_str().unwrap();
    assert_ne!(error, "No query provided");
}

#[tokio::test]
async fn wrongly_typed_query_is_not_reported_as_missing() {
    let mut executor = MockExecutor::new();
    executor.expect_execute().times(0);

    let (status, body) = send(app(executor), query_request(r#"{"query": 5}"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_ne!(body["error"], json!("No query provided"));
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn labels_are_sorted() {
    let request = Request::builder().uri("/labels").body(Body::empty()).unwrap();
    let (status, body) = send(app(MockExecutor::new()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "labels": ["Company", "Person"], "input_properties": ["name", "status"] })
    );
}

#[tokio::test]
async fn health_check_reports_healthy() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app(MockExecutor::new()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("healthy"));
}

#[tokio::test]
async fn concurrent_queries_are_independent() {
    let mut executor = MockExecutor::new();
    executor.expect_execute().returning(|query, _| {
        if query.contains("fail") {
            Err(QueryExecutionError::Connection("connection reset".to_string()))
        } else {
            Ok(vec![PathRecord::from_parts(vec![person(query, None)], vec![])])
        }
    });
    let app = app(executor);

    let mut handles = Vec::new();
    for i in 0..8 {
        let app = app.clone();
        let query = if i % 2 == 0 { format!("q{}", i) } else { format!("fail{}", i) };
        handles.push(tokio::spawn(async move {
            let body = format!(r#"{{"query": "{}"}}"#, query);
            (query, send(app, query_request(&body)).await.1)
        }));
    }

    for handle in handles {
        let (query, body) = handle.await.unwrap();
        if query.starts_with("fail") {
            assert_eq!(body, json!({ "error": "connection reset" }));
        } else {
            assert_eq!(body["nodes"][0]["id"], json!(query));
        }
    }
}
