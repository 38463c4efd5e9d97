//! End-to-end tests - Require a running graph database
//!
//! Configure with NEO4J_URI (HTTP endpoint), NEO4J_USERNAME, NEO4J_PASSWORD and
//! optionally NEO4J_DATABASE, then run with `--ignored`.

use std::sync::Arc;
use std::time::Duration;

use graphlens::graph_catalog::{ColorSchema, Neo4jCredentials};
use graphlens::server::{neo4j_client::Neo4jHttpClient, query_service::QueryService};

#[tokio::test]
#[ignore = "requires a live graph database"]
async fn path_query_round_trip() {
    let credentials = Neo4jCredentials::from_env().expect("NEO4J_* variables must be set");
    let client = Neo4jHttpClient::new(&credentials, Duration::from_secs(10)).unwrap();
    client
        .verify_connectivity(&credentials.database)
        .await
        .expect("database should be reachable");

    let schema = ColorSchema::from_json_str(
        r#"{"default": "gray", "labels": {"E2ENode": "blue"}}"#,
    )
    .unwrap();
    let service = QueryService::new(Arc::new(client), credentials.database.clone(), Arc::new(schema));

    let graph = service
        .run_query(
            "MERGE (a:E2ENode {name: 'a'})-[r:E2E_LINK]->(b:E2ENode {name: 'b'}) \
             WITH a, b MATCH p=(a)-[:E2E_LINK]->(b) RETURN p",
        )
        .await
        .unwrap();

    assert!(graph.nodes.iter().all(|n| n.color == "blue"));
    assert!(!graph.links.is_empty());
    assert!(graph.links.iter().all(|l| l.rel_type == "E2E_LINK"));

    service
        .run_query("MATCH (n:E2ENode) DETACH DELETE n")
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "requires a live graph database"]
async fn syntax_error_is_reported() {
    let credentials = Neo4jCredentials::from_env().expect("NEO4J_* variables must be set");
    let client = Neo4jHttpClient::new(&credentials, Duration::from_secs(10)).unwrap();
    let service = QueryService::new(
        Arc::new(client),
        credentials.database.clone(),
        Arc::new(ColorSchema::new("gray")),
    );

    let err = service.run_query("MATC (n) RETURN n").await.unwrap_err();
    assert!(err.to_string().contains("SyntaxError"));
}

#[tokio::test]
#[ignore = "requires a live graph database"]
async fn scalar_result_is_not_a_graph() {
    let credentials = Neo4jCredentials::from_env().expect("NEO4J_* variables must be set");
    let client = Neo4jHttpClient::new(&credentials, Duration::from_secs(10)).unwrap();
    let service = QueryService::new(
        Arc::new(client),
        credentials.database.clone(),
        Arc::new(ColorSchema::new("gray")),
    );

    let err = service.run_query("RETURN 1").await.unwrap_err();
    assert!(err.to_string().starts_with("Record 0"));
}
