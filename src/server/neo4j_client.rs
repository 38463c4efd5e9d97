//! Graph database client over the Neo4j HTTP transaction API.
//!
//! Each query is sent as a single auto-committed transaction:
//!
//! ```text
//! POST {uri}/db/{database}/tx/commit
//! { "statements": [ { "statement": "...", "resultDataContents": ["row", "graph"] } ] }
//! ```
//!
//! Every row comes back as `{"row": [...], "meta": [...], "graph": {...}}`. The
//! `graph` projection is filled in for every row, scalar rows included, so the
//! column `meta` types decide whether a row holds a path, node or relationship.
//! Rows that do carry one become a [`PathRecord`] of their `graph` projection;
//! any other row is passed on as its plain column values, which extraction
//! rejects.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use super::query_executor::{QueryExecutionError, QueryExecutor};
use crate::graph_catalog::Neo4jCredentials;
use crate::graph_model::PathRecord;

const CONNECTIVITY_PROBE: &str = "RETURN 1";
const RESULT_DATA_CONTENTS: [&str; 2] = ["row", "graph"];

#[derive(Debug, Serialize)]
struct CommitRequest<'a> {
    statements: [Statement<'a>; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Statement<'a> {
    statement: &'a str,
    result_data_contents: [&'static str; 2],
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CommitResponse {
    #[serde(default)]
    results: Vec<StatementResult>,
    #[serde(default)]
    errors: Vec<DatabaseError>,
}

#[derive(Debug, Deserialize)]
struct StatementResult {
    #[serde(default)]
    data: Vec<ResultRow>,
}

#[derive(Debug, Deserialize)]
struct ResultRow {
    #[serde(default)]
    row: Vec<Value>,
    #[serde(default)]
    meta: Vec<Value>,
    #[serde(default)]
    graph: Value,
}

impl ResultRow {
    fn has_graph_column(&self) -> bool {
        self.meta.iter().any(is_graph_meta)
    }

    fn into_record(self) -> PathRecord {
        if self.has_graph_column() {
            PathRecord::new(self.graph)
        } else {
            PathRecord::new(Value::Array(self.row))
        }
    }
}

/// Column metadata is an entity object for nodes and relationships, a list of
/// them for paths and collections, and null for scalars.
fn is_graph_meta(meta: &Value) -> bool {
    match meta {
        Value::Object(entity) => matches!(
            entity.get("type").and_then(Value::as_str),
            Some("node" | "relationship")
        ),
        Value::Array(items) => items.iter().any(is_graph_meta),
        _ => false,
    }
}

#[derive(Debug, Deserialize)]
struct DatabaseError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Shared HTTP client for one database endpoint.
///
/// `reqwest::Client` pools connections internally, so one instance serves every
/// request concurrently.
pub struct Neo4jHttpClient {
    http: Client,
    base_url: String,
    username: String,
    password: String,
    timeout: Duration,
}

impl Neo4jHttpClient {
    pub fn new(credentials: &Neo4jCredentials, timeout: Duration) -> Result<Self, QueryExecutionError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QueryExecutionError::Connection(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: credentials.uri.trim_end_matches('/').to_string(),
            username: credentials.username.clone(),
            password: credentials.password.clone(),
            timeout,
        })
    }

    /// Run a trivial statement to check the endpoint, the credentials and the database.
    pub async fn verify_connectivity(&self, database: &str) -> Result<(), QueryExecutionError> {
        log::debug!("Verifying connectivity to {} (database {})", self.base_url, database);
        self.execute(CONNECTIVITY_PROBE, database).await.map(|_| ())
    }

    fn commit_url(&self, database: &str) -> String {
        format!("{}/db/{}/tx/commit", self.base_url, database)
    }

    fn map_transport_error(&self, error: reqwest::Error) -> QueryExecutionError {
        if error.is_timeout() {
            QueryExecutionError::Timeout(format!(
                "Query timed out after {}s",
                self.timeout.as_secs()
            ))
        } else if error.is_connect() {
            QueryExecutionError::Connection(format!(
                "Cannot connect to graph database at {}: {}",
                self.base_url, error
            ))
        } else {
            QueryExecutionError::Protocol(error.to_string())
        }
    }
}

#[async_trait]
impl QueryExecutor for Neo4jHttpClient {
    async fn execute(
        &self,
        query: &str,
        database: &str,
    ) -> Result<Vec<PathRecord>, QueryExecutionError> {
        let body = CommitRequest {
            statements: [Statement {
                statement: query,
                result_data_contents: RESULT_DATA_CONTENTS,
            }],
        };

        let response = self
            .http
            .post(self.commit_url(database))
            .basic_auth(&self.username, Some(&self.password))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        records_from_body(status, &bytes)
    }
}

/// Turn a commit response into path records, surfacing database errors.
pub(crate) fn records_from_body(
    status: reqwest::StatusCode,
    body: &[u8],
) -> Result<Vec<PathRecord>, QueryExecutionError> {
    match serde_json::from_slice::<CommitResponse>(body) {
        Ok(parsed) if !parsed.errors.is_empty() || status.is_success() => records_from_response(parsed),
        Ok(_) => Err(QueryExecutionError::Protocol(format!(
            "Graph database returned HTTP {}",
            status
        ))),
        Err(e) if status.is_success() => Err(QueryExecutionError::Protocol(format!(
            "Unreadable response from graph database: {}",
            e
        ))),
        Err(_) => Err(QueryExecutionError::Protocol(format!(
            "Graph database returned HTTP {}: {}",
            status,
            String::from_utf8_lossy(body)
        ))),
    }
}

pub(crate) fn records_from_response(
    response: CommitResponse,
) -> Result<Vec<PathRecord>, QueryExecutionError> {
    if let Some(error) = response.errors.into_iter().next() {
        log::debug!("Database error {}: {}", error.code, error.message);
        return Err(QueryExecutionError::Database {
            code: error.code,
            message: error.message,
        });
    }

    Ok(response
        .results
        .into_iter()
        .flat_map(|result| result.data)
        .map(ResultRow::into_record)
        .collect())
}
