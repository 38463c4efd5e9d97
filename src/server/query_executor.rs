use async_trait::async_trait;
use thiserror::Error;

use crate::graph_model::PathRecord;

/// A query failed inside the database client.
///
/// The display text is the message reported back to the caller.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueryExecutionError {
    /// The database rejected or failed the statement (syntax, constraint, ...)
    #[error("{code}: {message}")]
    Database { code: String, message: String },
    #[error("{0}")]
    Timeout(String),
    #[error("{0}")]
    Connection(String),
    /// Unexpected response from the database endpoint
    #[error("{0}")]
    Protocol(String),
}

/// Runs query text against a graph database and returns one record per result row.
///
/// Implementations must be shareable across concurrent requests; each call uses
/// its own session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(
        &self,
        query: &str,
        database: &str,
    ) -> Result<Vec<PathRecord>, QueryExecutionError>;
}
