use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use super::{models::ErrorResponse, query_executor::QueryExecutionError};
use crate::{config::ConfigError, graph_model::ExtractionError};

/// Per-request failure, reported to the caller as `{"error": message}`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueryError {
    /// The request carried no query text; the database was not contacted
    #[error("{0}")]
    Validation(String),
    /// The request body could not be read as a query request
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error(transparent)]
    Execution(#[from] QueryExecutionError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

impl QueryError {
    pub fn missing_query() -> Self {
        QueryError::Validation("No query provided".to_string())
    }

    /// Only malformed requests are client errors. Query failures are delivered
    /// as a regular response carrying the error message.
    pub fn status_code(&self) -> StatusCode {
        match self {
            QueryError::Validation(_) => StatusCode::BAD_REQUEST,
            QueryError::Rejected { status, .. } => *status,
            QueryError::Execution(_) | QueryError::Extraction(_) => StatusCode::OK,
        }
    }
}

impl From<JsonRejection> for QueryError {
    fn from(rejection: JsonRejection) -> Self {
        QueryError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Fatal errors raised before the server starts accepting requests.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Graph database is unreachable: {0}")]
    Connectivity(QueryExecutionError),

    #[error("Failed to bind HTTP listener to {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("HTTP server error: {0}")]
    Serve(std::io::Error),
}
