use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct QueryRequest {
    /// Query text to run against the configured database
    #[serde(default)]
    pub query: Option<String>,
}

/// Body of every failed `/query` call
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

/// Schema vocabulary offered to the front-end
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LabelsResponse {
    /// Labels with a color rule, sorted
    pub labels: Vec<String>,
    /// Property names callers may filter on, sorted
    pub input_properties: Vec<String>,
}
