//! Documents loaded once at startup: the node color schema and the database
//! credentials. Both are read from JSON or YAML files and are immutable afterwards.

use serde::de::DeserializeOwned;
use std::path::Path;

pub mod color_schema;
pub mod credentials;
pub mod errors;

pub use color_schema::{ColorSchema, PropertyRule};
pub use credentials::Neo4jCredentials;
pub use errors::CatalogError;

/// Read and deserialize a configuration document.
///
/// Files ending in `.json` are parsed as JSON, everything else as YAML.
pub(crate) fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::ConfigReadError {
        path: display.clone(),
        error: e.to_string(),
    })?;

    parse_document(&display, &content, is_json(path))
}

pub(crate) fn parse_document<T: DeserializeOwned>(
    name: &str,
    content: &str,
    json: bool,
) -> Result<T, CatalogError> {
    let parsed = if json {
        serde_json::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    };

    parsed.map_err(|error| CatalogError::ConfigParseError {
        path: name.to_string(),
        error,
    })
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
