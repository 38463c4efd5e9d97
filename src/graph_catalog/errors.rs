//! # Catalog Error Types
//!
//! Errors raised while loading the documents the service is configured with:
//! the color schema and the database credentials.
//!
//! ## Usage Patterns
//!
//! Name the file and what was being loaded, so the startup log is actionable:
//!
//! ```ignore
//! CatalogError::config_error_with_context(
//!     "schema.json",
//!     "`labels.Person` must be a non-empty color"
//! )
//! ```

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Failed to read configuration file '{path}': {error}")]
    ConfigReadError { path: String, error: String },
    #[error("Failed to parse configuration file '{path}': {error}")]
    ConfigParseError { path: String, error: String },
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl CatalogError {
    /// Create a configuration error naming the offending file
    ///
    /// # Example
    /// ```ignore
    /// CatalogError::config_error_with_context(
    ///     "credentials.json",
    ///     "NEO4J_URI must use http or https"
    /// )
    /// ```
    pub fn config_error_with_context(
        config_path: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        let path = config_path.into();
        let ctx = context.into();
        CatalogError::InvalidConfig {
            message: format!("Configuration error in '{}': {}", path, ctx),
        }
    }
}
