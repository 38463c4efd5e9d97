//! Graph database credentials.
//!
//! Read from a document using the driver's conventional key names:
//!
//! ```json
//! {
//!   "NEO4J_URI": "http://localhost:7474",
//!   "NEO4J_USERNAME": "neo4j",
//!   "NEO4J_PASSWORD": "secret",
//!   "NEO4J_DATABASE": "neo4j"
//! }
//! ```
//!
//! Any key can be overridden by the environment variable of the same name
//! (a `.env` file is honored, see `server::run_with_config`).

use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::Path;
use validator::{Validate, ValidationError};

use super::errors::CatalogError;

pub const URI_VAR: &str = "NEO4J_URI";
pub const USERNAME_VAR: &str = "NEO4J_USERNAME";
pub const PASSWORD_VAR: &str = "NEO4J_PASSWORD";
pub const DATABASE_VAR: &str = "NEO4J_DATABASE";

#[derive(Clone, Deserialize, Validate)]
pub struct Neo4jCredentials {
    /// Base URL of the database's HTTP endpoint
    #[serde(rename = "NEO4J_URI")]
    #[validate(custom(function = "validate_http_uri"))]
    pub uri: String,

    #[serde(rename = "NEO4J_USERNAME")]
    #[validate(length(min = 1, message = "NEO4J_USERNAME cannot be empty"))]
    pub username: String,

    #[serde(rename = "NEO4J_PASSWORD")]
    pub password: String,

    #[serde(rename = "NEO4J_DATABASE", default = "default_database")]
    #[validate(length(min = 1, message = "NEO4J_DATABASE cannot be empty"))]
    pub database: String,
}

fn default_database() -> String {
    "neo4j".to_string()
}

fn validate_http_uri(uri: &str) -> Result<(), ValidationError> {
    match reqwest::Url::parse(uri) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
        _ => Err(ValidationError::new("http_uri")
            .with_message("NEO4J_URI must be an http(s) URL of the database HTTP endpoint".into())),
    }
}

impl fmt::Debug for Neo4jCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Neo4jCredentials")
            .field("uri", &self.uri)
            .field("username", &self.username)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

impl Neo4jCredentials {
    /// Load credentials from a file, apply environment overrides and validate.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let mut credentials: Self = super::load_document(path)?;
        credentials.apply_env_overrides();
        credentials.checked(&path.display().to_string())
    }

    /// Build credentials from environment variables only.
    pub fn from_env() -> Result<Self, CatalogError> {
        let read = |key: &str| {
            env::var(key).map_err(|_| {
                CatalogError::config_error_with_context("environment", format!("{} is not set", key))
            })
        };

        let credentials = Neo4jCredentials {
            uri: read(URI_VAR)?,
            username: read(USERNAME_VAR)?,
            password: read(PASSWORD_VAR)?,
            database: env::var(DATABASE_VAR).unwrap_or_else(|_| default_database()),
        };
        credentials.checked("environment")
    }

    fn apply_env_overrides(&mut self) {
        for (key, field) in [
            (URI_VAR, &mut self.uri),
            (USERNAME_VAR, &mut self.username),
            (PASSWORD_VAR, &mut self.password),
            (DATABASE_VAR, &mut self.database),
        ] {
            if let Ok(value) = env::var(key) {
                log::debug!("Credential {} overridden from environment", key);
                *field = value;
            }
        }
    }

    fn checked(self, source: &str) -> Result<Self, CatalogError> {
        self.validate()
            .map_err(|e| CatalogError::config_error_with_context(source, e.to_string()))?;
        Ok(self)
    }
}
