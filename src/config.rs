use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::graph_catalog::CatalogError;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Server configuration with validation
#[derive(Clone, Debug, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP server host address
    #[validate(length(min = 1, message = "HTTP host cannot be empty"))]
    pub http_host: String,

    /// HTTP server port (1-65535)
    #[validate(range(
        min = 1,
        max = 65535,
        message = "HTTP port must be between 1 and 65535"
    ))]
    pub http_port: u16,

    /// Path of the database credentials document (JSON or YAML)
    #[validate(length(min = 1, message = "Credentials path cannot be empty"))]
    pub credentials_path: String,

    /// Path of the node color schema document (JSON or YAML)
    #[validate(length(min = 1, message = "Schema path cannot be empty"))]
    pub schema_path: String,

    /// Directory served for `/` and other unmatched GET paths
    pub static_dir: Option<String>,

    /// Per-query timeout enforced by the database client
    #[validate(range(
        min = 1,
        max = 3600,
        message = "Query timeout must be between 1 and 3600 seconds"
    ))]
    pub query_timeout_secs: u64,

    /// Maximum accepted request body size
    #[validate(range(
        min = 1024,
        max = 16777216,
        message = "Max body size must be between 1 KiB and 16 MiB"
    ))]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_host: "0.0.0.0".to_string(),
            http_port: 5001,
            credentials_path: "credentials.json".to_string(),
            schema_path: "schema.json".to_string(),
            static_dir: Some("static".to_string()),
            query_timeout_secs: 30,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Create configuration from CLI arguments with validation
    pub fn from_cli(cli: CliConfig) -> Result<Self, ConfigError> {
        let config = Self {
            http_host: cli.http_host,
            http_port: cli.http_port,
            credentials_path: cli.credentials_path,
            schema_path: cli.schema_path,
            static_dir: cli.static_dir,
            query_timeout_secs: cli.query_timeout_secs,
            max_body_bytes: cli.max_body_bytes,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }
}

/// CLI configuration (parsed from command line arguments)
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub http_host: String,
    pub http_port: u16,
    pub credentials_path: String,
    pub schema_path: String,
    pub static_dir: Option<String>,
    pub query_timeout_secs: u64,
    pub max_body_bytes: usize,
}
