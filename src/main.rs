use clap::Parser;
use graphlens::{config, server};

/// Graphlens - colored graph views over graph database queries
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Load server settings from a YAML file instead of the flags below
    #[arg(long)]
    config: Option<String>,

    /// HTTP server host address
    #[arg(long, default_value = "0.0.0.0")]
    http_host: String,

    /// HTTP server port
    #[arg(long, default_value_t = 5001)]
    http_port: u16,

    /// Database credentials document (JSON or YAML)
    #[arg(long, default_value = "credentials.json")]
    credentials: String,

    /// Node color schema document (JSON or YAML)
    #[arg(long, default_value = "schema.json")]
    schema: String,

    /// Directory with the front-end files served at `/`
    #[arg(long, default_value = "static")]
    static_dir: String,

    /// Do not serve static files
    #[arg(long)]
    no_static: bool,

    /// Per-query timeout in seconds
    #[arg(long, default_value_t = 30)]
    query_timeout_secs: u64,

    /// Maximum request body size in bytes
    #[arg(long, default_value_t = 1024 * 1024)]
    max_body_bytes: usize,
}

impl From<Cli> for config::CliConfig {
    fn from(cli: Cli) -> Self {
        config::CliConfig {
            http_host: cli.http_host,
            http_port: cli.http_port,
            credentials_path: cli.credentials,
            schema_path: cli.schema,
            static_dir: (!cli.no_static).then_some(cli.static_dir),
            query_timeout_secs: cli.query_timeout_secs,
            max_body_bytes: cli.max_body_bytes,
        }
    }
}

#[tokio::main]
async fn main() {
    // Defaults to INFO level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    log::info!("Graphlens v{}", env!("CARGO_PKG_VERSION"));

    let config = match cli.config.clone() {
        Some(path) => config::ServerConfig::from_yaml_file(path),
        None => config::ServerConfig::from_cli(cli.into()),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server::run_with_config(config).await {
        log::error!("✗ {}", e);
        std::process::exit(1);
    }
}
