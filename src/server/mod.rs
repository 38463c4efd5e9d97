use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    services::ServeDir,
};

use crate::config::{ConfigError, ServerConfig};
use crate::graph_catalog::{ColorSchema, Neo4jCredentials};
use errors::StartupError;
use handlers::{health_check, labels_handler, query_handler};
use neo4j_client::Neo4jHttpClient;
use query_service::QueryService;

pub mod errors;
pub mod handlers;
pub mod models;
pub mod neo4j_client;
pub mod query_executor;
pub mod query_service;

/// Read-only state shared by every request handler
pub struct AppState {
    pub query_service: QueryService,
}

/// Build the HTTP router.
///
/// `/query`, `/labels` and `/health` are API routes; any other path is looked up
/// in `static_dir` when one is given.
pub fn build_router(state: Arc<AppState>, static_dir: Option<&Path>, max_body_bytes: usize) -> Router {
    let api = Router::new()
        .route("/health", get(health_check))
        .route("/query", post(query_handler))
        .route("/labels", get(labels_handler))
        .with_state(state);

    let app = match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };

    app.layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::new())
}

/// Load configuration documents, verify the database and serve until shutdown.
pub async fn run_with_config(config: ServerConfig) -> Result<(), StartupError> {
    dotenv().ok();

    log::info!(
        "Server configuration: http={}:{}, credentials={}, schema={}",
        config.http_host,
        config.http_port,
        config.credentials_path,
        config.schema_path
    );

    let credentials =
        Neo4jCredentials::from_file(&config.credentials_path).map_err(ConfigError::from)?;
    let schema = ColorSchema::from_file(&config.schema_path).map_err(ConfigError::from)?;
    log::info!(
        "✓ Color schema loaded: {} property rules, {} label rules",
        schema.property_rules().len(),
        schema.label_count()
    );

    let client = Neo4jHttpClient::new(
        &credentials,
        Duration::from_secs(config.query_timeout_secs),
    )
    .map_err(StartupError::Connectivity)?;
    client
        .verify_connectivity(&credentials.database)
        .await
        .map_err(StartupError::Connectivity)?;
    log::info!(
        "✓ Connected to graph database at {} (database {})",
        credentials.uri,
        credentials.database
    );

    let app_state = Arc::new(AppState {
        query_service: QueryService::new(Arc::new(client), credentials.database, Arc::new(schema)),
    });

    let static_dir = config.static_dir.as_deref().map(Path::new);
    if let Some(dir) = static_dir {
        if !dir.is_dir() {
            log::warn!("Static directory {} does not exist", dir.display());
        }
    }
    let app = build_router(app_state, static_dir, config.max_body_bytes);

    let http_bind_address = format!("{}:{}", config.http_host, config.http_port);
    let http_listener = TcpListener::bind(&http_bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: http_bind_address.clone(),
            source,
        })?;
    log::info!("Successfully bound HTTP listener to {}", http_bind_address);

    axum::serve(http_listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                log::error!("Failed to register SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => log::info!("Received SIGINT, shutting down..."),
        _ = terminate => log::info!("Received SIGTERM, shutting down..."),
    }
}
