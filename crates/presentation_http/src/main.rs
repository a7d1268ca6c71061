//! docfault HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use application::DocumentService;
use domain::{FieldDefinition, FieldType, Schema};
use infrastructure::{AppConfig, InMemoryDocumentStore, TelemetryConfig, init_telemetry};
use presentation_http::{routes, serve_until, set_expose_internal_errors, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration before tracing so the log format applies
    let loaded = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    init_telemetry(&TelemetryConfig::with_format(config.server.log_format))?;

    if let Err(e) = &loaded {
        warn!("Failed to load config, using defaults: {}", e);
    }

    info!("docfault v{} starting...", env!("CARGO_PKG_VERSION"));

    let expose_details = config.expose_error_details();
    set_expose_internal_errors(expose_details);

    info!(
        environment = %config.environment,
        host = %config.server.host,
        port = %config.server.port,
        expose_details,
        "Configuration loaded"
    );

    // Initialize the document store and its schemas
    let store = Arc::new(InMemoryDocumentStore::new(config.store.database.clone()));
    let mut documents = DocumentService::new(store);
    documents.register(users_schema()?).await?;

    let state = AppState {
        documents: Arc::new(documents),
        config: Arc::new(config.clone()),
    };

    let app = routes::create_router(state)
        .layer(RequestBodyLimitLayer::new(
            config.server.max_body_size_json_bytes,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server
    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    serve_until(listener, app, shutdown_signal(), shutdown_timeout).await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Schema of the built-in `users` collection
fn users_schema() -> Result<Schema, domain::DomainError> {
    Schema::new(
        "users",
        vec![
            FieldDefinition::new("name", FieldType::String),
            FieldDefinition::new("email", FieldType::String)
                .required("Email is required")
                .unique(),
            FieldDefinition::new("age", FieldType::Number)
                .required("Age must be at least 18")
                .min(18.0, "Age must be at least 18"),
        ],
    )
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
