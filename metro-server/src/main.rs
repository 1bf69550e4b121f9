use std::net::SocketAddr;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use metro_server::clock::SystemClock;
use metro_server::config::ServerConfig;
use metro_server::store::{InMemoryConfigStore, PgConfigStore};
use metro_server::web::{AppState, OPENAPI_JSON_PATH, create_router};

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "metro_server=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = ServerConfig::from_env()?;

    // File-backed config for local development, PostgreSQL otherwise.
    // The pool connects lazily so /health answers even while the database is down.
    let (state, pg_store) = match &config.config_file {
        Some(path) => {
            info!(path = %path.display(), "serving configuration from file");
            let store = InMemoryConfigStore::from_file(path)?;
            (AppState::new(store, SystemClock, config.tz), None)
        }
        None => {
            info!(
                host = %config.store.host,
                port = config.store.port,
                database = %config.store.database,
                "using PostgreSQL configuration store"
            );
            let store = PgConfigStore::new(&config.store);
            (AppState::new(store.clone(), SystemClock, config.tz), Some(store))
        }
    };

    let app = create_router(state.with_port(config.port));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(tz = config.tz.name(), "API ready on http://localhost:{}", config.port);
    info!("API docs: http://localhost:{}/api-docs", config.port);
    info!("OpenAPI document: http://localhost:{}{}", config.port, OPENAPI_JSON_PATH);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(store) = pg_store {
        store.close().await;
    }
    info!("shut down");

    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
