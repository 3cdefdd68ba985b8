use std::net::SocketAddr;
use std::sync::Arc;

use rollcall_api::config::{DataServiceKind, ServerConfig};
use rollcall_api::router::build_app_router;
use rollcall_api::state::AppState;
use rollcall_db::memory::MemoryDataService;
use rollcall_db::{DataService, PgDataService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Pool size for the Postgres data service.
const MAX_DB_CONNECTIONS: u32 = 10;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rollcall_api=debug,rollcall_db=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };
    tracing::info!(
        host = %config.host,
        port = config.port,
        base_path = %config.base_path,
        data_service = ?config.data_service,
        "Loaded server configuration"
    );

    // --- Data service ---
    let data: Arc<dyn DataService> = match (config.data_service, config.database_url.as_deref()) {
        (DataServiceKind::Memory, _) => {
            tracing::warn!("Using the in-memory data service; nothing will be persisted");
            Arc::new(MemoryDataService::new())
        }
        (DataServiceKind::Postgres, Some(url)) => {
            match PgDataService::connect(url, MAX_DB_CONNECTIONS).await {
                Ok(service) => Arc::new(service),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to initialise the database");
                    std::process::exit(1);
                }
            }
        }
        (DataServiceKind::Postgres, None) => {
            tracing::error!("DATABASE_URL must be set");
            std::process::exit(1);
        }
    };

    // --- Router ---
    let addr = match config.host.parse() {
        Ok(ip) => SocketAddr::new(ip, config.port),
        Err(e) => {
            tracing::error!(host = %config.host, error = %e, "Invalid HOST address");
            std::process::exit(1);
        }
    };
    let state = AppState::new(Arc::clone(&data), config);
    let app = build_app_router(state);

    // --- Start server ---
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };
    tracing::info!(%addr, "Starting server");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
    }

    data.close().await;
    tracing::info!("Server shut down");
}

/// Resolve on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
