//! Bookshelf HTTP server.
//!
//! Serves the books API backed by an in-memory store.
//!
//! Run with: cargo run --bin bookshelf-server
//! Health: http://localhost:3000/health
//! Books: http://localhost:3000/api/books
//! Metrics: http://localhost:3000/metrics

mod config;

use bookshelf_core::{seed::seed_demo_books, BookStore};
use bookshelf_web::{build_router, cors_layer, metrics, AppState};
use config::Config;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::Notify;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    let _ = dotenvy::dotenv();

    init_tracing()?;

    info!("Starting Bookshelf HTTP Server");

    let config = Config::from_env();
    info!(
        host = %config.host,
        port = config.port,
        cors_origins = ?config.cors_origins,
        seed_demo_data = config.seed_demo_data,
        metrics_enabled = config.metrics_enabled,
        "Configuration loaded"
    );

    let metrics_handle = if config.metrics_enabled {
        Some(metrics::install_recorder()?)
    } else {
        None
    };

    let store = BookStore::new();
    if config.seed_demo_data {
        let seeded = seed_demo_books(&store)?;
        info!(count = seeded.len(), "Demo books seeded");
    }
    metrics::record_books_stored(store.len()?);

    let mut app = build_router(AppState::new(store));
    if let Some(handle) = metrics_handle {
        app = app.merge(metrics::metrics_router(handle));
    }
    let app = app.layer(cors_layer(&config.cors_origins));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    serve(listener, app, config.shutdown_timeout()).await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "bookshelf_server=info,bookshelf_web=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(())
}

/// Run the server until a shutdown signal arrives.
///
/// In-flight requests get `timeout` to drain once the signal is received.
async fn serve(
    listener: tokio::net::TcpListener,
    app: axum::Router,
    timeout: Duration,
) -> std::io::Result<()> {
    let signalled = Arc::new(Notify::new());
    let notifier = Arc::clone(&signalled);

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            notifier.notify_one();
        })
        .into_future();

    let deadline = async {
        signalled.notified().await;
        tokio::time::sleep(timeout).await;
    };

    tokio::select! {
        result = server => result,
        () = deadline => {
            warn!(timeout_secs = timeout.as_secs(), "Graceful shutdown timed out, forcing exit");
            Ok(())
        }
    }
}

/// Graceful shutdown signal handler.
///
/// Waits for:
/// - Ctrl+C (SIGINT)
/// - SIGTERM (in production environments)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
