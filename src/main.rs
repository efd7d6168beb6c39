use std::sync::Arc;

use axum::Server;
use sqlx::SqlitePool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{config::Config, route::create_router};

mod config;
mod db;
mod error;
mod handler;
mod model;
mod route;

// Struct representing the application state
pub struct AppState {
    db: SqlitePool,
}

fn init_tracing() {
    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,todo_feed=debug,tower_http=debug"));
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", err);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {}", err);
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
    tracing::info!("Shutdown signal received");
}

// Entry point of the application
#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("🔥 Invalid configuration: {}", err);
            std::process::exit(1);
        }
    };

    // Connect to the database
    let pool = match db::connect(&config).await {
        Ok(pool) => {
            tracing::info!("✅ Connection to the database is successful!");
            pool
        }
        Err(err) => {
            tracing::error!("🔥 Failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    let app_state = Arc::new(AppState { db: pool.clone() });
    let app = create_router(app_state);

    let addr = config.addr();
    let server = match Server::try_bind(&addr) {
        Ok(builder) => builder.serve(app.into_make_service()),
        Err(err) => {
            tracing::error!("🔥 Failed to bind {}: {}", addr, err);
            std::process::exit(1);
        }
    };

    tracing::info!("🚀 Server started successfully on {}", addr);

    if let Err(err) = server.with_graceful_shutdown(shutdown_signal()).await {
        tracing::error!("🔥 Server error: {}", err);
    }

    pool.close().await;
}
