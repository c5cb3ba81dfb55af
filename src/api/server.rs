//! HTTP server setup and configuration.

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{handlers, stats};
use crate::config::Config;
use crate::storage::{self, LogStore, UserListStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub bot_logs: LogStore,
    pub service_logs: LogStore,
    pub users: UserListStore,
    /// `None` means file-only mode; stats degrade to zero defaults.
    pub db: Option<SqlitePool>,
}

impl AppState {
    /// Build state from a validated config and an optional database pool.
    pub fn new(config: Config, db: Option<SqlitePool>) -> Self {
        let interval = config.storage.default_interval_days;
        Self {
            bot_logs: LogStore::new(&config.storage.bot_log_dir, interval),
            service_logs: LogStore::new(&config.storage.service_log_dir, interval),
            users: UserListStore::new(&config.storage.user_list_dir),
            config: Arc::new(config),
            db,
        }
    }
}

/// Create the axum router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Bot log files
        .route("/api/logs", get(handlers::bot_log_by_date))
        .route("/api/logs/today", get(handlers::bot_log_today))
        .route("/api/logs/available", post(handlers::bot_list_available))
        .route("/api/logs/available/range", post(handlers::bot_list_available_range))
        // Bot users
        .route("/api/users", get(handlers::user_list))
        .route("/api/stats", get(stats::stats_handler))
        // Service's own log files
        .route("/service/logs", get(handlers::service_log_by_date))
        .route("/service/logs/available", post(handlers::service_list_available))
        .route(
            "/service/logs/available/range",
            post(handlers::service_list_available_range),
        )
        // Liveness
        .route("/health", get(handlers::health))
        // State and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let listen_addr = config.server.listen.clone();

    // A missing or unreachable database is file-only mode, not a startup
    // failure.
    let db = match &config.database {
        Some(db_config) => match storage::db::init_pool(&db_config.path).await {
            Ok(pool) => {
                tracing::info!(path = %db_config.path, "Connected to bot database");
                Some(pool)
            }
            Err(e) => {
                tracing::warn!(
                    path = %db_config.path,
                    error = %e,
                    "Bot database unavailable, continuing in file-only mode"
                );
                None
            }
        },
        None => {
            tracing::info!("No database configured, running in file-only mode");
            None
        }
    };

    let state = AppState::new(config, db);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    tracing::info!(address = %listen_addr, "Starting botlogd server");

    axum::serve(listener, app).await?;

    Ok(())
}
