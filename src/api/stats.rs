//! Database-backed statistics endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use super::server::AppState;
use crate::error::Error;
use crate::storage::db;

/// Response for GET /api/stats.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// False in file-only mode; the remaining fields are then zero defaults.
    pub database_available: bool,
    pub user_count: i64,
    pub message_count: i64,
    /// The user behind the latest message, rendered as
    /// `"{name} {surname} ({username}) {id}"`.
    pub last_user: Option<String>,
}

impl StatsResponse {
    fn unavailable() -> Self {
        Self {
            database_available: false,
            user_count: 0,
            message_count: 0,
            last_user: None,
        }
    }
}

/// Handle GET /api/stats -- aggregate bot statistics.
///
/// Without a usable database the endpoint answers with benign zero defaults
/// rather than an error.
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>, Error> {
    let Some(pool) = &state.db else {
        tracing::debug!("Stats requested in file-only mode");
        return Ok(Json(StatsResponse::unavailable()));
    };

    let user_count = db::count_users(pool).await?;
    let message_count = db::count_messages(pool).await?;
    let last_user = db::last_user(pool).await?.map(|u| u.to_string());

    tracing::debug!(user_count, message_count, "Stats query");

    Ok(Json(StatsResponse {
        database_available: true,
        user_count,
        message_count,
        last_user,
    }))
}
