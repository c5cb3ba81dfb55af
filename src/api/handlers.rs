//! HTTP request handlers for log files and the user list.
//!
//! The bot and service endpoints are the same three operations pointed at
//! different directories, so each pair of route handlers delegates to a
//! shared helper taking the `LogStore` to read from.

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use super::server::AppState;
use crate::error::Error;
use crate::storage::LogStore;

/// Query parameters for by-date lookups.
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    /// Calendar date, defaults to today when absent.
    pub date: Option<NaiveDate>,
}

/// Query parameters for range listings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQuery {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// Stream an open file out as a `text/plain` response body.
///
/// The file handle is released when the response body finishes streaming.
fn file_response(file: File) -> Response {
    let stream = ReaderStream::new(file);
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::from_stream(stream))
        .unwrap()
}

/// Resolve a log file for `date` and stream it, or 404 when absent.
async fn serve_log_by_date(store: &LogStore, date: Option<NaiveDate>) -> Result<Response, Error> {
    match store.get_by_date(date).await? {
        Some(file) => Ok(file_response(file)),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

/// List every embedded date in the store's directory.
async fn serve_list_available(store: &LogStore) -> Result<Response, Error> {
    let dates = store.list_available().await?;
    Ok(Json(dates).into_response())
}

/// List the embedded dates inside the requested window.
///
/// An explicitly inverted range is the caller's mistake and is rejected with
/// 400 before the resolver runs.
async fn serve_list_available_range(store: &LogStore, query: RangeQuery) -> Result<Response, Error> {
    if let (Some(from), Some(to)) = (query.date_from, query.date_to) {
        if from > to {
            return Err(Error::BadRequest(format!(
                "dateFrom {} must not be after dateTo {}",
                from, to
            )));
        }
    }

    let dates = store
        .list_available_in_window(query.date_from, query.date_to)
        .await?;
    Ok(Json(dates).into_response())
}

/// Handle GET /api/logs -- bot log file by date (today when absent).
pub async fn bot_log_by_date(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Response, Error> {
    tracing::info!(date = ?query.date, "Bot log file requested");
    serve_log_by_date(&state.bot_logs, query.date).await
}

/// Handle GET /api/logs/today -- today's bot log file.
pub async fn bot_log_today(State(state): State<AppState>) -> Result<Response, Error> {
    tracing::info!("Today's bot log file requested");
    serve_log_by_date(&state.bot_logs, None).await
}

/// Handle POST /api/logs/available -- every bot log date.
pub async fn bot_list_available(State(state): State<AppState>) -> Result<Response, Error> {
    tracing::info!("Bot log listing requested");
    serve_list_available(&state.bot_logs).await
}

/// Handle POST /api/logs/available/range -- bot log dates in a window.
pub async fn bot_list_available_range(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Response, Error> {
    tracing::info!(from = ?query.date_from, to = ?query.date_to, "Bot log range requested");
    serve_list_available_range(&state.bot_logs, query).await
}

/// Handle GET /service/logs -- service log file by date (today when absent).
pub async fn service_log_by_date(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Response, Error> {
    tracing::info!(date = ?query.date, "Service log file requested");
    serve_log_by_date(&state.service_logs, query.date).await
}

/// Handle POST /service/logs/available -- every service log date.
pub async fn service_list_available(State(state): State<AppState>) -> Result<Response, Error> {
    tracing::info!("Service log listing requested");
    serve_list_available(&state.service_logs).await
}

/// Handle POST /service/logs/available/range -- service log dates in a window.
pub async fn service_list_available_range(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Response, Error> {
    tracing::info!(from = ?query.date_from, to = ?query.date_to, "Service log range requested");
    serve_list_available_range(&state.service_logs, query).await
}

/// Handle GET /api/users -- the user-list snapshot, served verbatim.
pub async fn user_list(State(state): State<AppState>) -> Result<Response, Error> {
    tracing::info!("User list requested");
    match state.users.open_snapshot().await? {
        Some(file) => Ok(file_response(file)),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

/// Handle GET /health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "botlogd"
    }))
}
