//! Error types for botlogd.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Result type alias for botlogd operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for botlogd.
///
/// Missing files and directories never surface here; they are normal
/// outcomes handled by the storage layer. These variants cover invalid
/// requests and genuine faults that reached the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Config(_) | Error::Io(_) | Error::Database(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Plain-text body carrying the fault's message text.
        let body = match status {
            StatusCode::BAD_REQUEST => self.to_string(),
            _ => format!("An error occurred: {}", self),
        };

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn response_parts(error: Error) -> (StatusCode, String) {
        let response = error.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 1_048_576)
            .await
            .expect("read body");
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn storage_fault_maps_to_500_with_message_text() {
        let fault = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let (status, body) = response_parts(Error::Io(fault)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "An error occurred: Storage error: permission denied");
    }

    #[tokio::test]
    async fn internal_maps_to_500_with_message_text() {
        let (status, body) = response_parts(Error::Internal("boom".to_string())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "An error occurred: Internal error: boom");
    }

    #[tokio::test]
    async fn bad_request_maps_to_400_with_message_text() {
        let (status, body) =
            response_parts(Error::BadRequest("dateFrom after dateTo".to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid request: dateFrom after dateTo");
    }
}
