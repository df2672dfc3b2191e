use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::services::recommendations::RecommendError;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error(transparent)]
    Recommendation(#[from] RecommendError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status and client-facing message for this error
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Recommendation(e) if e.is_not_found() => {
                (StatusCode::NOT_FOUND, e.to_string())
            }
            AppError::Database(_) | AppError::Recommendation(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::ExternalApi(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::HttpClient(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "Request failed");
        }

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let (status, message) = AppError::NotFound("Book not found".to_string()).status_and_message();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "Book not found");
    }

    #[test]
    fn test_recommendation_lookup_failures_map_to_404() {
        let errors = [
            RecommendError::BookNotFound("Missing".to_string()),
            RecommendError::InsufficientData { rows: 1, requested: 3 },
            RecommendError::NoRecommendations("Solo".to_string()),
        ];

        for error in errors {
            let (status, _) = AppError::from(error).status_and_message();
            assert_eq!(status, StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn test_malformed_catalog_row_maps_to_500() {
        let error = RecommendError::InvalidRating {
            title: "Broken".to_string(),
        };
        let (status, message) = AppError::from(error).status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(message.contains("Broken"));
    }

    #[test]
    fn test_unauthorized_and_upstream_errors() {
        let (status, _) = AppError::Unauthorized("nope".to_string()).status_and_message();
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = AppError::ExternalApi("down".to_string()).status_and_message();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
