//! Error types for the catalog API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fundi_db::DbError;
use serde::Serialize;
use utoipa::ToSchema;

/// Error type for the catalog API.
#[derive(Debug, thiserror::Error)]
pub enum ApiCatalogError {
    /// Input validation failed (missing client id, out-of-range rating).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Worker not found.
    #[error("Worker not found")]
    WorkerNotFound,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl From<sqlx::Error> for ApiCatalogError {
    fn from(err: sqlx::Error) -> Self {
        ApiCatalogError::Database(DbError::from(err))
    }
}

/// RFC 7807 Problem Details response format.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl IntoResponse for ApiCatalogError {
    fn into_response(self) -> Response {
        let (status, problem) = match &self {
            ApiCatalogError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ProblemDetails {
                    problem_type: "https://fundi.app/problems/validation-error".to_string(),
                    title: "Validation Error".to_string(),
                    status: 400,
                    detail: Some(msg.clone()),
                },
            ),
            ApiCatalogError::WorkerNotFound => (
                StatusCode::NOT_FOUND,
                ProblemDetails {
                    problem_type: "https://fundi.app/problems/not-found".to_string(),
                    title: "Not Found".to_string(),
                    status: 404,
                    detail: Some("Worker not found".to_string()),
                },
            ),
            ApiCatalogError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ProblemDetails {
                        problem_type: "https://fundi.app/problems/internal-error".to_string(),
                        title: "Internal Server Error".to_string(),
                        status: 500,
                        detail: Some("A database error occurred".to_string()),
                    },
                )
            }
        };

        (status, Json(problem)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ApiCatalogError::WorkerNotFound.to_string(),
            "Worker not found"
        );
        assert_eq!(
            ApiCatalogError::Validation("rating out of range".to_string()).to_string(),
            "Validation error: rating out of range"
        );
    }
}
