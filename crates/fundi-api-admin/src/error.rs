//! Error types for the admin API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fundi_db::DbError;
use serde::Serialize;
use utoipa::ToSchema;

/// Error type for the admin API.
#[derive(Debug, thiserror::Error)]
pub enum ApiAdminError {
    /// Authentication required.
    #[error("Authentication required")]
    Unauthorized,

    /// Admin role required.
    #[error("Admin role required")]
    Forbidden,

    /// Input validation failed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Category not found.
    #[error("Category not found")]
    CategoryNotFound,

    /// Worker not found.
    #[error("Worker not found")]
    WorkerNotFound,

    /// Client not found.
    #[error("Client not found")]
    ClientNotFound,

    /// Feedback record not found.
    #[error("Feedback not found")]
    FeedbackNotFound,

    /// Guarded-delete violation: the category is still referenced by
    /// worker associations. Carries the blocking count so the caller sees
    /// exactly what stands in the way; nothing was mutated.
    #[error("Cannot delete service: {count} worker(s) are using this service")]
    CategoryInUse {
        /// Number of worker associations referencing the category.
        count: i64,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl From<sqlx::Error> for ApiAdminError {
    fn from(err: sqlx::Error) -> Self {
        ApiAdminError::Database(DbError::from(err))
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
    /// Number of blocking references (guarded-delete violations only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocking_count: Option<i64>,
}

impl ProblemDetails {
    fn new(slug: &str, title: &str, status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            problem_type: format!("https://fundi.app/problems/{slug}"),
            title: title.to_string(),
            status: status.as_u16(),
            detail: Some(detail.into()),
            blocking_count: None,
        }
    }
}

impl IntoResponse for ApiAdminError {
    fn into_response(self) -> Response {
        let (status, problem) = match &self {
            ApiAdminError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ProblemDetails::new(
                    "unauthorized",
                    "Unauthorized",
                    StatusCode::UNAUTHORIZED,
                    "Missing or invalid authentication token",
                ),
            ),
            ApiAdminError::Forbidden => (
                StatusCode::FORBIDDEN,
                ProblemDetails::new(
                    "forbidden",
                    "Forbidden",
                    StatusCode::FORBIDDEN,
                    "Admin role required for this operation",
                ),
            ),
            ApiAdminError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ProblemDetails::new(
                    "validation-error",
                    "Validation Error",
                    StatusCode::BAD_REQUEST,
                    msg.clone(),
                ),
            ),
            ApiAdminError::CategoryNotFound => (
                StatusCode::NOT_FOUND,
                ProblemDetails::new(
                    "not-found",
                    "Not Found",
                    StatusCode::NOT_FOUND,
                    "Category not found",
                ),
            ),
            ApiAdminError::WorkerNotFound => (
                StatusCode::NOT_FOUND,
                ProblemDetails::new(
                    "not-found",
                    "Not Found",
                    StatusCode::NOT_FOUND,
                    "Worker not found",
                ),
            ),
            ApiAdminError::ClientNotFound => (
                StatusCode::NOT_FOUND,
                ProblemDetails::new(
                    "not-found",
                    "Not Found",
                    StatusCode::NOT_FOUND,
                    "Client not found",
                ),
            ),
            ApiAdminError::FeedbackNotFound => (
                StatusCode::NOT_FOUND,
                ProblemDetails::new(
                    "not-found",
                    "Not Found",
                    StatusCode::NOT_FOUND,
                    "Feedback not found",
                ),
            ),
            ApiAdminError::CategoryInUse { count } => {
                let mut problem = ProblemDetails::new(
                    "category-in-use",
                    "Category In Use",
                    StatusCode::CONFLICT,
                    self.to_string(),
                );
                problem.blocking_count = Some(*count);
                (StatusCode::CONFLICT, problem)
            }
            ApiAdminError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ProblemDetails::new(
                        "internal-error",
                        "Internal Server Error",
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "A database error occurred",
                    ),
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
    fn test_category_in_use_message_contains_count() {
        let err = ApiAdminError::CategoryInUse { count: 2 };
        assert_eq!(
            err.to_string(),
            "Cannot delete service: 2 worker(s) are using this service"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(ApiAdminError::Forbidden.to_string(), "Admin role required");
        assert_eq!(
            ApiAdminError::CategoryNotFound.to_string(),
            "Category not found"
        );
    }
}
