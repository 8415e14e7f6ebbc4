//! Error types for the authentication API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fundi_core::IdentityUid;
use fundi_db::DbError;
use fundi_identity::IdentityError;
use serde::Serialize;
use utoipa::ToSchema;

/// Tracing target for events an operator must reconcile out-of-band.
pub const RECONCILIATION_TARGET: &str = "reconciliation";

/// Error type for the authentication API.
#[derive(Debug, thiserror::Error)]
pub enum ApiAuthError {
    /// Input validation failed before any external call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Email format is invalid.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Password does not meet complexity requirements.
    #[error("Password does not meet requirements")]
    WeakPassword(Vec<String>),

    /// The email is already registered with the identity provider.
    #[error("Email already registered")]
    EmailInUse,

    /// The client-supplied service category does not exist.
    #[error("Invalid service category selected")]
    InvalidCategory,

    /// No profile exists for the verified identity (after the retry
    /// budget, if the caller went through the poller).
    #[error("Profile not found")]
    ProfileNotFound,

    /// Missing or invalid authentication token.
    #[error("Authentication required")]
    Unauthorized,

    /// An identity was created but its profile write failed AND the
    /// compensating identity deletion failed too. The account is now an
    /// orphan on the provider side; it must be reconciled out-of-band.
    #[error("Orphaned identity: {uid}")]
    OrphanedIdentity {
        /// The provider-side uid left without a profile.
        uid: IdentityUid,
    },

    /// Identity provider failure that is not a contract outcome.
    #[error("Identity provider error: {0}")]
    Provider(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// Internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<IdentityError> for ApiAuthError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::EmailTaken => ApiAuthError::EmailInUse,
            IdentityError::InvalidToken => ApiAuthError::Unauthorized,
            IdentityError::NotFound => ApiAuthError::Provider("identity not found".to_string()),
            IdentityError::Provider(msg) => ApiAuthError::Provider(msg),
        }
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

impl ProblemDetails {
    fn new(slug: &str, title: &str, status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            problem_type: format!("https://fundi.app/problems/{slug}"),
            title: title.to_string(),
            status: status.as_u16(),
            detail: Some(detail.into()),
        }
    }
}

impl IntoResponse for ApiAuthError {
    fn into_response(self) -> Response {
        let (status, problem) = match &self {
            ApiAuthError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ProblemDetails::new(
                    "validation-error",
                    "Validation Error",
                    StatusCode::BAD_REQUEST,
                    msg.clone(),
                ),
            ),
            ApiAuthError::InvalidEmail(msg) => (
                StatusCode::BAD_REQUEST,
                ProblemDetails::new(
                    "validation-error",
                    "Validation Error",
                    StatusCode::BAD_REQUEST,
                    msg.clone(),
                ),
            ),
            ApiAuthError::WeakPassword(errors) => (
                StatusCode::BAD_REQUEST,
                ProblemDetails::new(
                    "weak-password",
                    "Weak Password",
                    StatusCode::BAD_REQUEST,
                    errors.join(", "),
                ),
            ),
            ApiAuthError::EmailInUse => (
                StatusCode::CONFLICT,
                ProblemDetails::new(
                    "email-in-use",
                    "Conflict",
                    StatusCode::CONFLICT,
                    "Email already registered",
                ),
            ),
            ApiAuthError::InvalidCategory => (
                StatusCode::BAD_REQUEST,
                ProblemDetails::new(
                    "invalid-category",
                    "Invalid Category",
                    StatusCode::BAD_REQUEST,
                    "Invalid service category selected",
                ),
            ),
            ApiAuthError::ProfileNotFound => (
                StatusCode::NOT_FOUND,
                ProblemDetails::new(
                    "profile-not-found",
                    "Not Found",
                    StatusCode::NOT_FOUND,
                    "Profile not found",
                ),
            ),
            ApiAuthError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ProblemDetails::new(
                    "unauthorized",
                    "Unauthorized",
                    StatusCode::UNAUTHORIZED,
                    "Missing or invalid authentication token",
                ),
            ),
            ApiAuthError::OrphanedIdentity { uid } => {
                // The detailed event was already logged at the failure site;
                // this is the boundary record.
                tracing::error!(
                    target: RECONCILIATION_TARGET,
                    uid = %uid,
                    "Registration left an orphaned identity"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ProblemDetails::new(
                        "internal-error",
                        "Internal Server Error",
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Registration could not be completed",
                    ),
                )
            }
            ApiAuthError::Provider(msg) => {
                tracing::error!("Identity provider error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ProblemDetails::new(
                        "internal-error",
                        "Internal Server Error",
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal error occurred",
                    ),
                )
            }
            ApiAuthError::Database(e) => {
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
            ApiAuthError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ProblemDetails::new(
                        "internal-error",
                        "Internal Server Error",
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal error occurred",
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
    fn test_error_display() {
        assert_eq!(
            ApiAuthError::EmailInUse.to_string(),
            "Email already registered"
        );
        assert_eq!(
            ApiAuthError::InvalidCategory.to_string(),
            "Invalid service category selected"
        );
        assert_eq!(
            ApiAuthError::ProfileNotFound.to_string(),
            "Profile not found"
        );
    }

    #[test]
    fn test_orphaned_identity_carries_uid() {
        let uid = IdentityUid::new("acc-7").unwrap();
        let err = ApiAuthError::OrphanedIdentity { uid };
        assert_eq!(err.to_string(), "Orphaned identity: acc-7");
    }

    #[test]
    fn test_identity_error_mapping() {
        assert!(matches!(
            ApiAuthError::from(IdentityError::EmailTaken),
            ApiAuthError::EmailInUse
        ));
        assert!(matches!(
            ApiAuthError::from(IdentityError::InvalidToken),
            ApiAuthError::Unauthorized
        ));
        assert!(matches!(
            ApiAuthError::from(IdentityError::Provider("x".to_string())),
            ApiAuthError::Provider(_)
        ));
    }
}
