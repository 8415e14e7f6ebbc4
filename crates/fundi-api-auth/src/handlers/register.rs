//! Registration endpoint handler.
//!
//! POST /auth/register - Create a provider identity and its profile row.
//! This endpoint does not require authentication.

use crate::error::ApiAuthError;
use crate::models::{ProfileResponse, RegisterRequest};
use crate::services::RegistrationService;
use axum::{http::StatusCode, Extension, Json};
use std::sync::Arc;

/// Handle account registration.
///
/// Drives the two-store creation sequence: provider identity first, then —
/// after the category check for workers — the profile row, with a
/// compensating identity delete on partial failure.
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = ProfileResponse),
        (status = 400, description = "Validation error or invalid service category"),
        (status = 409, description = "Email already registered"),
    ),
    tag = "Authentication"
)]
pub async fn register_handler(
    Extension(registration): Extension<Arc<RegistrationService>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), ApiAuthError> {
    let profile = registration.register(request).await?;
    Ok((StatusCode::CREATED, Json(profile.into())))
}
