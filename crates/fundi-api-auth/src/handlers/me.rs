//! Current-profile endpoints.
//!
//! GET /auth/me  - Resolve the verified identity to its tagged profile.
//! PUT /auth/me  - Partially update the profile, branching per variant.

use crate::error::ApiAuthError;
use crate::middleware::AuthenticatedIdentity;
use crate::models::{ProfileResponse, UpdateProfileRequest};
use crate::services::ProfileResolver;
use axum::{Extension, Json};
use std::sync::Arc;

/// Resolve the current profile.
///
/// Resolution runs behind the reconciliation retry budget: a lookup racing
/// a still-propagating registration is retried with backoff before a 404
/// is reported, so callers see added latency instead of a false "not
/// found".
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "The caller's profile", body = ProfileResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No profile after the retry budget; registration incomplete"),
    ),
    security(("bearerAuth" = [])),
    tag = "Authentication"
)]
pub async fn get_me_handler(
    Extension(identity): Extension<AuthenticatedIdentity>,
    Extension(resolver): Extension<Arc<ProfileResolver>>,
) -> Result<Json<ProfileResponse>, ApiAuthError> {
    let resolved = resolver
        .resolve(&identity.0)
        .await?
        .ok_or(ApiAuthError::ProfileNotFound)?;
    Ok(Json(resolved.into()))
}

/// Partially update the current profile.
///
/// Omitted fields keep their stored values. Worker-only fields are ignored
/// when the caller resolves to a client profile.
#[utoipa::path(
    put,
    path = "/auth/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "The updated profile", body = ProfileResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No profile for this identity"),
    ),
    security(("bearerAuth" = [])),
    tag = "Authentication"
)]
pub async fn update_me_handler(
    Extension(identity): Extension<AuthenticatedIdentity>,
    Extension(resolver): Extension<Arc<ProfileResolver>>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiAuthError> {
    let updated = resolver
        .update(&identity.0, request)
        .await?
        .ok_or(ApiAuthError::ProfileNotFound)?;
    Ok(Json(updated.into()))
}
