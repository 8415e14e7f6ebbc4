//! Request handlers for the admin API.
//!
//! All handlers run behind token verification and the admin guard.

use crate::error::ApiAdminError;
use crate::models::{
    AdminClientRow, AdminFeedbackRow, AdminWorkerRow, CategoryResponse, CreateCategoryRequest,
    DashboardStats, UpdateCategoryRequest,
};
use crate::services::{CategoryService, ModerationService, StatsService};
use axum::{extract::Path, http::StatusCode, Extension, Json};
use std::sync::Arc;
use uuid::Uuid;

/// Dashboard statistics.
#[utoipa::path(
    get,
    path = "/admin/stats",
    responses((status = 200, description = "Dashboard statistics", body = DashboardStats)),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn dashboard_stats_handler(
    Extension(stats): Extension<Arc<StatsService>>,
) -> Result<Json<DashboardStats>, ApiAdminError> {
    Ok(Json(stats.dashboard().await?))
}

// ── Clients ─────────────────────────────────────────────────────────────

/// List all clients.
#[utoipa::path(
    get,
    path = "/admin/clients",
    responses((status = 200, description = "All clients", body = [AdminClientRow])),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn list_clients_handler(
    Extension(moderation): Extension<Arc<ModerationService>>,
) -> Result<Json<Vec<AdminClientRow>>, ApiAdminError> {
    Ok(Json(moderation.list_clients().await?))
}

/// Delete a client profile and its provider identity.
#[utoipa::path(
    delete,
    path = "/admin/clients/{id}",
    params(("id" = Uuid, Path, description = "Client id")),
    responses(
        (status = 204, description = "Client deleted"),
        (status = 404, description = "Client not found"),
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn delete_client_handler(
    Extension(moderation): Extension<Arc<ModerationService>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiAdminError> {
    moderation.delete_client(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Workers ─────────────────────────────────────────────────────────────

/// List all workers with rating summaries.
#[utoipa::path(
    get,
    path = "/admin/workers",
    responses((status = 200, description = "All workers", body = [AdminWorkerRow])),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn list_workers_handler(
    Extension(moderation): Extension<Arc<ModerationService>>,
) -> Result<Json<Vec<AdminWorkerRow>>, ApiAdminError> {
    Ok(Json(moderation.list_workers().await?))
}

/// Toggle a worker's availability.
#[utoipa::path(
    patch,
    path = "/admin/workers/{id}/availability",
    params(("id" = Uuid, Path, description = "Worker id")),
    responses(
        (status = 200, description = "Updated worker", body = AdminWorkerRow),
        (status = 404, description = "Worker not found"),
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn toggle_worker_handler(
    Extension(moderation): Extension<Arc<ModerationService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AdminWorkerRow>, ApiAdminError> {
    Ok(Json(moderation.toggle_worker_availability(id).await?))
}

/// Delete a worker (associations first, then the row, then the identity).
#[utoipa::path(
    delete,
    path = "/admin/workers/{id}",
    params(("id" = Uuid, Path, description = "Worker id")),
    responses(
        (status = 204, description = "Worker deleted"),
        (status = 404, description = "Worker not found"),
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn delete_worker_handler(
    Extension(moderation): Extension<Arc<ModerationService>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiAdminError> {
    moderation.delete_worker(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Categories ──────────────────────────────────────────────────────────

/// List all categories with usage counts.
#[utoipa::path(
    get,
    path = "/admin/categories",
    responses((status = 200, description = "All categories", body = [CategoryResponse])),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn list_categories_handler(
    Extension(categories): Extension<Arc<CategoryService>>,
) -> Result<Json<Vec<CategoryResponse>>, ApiAdminError> {
    Ok(Json(categories.list().await?))
}

/// Create a category.
#[utoipa::path(
    post,
    path = "/admin/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Missing or empty name"),
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn create_category_handler(
    Extension(categories): Extension<Arc<CategoryService>>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiAdminError> {
    let created = categories.create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Rename a category.
#[utoipa::path(
    patch,
    path = "/admin/categories/{id}",
    params(("id" = Uuid, Path, description = "Category id")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Updated category", body = CategoryResponse),
        (status = 404, description = "Category not found"),
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn update_category_handler(
    Extension(categories): Extension<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, ApiAdminError> {
    Ok(Json(categories.rename(id, request).await?))
}

/// Delete a category (guarded by its association count).
#[utoipa::path(
    delete,
    path = "/admin/categories/{id}",
    params(("id" = Uuid, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category still referenced by workers; the payload carries the blocking count"),
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn delete_category_handler(
    Extension(categories): Extension<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiAdminError> {
    categories.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Feedback ────────────────────────────────────────────────────────────

/// List all feedback for moderation.
#[utoipa::path(
    get,
    path = "/admin/feedback",
    responses((status = 200, description = "All feedback", body = [AdminFeedbackRow])),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn list_feedback_handler(
    Extension(moderation): Extension<Arc<ModerationService>>,
) -> Result<Json<Vec<AdminFeedbackRow>>, ApiAdminError> {
    Ok(Json(moderation.list_feedback().await?))
}

/// Delete a feedback record.
#[utoipa::path(
    delete,
    path = "/admin/feedback/{id}",
    params(("id" = Uuid, Path, description = "Feedback id")),
    responses(
        (status = 204, description = "Feedback deleted"),
        (status = 404, description = "Feedback not found"),
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn delete_feedback_handler(
    Extension(moderation): Extension<Arc<ModerationService>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiAdminError> {
    moderation.delete_feedback(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
