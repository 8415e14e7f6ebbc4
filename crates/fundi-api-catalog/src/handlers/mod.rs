//! Request handlers for the catalog API.

use crate::error::ApiCatalogError;
use crate::models::{
    CreateFeedbackRequest, FeedbackResponse, HomeStats, ServiceResponse, WorkerDetail,
    WorkerSummary,
};
use crate::services::{CatalogService, FeedbackService};
use axum::{
    extract::Path,
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;
use uuid::Uuid;

/// List all service categories (the registration dropdown).
#[utoipa::path(
    get,
    path = "/categories",
    responses((status = 200, description = "All categories", body = [ServiceResponse])),
    tag = "Catalog"
)]
pub async fn list_categories_handler(
    Extension(catalog): Extension<Arc<CatalogService>>,
) -> Result<Json<Vec<ServiceResponse>>, ApiCatalogError> {
    Ok(Json(catalog.list_services().await?))
}

/// List all workers with derived rating summaries.
#[utoipa::path(
    get,
    path = "/workers",
    responses((status = 200, description = "All workers", body = [WorkerSummary])),
    tag = "Catalog"
)]
pub async fn list_workers_handler(
    Extension(catalog): Extension<Arc<CatalogService>>,
) -> Result<Json<Vec<WorkerSummary>>, ApiCatalogError> {
    Ok(Json(catalog.list_workers().await?))
}

/// Fetch one worker's public detail.
#[utoipa::path(
    get,
    path = "/workers/{id}",
    params(("id" = Uuid, Path, description = "Worker id")),
    responses(
        (status = 200, description = "Worker detail", body = WorkerDetail),
        (status = 404, description = "Worker not found"),
    ),
    tag = "Catalog"
)]
pub async fn get_worker_handler(
    Extension(catalog): Extension<Arc<CatalogService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<WorkerDetail>, ApiCatalogError> {
    Ok(Json(catalog.get_worker(id).await?))
}

/// Create feedback against a worker.
#[utoipa::path(
    post,
    path = "/workers/{id}/feedback",
    params(("id" = Uuid, Path, description = "Worker id")),
    request_body = CreateFeedbackRequest,
    responses(
        (status = 201, description = "Feedback created", body = FeedbackResponse),
        (status = 400, description = "Out-of-range rating or unknown client"),
        (status = 404, description = "Worker not found"),
    ),
    tag = "Feedback"
)]
pub async fn create_feedback_handler(
    Extension(feedback): Extension<Arc<FeedbackService>>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateFeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackResponse>), ApiCatalogError> {
    let created = feedback.create(id, request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List a worker's feedback.
#[utoipa::path(
    get,
    path = "/workers/{id}/feedback",
    params(("id" = Uuid, Path, description = "Worker id")),
    responses(
        (status = 200, description = "Feedback for the worker", body = [FeedbackResponse]),
        (status = 404, description = "Worker not found"),
    ),
    tag = "Feedback"
)]
pub async fn list_feedback_handler(
    Extension(feedback): Extension<Arc<FeedbackService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<FeedbackResponse>>, ApiCatalogError> {
    Ok(Json(feedback.list_for_worker(id).await?))
}

/// Home-page counts.
#[utoipa::path(
    get,
    path = "/stats",
    responses((status = 200, description = "Platform counts", body = HomeStats)),
    tag = "Catalog"
)]
pub async fn home_stats_handler(
    Extension(catalog): Extension<Arc<CatalogService>>,
) -> Result<Json<HomeStats>, ApiCatalogError> {
    Ok(Json(catalog.home_stats().await?))
}
