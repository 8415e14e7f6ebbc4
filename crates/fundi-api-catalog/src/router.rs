//! Catalog API router configuration.
//!
//! All routes here are public; no authentication is required to browse the
//! catalog or read feedback.

use crate::handlers::{
    create_feedback_handler, get_worker_handler, home_stats_handler, list_categories_handler,
    list_feedback_handler, list_workers_handler,
};
use crate::services::{CatalogService, FeedbackService};
use axum::{
    routing::get,
    Extension, Router,
};
use sqlx::PgPool;
use std::sync::Arc;

/// Application state for catalog routes.
#[derive(Clone)]
pub struct CatalogState {
    /// Read-side catalog service.
    pub catalog: Arc<CatalogService>,
    /// Feedback service.
    pub feedback: Arc<FeedbackService>,
}

impl CatalogState {
    /// Create a new catalog state.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            catalog: Arc::new(CatalogService::new(pool.clone())),
            feedback: Arc::new(FeedbackService::new(pool)),
        }
    }
}

/// Create the public catalog router.
pub fn catalog_router(state: CatalogState) -> Router {
    Router::new()
        .route("/categories", get(list_categories_handler))
        .route("/workers", get(list_workers_handler))
        .route("/workers/:id", get(get_worker_handler))
        .route(
            "/workers/:id/feedback",
            get(list_feedback_handler).post(create_feedback_handler),
        )
        .route("/stats", get(home_stats_handler))
        .layer(Extension(state.catalog))
        .layer(Extension(state.feedback))
}
