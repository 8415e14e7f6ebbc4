//! Admin API router configuration.
//!
//! Every route requires a verified bearer token (identity middleware from
//! the auth crate) and an admin client profile (the guard in this crate).

use crate::handlers::{
    create_category_handler, dashboard_stats_handler, delete_category_handler,
    delete_client_handler, delete_feedback_handler, delete_worker_handler,
    list_categories_handler, list_clients_handler, list_feedback_handler, list_workers_handler,
    toggle_worker_handler, update_category_handler,
};
use crate::middleware::admin_guard;
use crate::services::{CategoryService, ModerationService, StatsService};
use axum::{
    middleware,
    routing::{delete, get, patch},
    Extension, Router,
};
use fundi_api_auth::identity_auth_middleware;
use fundi_identity::IdentityProvider;
use sqlx::PgPool;
use std::sync::Arc;

/// Application state for admin routes.
#[derive(Clone)]
pub struct AdminState {
    /// Database connection pool (also used by the admin guard).
    pub pool: PgPool,
    /// Identity provider adapter, shared with the token middleware.
    pub provider: Arc<dyn IdentityProvider>,
    /// Dashboard statistics service.
    pub stats: Arc<StatsService>,
    /// Category service with the lifecycle guard.
    pub categories: Arc<CategoryService>,
    /// Account and feedback moderation service.
    pub moderation: Arc<ModerationService>,
}

impl AdminState {
    /// Create a new admin state.
    pub fn new(pool: PgPool, provider: Arc<dyn IdentityProvider>) -> Self {
        let stats = Arc::new(StatsService::new(pool.clone()));
        let categories = Arc::new(CategoryService::new(pool.clone()));
        let moderation = Arc::new(ModerationService::new(pool.clone(), provider.clone()));
        Self {
            pool,
            provider,
            stats,
            categories,
            moderation,
        }
    }
}

/// Create the admin router.
pub fn admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/stats", get(dashboard_stats_handler))
        .route("/clients", get(list_clients_handler))
        .route("/clients/:id", delete(delete_client_handler))
        .route("/workers", get(list_workers_handler))
        .route("/workers/:id", delete(delete_worker_handler))
        .route("/workers/:id/availability", patch(toggle_worker_handler))
        .route(
            "/categories",
            get(list_categories_handler).post(create_category_handler),
        )
        .route(
            "/categories/:id",
            patch(update_category_handler).delete(delete_category_handler),
        )
        .route("/feedback", get(list_feedback_handler))
        .route("/feedback/:id", delete(delete_feedback_handler))
        // Guard order: token verification runs first, then the role check.
        .layer(middleware::from_fn(admin_guard))
        .layer(middleware::from_fn(identity_auth_middleware))
        .layer(Extension(state.pool))
        .layer(Extension(state.provider))
        .layer(Extension(state.stats))
        .layer(Extension(state.categories))
        .layer(Extension(state.moderation))
}
