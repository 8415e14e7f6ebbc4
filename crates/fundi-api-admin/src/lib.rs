//! Admin moderation API for fundi.
//!
//! Administrators are clients carrying the `admin` role marker; every
//! route here sits behind token verification plus the admin guard. The
//! catalog lifecycle guard lives in this crate: destructive catalog
//! operations check their referential preconditions (and order their
//! deletes) before touching the store.
//!
//! Endpoints:
//! - Dashboard statistics (GET /stats)
//! - Client management (GET /clients, DELETE /clients/:id)
//! - Worker management (GET /workers, PATCH /workers/:id/availability,
//!   DELETE /workers/:id)
//! - Category management (GET/POST /categories, PATCH/DELETE
//!   /categories/:id — delete is guarded)
//! - Feedback moderation (GET /feedback, DELETE /feedback/:id)

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod services;

pub use error::ApiAdminError;
pub use middleware::admin_guard;
pub use models::{
    AdminClientRow, AdminFeedbackRow, AdminWorkerRow, CategoryResponse, CreateCategoryRequest,
    DashboardStats, UpdateCategoryRequest,
};
pub use router::{admin_router, AdminState};
pub use services::{CategoryService, ModerationService, StatsService};
