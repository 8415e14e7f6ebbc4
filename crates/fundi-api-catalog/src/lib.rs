//! Public catalog and feedback endpoints for fundi.
//!
//! Clients browse service categories and workers here and leave feedback.
//! Worker listings are decorated with derived rating statistics; the
//! aggregation is a pure read-time fold over the feedback rows (see
//! [`rating`]) — nothing is ever cached or stored.
//!
//! Endpoints:
//! - List categories (GET /categories)
//! - List workers (GET /workers)
//! - Worker detail (GET /workers/:id)
//! - Create/list feedback (POST/GET /workers/:id/feedback)
//! - Home-page counts (GET /stats)

pub mod error;
pub mod handlers;
pub mod models;
pub mod rating;
pub mod router;
pub mod services;

pub use error::ApiCatalogError;
pub use models::{
    CreateFeedbackRequest, FeedbackAuthor, FeedbackResponse, HomeStats, ServiceResponse,
    WorkerDetail, WorkerSummary,
};
pub use rating::RatingSummary;
pub use router::{catalog_router, CatalogState};
pub use services::{CatalogService, FeedbackService};
