//! Services for the catalog API.

pub mod catalog_service;
pub mod feedback_service;

pub use catalog_service::CatalogService;
pub use feedback_service::FeedbackService;
