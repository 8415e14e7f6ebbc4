//! Database entity models for fundi-db.
//!
//! These models represent the database tables and provide type-safe
//! interactions with PostgreSQL.

pub mod client;
pub mod feedback;
pub mod service;
pub mod worker;
pub mod worker_service;

pub use client::{Client, ClientListRow, NewClient, ROLE_ADMIN, ROLE_USER};
pub use feedback::{Feedback, FeedbackAdminRow, FeedbackWithAuthor, NewFeedback};
pub use service::Service;
pub use worker::{NewWorker, Worker};
pub use worker_service::WorkerService;
