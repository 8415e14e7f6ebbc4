//! PostgreSQL persistence layer for fundi.
//!
//! The profile store owns the business-facing side of every account: client
//! and worker profiles (both carrying the identity provider's uid as a back
//! reference), the service catalog, worker-to-service associations, and
//! feedback records. Credentials and token verification live with the
//! external identity provider — never here.
//!
//! Entity structs derive [`sqlx::FromRow`] and expose static async query
//! methods taking a [`sqlx::PgPool`], so callers never hand-write SQL.

pub mod error;
pub mod migrations;
pub mod models;

pub use error::DbError;
pub use migrations::run_migrations;
pub use models::{
    Client, ClientListRow, Feedback, FeedbackAdminRow, FeedbackWithAuthor, NewClient, NewFeedback,
    NewWorker, Service, Worker, WorkerService, ROLE_ADMIN, ROLE_USER,
};
