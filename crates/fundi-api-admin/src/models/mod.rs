//! Request and response models for the admin API.

use chrono::{DateTime, Utc};
use fundi_api_catalog::RatingSummary;
use fundi_db::{ClientListRow, FeedbackAdminRow, Service, Worker};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Dashboard statistics.
///
/// The rating figure is derived from the feedback rows at read time, like
/// every other aggregate in the system.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_clients: i64,
    pub total_workers: i64,
    pub total_services: i64,
    pub total_feedback: i64,
    pub active_workers: i64,
    pub inactive_workers: i64,
    /// Clients created in the last 30 days.
    pub recent_clients: i64,
    /// Platform-wide rating summary.
    pub rating: RatingSummary,
}

/// A client as listed for administrators.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminClientRow {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar_url: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub feedback_count: i64,
}

impl From<ClientListRow> for AdminClientRow {
    fn from(row: ClientListRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            address: row.address,
            avatar_url: row.avatar_url,
            role: row.role,
            created_at: row.created_at,
            feedback_count: row.feedback_count,
        }
    }
}

/// A worker as listed for administrators.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminWorkerRow {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub position: String,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub rating: RatingSummary,
}

impl AdminWorkerRow {
    /// Decorate a worker row with its derived rating summary.
    #[must_use]
    pub fn from_worker(worker: Worker, rating: RatingSummary) -> Self {
        Self {
            id: worker.id,
            email: worker.email,
            first_name: worker.first_name,
            last_name: worker.last_name,
            phone: worker.phone,
            position: worker.position,
            is_available: worker.is_available,
            created_at: worker.created_at,
            rating,
        }
    }
}

/// A category with its association usage, as listed for administrators.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Number of worker associations referencing this category. A nonzero
    /// count is exactly what blocks deletion.
    pub worker_count: i64,
}

impl CategoryResponse {
    /// Decorate a category with its usage count.
    #[must_use]
    pub fn from_service(service: Service, worker_count: i64) -> Self {
        Self {
            id: service.id,
            name: service.name,
            created_at: service.created_at,
            worker_count,
        }
    }
}

/// Request to create a category.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
}

/// Request to rename a category.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: String,
}

/// A feedback record with both parties, for moderation listings.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminFeedbackRow {
    pub id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub client_id: Uuid,
    pub client_name: String,
    pub client_email: String,
    pub worker_id: Uuid,
    pub worker_name: String,
    pub worker_position: String,
}

impl From<FeedbackAdminRow> for AdminFeedbackRow {
    fn from(row: FeedbackAdminRow) -> Self {
        Self {
            id: row.id,
            rating: row.rating,
            comment: row.comment,
            created_at: row.created_at,
            client_id: row.client_id,
            client_name: format!("{} {}", row.client_first_name, row.client_last_name),
            client_email: row.client_email,
            worker_id: row.worker_id,
            worker_name: format!("{} {}", row.worker_first_name, row.worker_last_name),
            worker_position: row.worker_position,
        }
    }
}
