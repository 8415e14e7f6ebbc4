//! Request and response models for the catalog API.

use crate::rating::RatingSummary;
use chrono::{DateTime, Utc};
use fundi_db::{FeedbackWithAuthor, Service, Worker};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A service category as listed publicly.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<Service> for ServiceResponse {
    fn from(service: Service) -> Self {
        Self {
            id: service.id,
            name: service.name,
        }
    }
}

/// A worker as it appears in the public listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WorkerSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar_url: Option<String>,
    pub position: String,
    pub is_available: bool,
    /// Derived at read time from the worker's feedback rows.
    pub rating: RatingSummary,
}

impl WorkerSummary {
    /// Decorate a worker row with its derived rating summary.
    #[must_use]
    pub fn from_worker(worker: Worker, rating: RatingSummary) -> Self {
        Self {
            id: worker.id,
            first_name: worker.first_name,
            last_name: worker.last_name,
            phone: worker.phone,
            address: worker.address,
            avatar_url: worker.avatar_url,
            position: worker.position,
            is_available: worker.is_available,
            rating,
        }
    }
}

/// Full public detail for one worker.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WorkerDetail {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<String>,
    pub languages: Option<String>,
    pub position: String,
    pub is_available: bool,
    /// The categories this worker is associated with.
    pub services: Vec<ServiceResponse>,
    /// Derived at read time from the worker's feedback rows.
    pub rating: RatingSummary,
}

impl WorkerDetail {
    /// Assemble the detail view from its parts.
    #[must_use]
    pub fn from_parts(worker: Worker, services: Vec<Service>, rating: RatingSummary) -> Self {
        Self {
            id: worker.id,
            first_name: worker.first_name,
            last_name: worker.last_name,
            phone: worker.phone,
            address: worker.address,
            avatar_url: worker.avatar_url,
            bio: worker.bio,
            skills: worker.skills,
            languages: worker.languages,
            position: worker.position,
            is_available: worker.is_available,
            services: services.into_iter().map(ServiceResponse::from).collect(),
            rating,
        }
    }
}

/// Request to create feedback against a worker.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateFeedbackRequest {
    /// The authoring client.
    pub client_id: Uuid,
    /// Rating, 1 to 5 inclusive.
    pub rating: i32,
    /// Optional free-text comment.
    #[serde(default)]
    pub comment: Option<String>,
}

/// A feedback record with its author, as listed on a worker's page.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeedbackResponse {
    pub id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub author: FeedbackAuthor,
}

/// The authoring client, as shown alongside feedback.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeedbackAuthor {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: Option<String>,
}

impl From<FeedbackWithAuthor> for FeedbackResponse {
    fn from(row: FeedbackWithAuthor) -> Self {
        Self {
            id: row.id,
            rating: row.rating,
            comment: row.comment,
            created_at: row.created_at,
            author: FeedbackAuthor {
                id: row.client_id,
                first_name: row.client_first_name,
                last_name: row.client_last_name,
                avatar_url: row.client_avatar_url,
            },
        }
    }
}

/// Home-page counts.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HomeStats {
    pub total_workers: i64,
    pub total_clients: i64,
}
