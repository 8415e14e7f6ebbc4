//! Feedback creation and listing.
//!
//! Writes are independent single-row inserts; two concurrent inserts for
//! the same worker are commutative with respect to the rating fold, so no
//! locking is needed anywhere on this path.

use crate::error::ApiCatalogError;
use crate::models::{CreateFeedbackRequest, FeedbackResponse};
use fundi_db::{Client, Feedback, NewFeedback, Worker};
use sqlx::PgPool;
use tracing::info;

/// Valid rating bounds, inclusive.
const RATING_MIN: i32 = 1;
const RATING_MAX: i32 = 5;

/// Service for feedback operations.
#[derive(Clone)]
pub struct FeedbackService {
    pool: PgPool,
}

impl FeedbackService {
    /// Create a new feedback service.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Validate a rating value against the allowed range.
    pub fn validate_rating(rating: i32) -> Result<(), ApiCatalogError> {
        if !(RATING_MIN..=RATING_MAX).contains(&rating) {
            return Err(ApiCatalogError::Validation(format!(
                "Rating must be between {RATING_MIN} and {RATING_MAX}"
            )));
        }
        Ok(())
    }

    /// Create a feedback record for a worker.
    ///
    /// Validation (rating range, both parties exist) runs before the
    /// insert; the insert itself is a single row with no aggregate to
    /// maintain.
    pub async fn create(
        &self,
        worker_id: uuid::Uuid,
        request: CreateFeedbackRequest,
    ) -> Result<FeedbackResponse, ApiCatalogError> {
        Self::validate_rating(request.rating)?;

        Worker::find_by_id(&self.pool, worker_id)
            .await?
            .ok_or(ApiCatalogError::WorkerNotFound)?;

        let client = Client::find_by_id(&self.pool, request.client_id)
            .await?
            .ok_or_else(|| ApiCatalogError::Validation("Unknown client".to_string()))?;

        let feedback = Feedback::create(
            &self.pool,
            &NewFeedback {
                worker_id,
                client_id: client.id,
                rating: request.rating,
                comment: request.comment.filter(|c| !c.trim().is_empty()),
            },
        )
        .await?;

        info!(
            feedback_id = %feedback.id,
            worker_id = %worker_id,
            rating = feedback.rating,
            "Feedback created"
        );

        Ok(FeedbackResponse {
            id: feedback.id,
            rating: feedback.rating,
            comment: feedback.comment,
            created_at: feedback.created_at,
            author: crate::models::FeedbackAuthor {
                id: client.id,
                first_name: client.first_name,
                last_name: client.last_name,
                avatar_url: client.avatar_url,
            },
        })
    }

    /// List a worker's feedback with author details, newest first.
    pub async fn list_for_worker(
        &self,
        worker_id: uuid::Uuid,
    ) -> Result<Vec<FeedbackResponse>, ApiCatalogError> {
        Worker::find_by_id(&self.pool, worker_id)
            .await?
            .ok_or(ApiCatalogError::WorkerNotFound)?;

        let rows = Feedback::list_for_worker(&self.pool, worker_id).await?;
        Ok(rows.into_iter().map(FeedbackResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(FeedbackService::validate_rating(1).is_ok());
        assert!(FeedbackService::validate_rating(3).is_ok());
        assert!(FeedbackService::validate_rating(5).is_ok());
        assert!(FeedbackService::validate_rating(0).is_err());
        assert!(FeedbackService::validate_rating(6).is_err());
        assert!(FeedbackService::validate_rating(-1).is_err());
    }
}
