//! Feedback entity model.
//!
//! Feedback rows are append-only from the client side and deleted only by
//! admin moderation. No aggregate is ever stored alongside them: average
//! rating and count are derived at read time from these rows, so they can
//! never drift out of sync.

use chrono::{DateTime, Utc};
use fundi_core::FeedbackId;
use sqlx::FromRow;

/// A feedback record: one client rating one worker.
#[derive(Debug, Clone, FromRow)]
pub struct Feedback {
    /// Unique identifier for the feedback record.
    pub id: uuid::Uuid,

    /// The rated worker.
    pub worker_id: uuid::Uuid,

    /// The authoring client.
    pub client_id: uuid::Uuid,

    /// Rating, 1 to 5 inclusive (validated at the boundary).
    pub rating: i32,

    /// Optional free-text comment.
    pub comment: Option<String>,

    /// When the feedback was created.
    pub created_at: DateTime<Utc>,
}

/// Fields required to insert a new feedback record.
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub worker_id: uuid::Uuid,
    pub client_id: uuid::Uuid,
    pub rating: i32,
    pub comment: Option<String>,
}

/// A feedback row joined with its author, for worker-detail listings.
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackWithAuthor {
    pub id: uuid::Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub client_id: uuid::Uuid,
    pub client_first_name: String,
    pub client_last_name: String,
    pub client_avatar_url: Option<String>,
}

/// A feedback row joined with both parties, for admin moderation listings.
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackAdminRow {
    pub id: uuid::Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub client_id: uuid::Uuid,
    pub client_first_name: String,
    pub client_last_name: String,
    pub client_email: String,
    pub worker_id: uuid::Uuid,
    pub worker_first_name: String,
    pub worker_last_name: String,
    pub worker_position: String,
}

impl Feedback {
    /// Get the feedback ID as a typed `FeedbackId`.
    #[must_use]
    pub fn feedback_id(&self) -> FeedbackId {
        FeedbackId::from_uuid(self.id)
    }

    /// Insert a new feedback record.
    pub async fn create(pool: &sqlx::PgPool, new: &NewFeedback) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r#"
            INSERT INTO feedback (worker_id, client_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(new.worker_id)
        .bind(new.client_id)
        .bind(new.rating)
        .bind(&new.comment)
        .fetch_one(pool)
        .await
    }

    /// Fetch every rating value for a worker.
    ///
    /// This is the input to the read-time rating aggregation; deliberately
    /// a plain row fetch rather than a SQL AVG so the fold (and its
    /// rounding) lives in one place.
    pub async fn ratings_for_worker(
        pool: &sqlx::PgPool,
        worker_id: uuid::Uuid,
    ) -> Result<Vec<i32>, sqlx::Error> {
        let rows: Vec<(i32,)> = sqlx::query_as("SELECT rating FROM feedback WHERE worker_id = $1")
            .bind(worker_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|(r,)| r).collect())
    }

    /// Fetch every rating value in the system (admin dashboard statistics).
    pub async fn all_ratings(pool: &sqlx::PgPool) -> Result<Vec<i32>, sqlx::Error> {
        let rows: Vec<(i32,)> = sqlx::query_as("SELECT rating FROM feedback")
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|(r,)| r).collect())
    }

    /// List a worker's feedback with author details, newest first.
    pub async fn list_for_worker(
        pool: &sqlx::PgPool,
        worker_id: uuid::Uuid,
    ) -> Result<Vec<FeedbackWithAuthor>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT f.id, f.rating, f.comment, f.created_at,
                   c.id AS client_id, c.first_name AS client_first_name,
                   c.last_name AS client_last_name, c.avatar_url AS client_avatar_url
            FROM feedback f
            JOIN clients c ON c.id = f.client_id
            WHERE f.worker_id = $1
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(worker_id)
        .fetch_all(pool)
        .await
    }

    /// List all feedback with both parties, newest first (admin moderation).
    pub async fn list_all(pool: &sqlx::PgPool) -> Result<Vec<FeedbackAdminRow>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT f.id, f.rating, f.comment, f.created_at,
                   c.id AS client_id, c.first_name AS client_first_name,
                   c.last_name AS client_last_name, c.email AS client_email,
                   w.id AS worker_id, w.first_name AS worker_first_name,
                   w.last_name AS worker_last_name, w.position AS worker_position
            FROM feedback f
            JOIN clients c ON c.id = f.client_id
            JOIN workers w ON w.id = f.worker_id
            ORDER BY f.created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Delete a feedback record. Returns the number of rows removed.
    pub async fn delete(pool: &sqlx::PgPool, id: uuid::Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Count all feedback records.
    pub async fn count(pool: &sqlx::PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM feedback")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
