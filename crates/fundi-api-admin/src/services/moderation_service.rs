//! Account and feedback moderation.
//!
//! Profile deletions initiated here also remove the provider-side
//! identity, so the two stores are cleaned together on the moderated
//! path. When the provider-side delete fails the profile stays gone and
//! the leftover identity is logged under the reconciliation target — the
//! same first-class orphan event the registration saga emits.

use crate::error::ApiAdminError;
use crate::models::{AdminClientRow, AdminFeedbackRow, AdminWorkerRow};
use fundi_api_auth::error::RECONCILIATION_TARGET;
use fundi_api_catalog::RatingSummary;
use fundi_core::IdentityUid;
use fundi_db::{Client, Feedback, Worker};
use fundi_identity::{IdentityError, IdentityProvider};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

/// Service for admin moderation of accounts and feedback.
#[derive(Clone)]
pub struct ModerationService {
    pool: PgPool,
    provider: Arc<dyn IdentityProvider>,
}

impl ModerationService {
    /// Create a new moderation service.
    pub fn new(pool: PgPool, provider: Arc<dyn IdentityProvider>) -> Self {
        Self { pool, provider }
    }

    // ── Clients ─────────────────────────────────────────────────────────

    /// List all clients with their authored-feedback counts.
    pub async fn list_clients(&self) -> Result<Vec<AdminClientRow>, ApiAdminError> {
        let rows = Client::list_with_feedback_counts(&self.pool).await?;
        Ok(rows.into_iter().map(AdminClientRow::from).collect())
    }

    /// Delete a client profile and its provider identity.
    pub async fn delete_client(&self, id: uuid::Uuid) -> Result<(), ApiAdminError> {
        let client = Client::find_by_id(&self.pool, id)
            .await?
            .ok_or(ApiAdminError::ClientNotFound)?;

        Client::delete(&self.pool, id).await?;
        info!(client_id = %id, "Client profile deleted");

        if let Ok(uid) = client.identity_uid.parse::<IdentityUid>() {
            self.cleanup_identity(&uid).await;
        }
        Ok(())
    }

    // ── Workers ─────────────────────────────────────────────────────────

    /// List all workers with derived rating summaries.
    pub async fn list_workers(&self) -> Result<Vec<AdminWorkerRow>, ApiAdminError> {
        let workers = Worker::list_all(&self.pool).await?;

        let mut rows = Vec::with_capacity(workers.len());
        for worker in workers {
            let ratings = Feedback::ratings_for_worker(&self.pool, worker.id).await?;
            rows.push(AdminWorkerRow::from_worker(
                worker,
                RatingSummary::from_ratings(&ratings),
            ));
        }
        Ok(rows)
    }

    /// Flip a worker's availability flag.
    pub async fn toggle_worker_availability(
        &self,
        id: uuid::Uuid,
    ) -> Result<AdminWorkerRow, ApiAdminError> {
        let worker = Worker::toggle_availability(&self.pool, id)
            .await?
            .ok_or(ApiAdminError::WorkerNotFound)?;

        info!(
            worker_id = %id,
            is_available = worker.is_available,
            "Worker availability toggled"
        );

        let ratings = Feedback::ratings_for_worker(&self.pool, worker.id).await?;
        Ok(AdminWorkerRow::from_worker(
            worker,
            RatingSummary::from_ratings(&ratings),
        ))
    }

    /// Delete a worker: association rows first, then the worker row (the
    /// store enforces the foreign key), then the provider identity.
    pub async fn delete_worker(&self, id: uuid::Uuid) -> Result<(), ApiAdminError> {
        let uid = Worker::delete_with_associations(&self.pool, id)
            .await?
            .ok_or(ApiAdminError::WorkerNotFound)?;

        info!(worker_id = %id, "Worker profile and associations deleted");
        self.cleanup_identity(&uid).await;
        Ok(())
    }

    // ── Feedback ────────────────────────────────────────────────────────

    /// List all feedback with both parties, for moderation.
    pub async fn list_feedback(&self) -> Result<Vec<AdminFeedbackRow>, ApiAdminError> {
        let rows = Feedback::list_all(&self.pool).await?;
        Ok(rows.into_iter().map(AdminFeedbackRow::from).collect())
    }

    /// Delete a feedback record. The next rating read simply no longer
    /// sees the row; there is no aggregate to fix up.
    pub async fn delete_feedback(&self, id: uuid::Uuid) -> Result<(), ApiAdminError> {
        let removed = Feedback::delete(&self.pool, id).await?;
        if removed == 0 {
            return Err(ApiAdminError::FeedbackNotFound);
        }
        info!(feedback_id = %id, "Feedback deleted");
        Ok(())
    }

    /// Remove the provider identity after its profile is gone.
    ///
    /// A failure here leaves an identity with no profile; that cannot be
    /// healed from this code path, so it is surfaced to the reconciliation
    /// log rather than failing the moderation request whose store-side
    /// work already committed.
    async fn cleanup_identity(&self, uid: &IdentityUid) {
        match self.provider.delete_identity(uid).await {
            Ok(()) | Err(IdentityError::NotFound) => {
                info!(uid = %uid, "Provider identity deleted");
            }
            Err(e) => {
                tracing::error!(
                    target: RECONCILIATION_TARGET,
                    uid = %uid,
                    error = %e,
                    "Profile removed but provider identity deletion failed; identity is orphaned"
                );
            }
        }
    }
}
