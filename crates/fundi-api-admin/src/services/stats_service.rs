//! Dashboard statistics.

use crate::error::ApiAdminError;
use crate::models::DashboardStats;
use chrono::{Duration, Utc};
use fundi_api_catalog::RatingSummary;
use fundi_db::{Client, Feedback, Service, Worker};
use sqlx::PgPool;

/// Service computing the admin dashboard counters.
#[derive(Clone)]
pub struct StatsService {
    pool: PgPool,
}

impl StatsService {
    /// Create a new stats service.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Compute the dashboard statistics. Everything is derived from the
    /// current rows; nothing is cached.
    pub async fn dashboard(&self) -> Result<DashboardStats, ApiAdminError> {
        let total_clients = Client::count(&self.pool).await?;
        let total_workers = Worker::count(&self.pool).await?;
        let total_services = Service::count(&self.pool).await?;
        let total_feedback = Feedback::count(&self.pool).await?;
        let active_workers = Worker::count_available(&self.pool).await?;
        let recent_clients =
            Client::count_created_since(&self.pool, Utc::now() - Duration::days(30)).await?;

        let ratings = Feedback::all_ratings(&self.pool).await?;

        Ok(DashboardStats {
            total_clients,
            total_workers,
            total_services,
            total_feedback,
            active_workers,
            inactive_workers: total_workers - active_workers,
            recent_clients,
            rating: RatingSummary::from_ratings(&ratings),
        })
    }
}
