//! Public catalog reads.

use crate::error::ApiCatalogError;
use crate::models::{HomeStats, ServiceResponse, WorkerDetail, WorkerSummary};
use crate::rating::RatingSummary;
use fundi_db::{Client, Feedback, Service, Worker, WorkerService};
use sqlx::PgPool;

/// Read-side service for the public catalog.
#[derive(Clone)]
pub struct CatalogService {
    pool: PgPool,
}

impl CatalogService {
    /// Create a new catalog service.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all service categories.
    pub async fn list_services(&self) -> Result<Vec<ServiceResponse>, ApiCatalogError> {
        let services = Service::list_all(&self.pool).await?;
        Ok(services.into_iter().map(ServiceResponse::from).collect())
    }

    /// List all workers, each decorated with its derived rating summary.
    ///
    /// The summary is recomputed from the feedback rows on every call;
    /// there is no cached aggregate to go stale.
    pub async fn list_workers(&self) -> Result<Vec<WorkerSummary>, ApiCatalogError> {
        let workers = Worker::list_all(&self.pool).await?;

        let mut summaries = Vec::with_capacity(workers.len());
        for worker in workers {
            let ratings = Feedback::ratings_for_worker(&self.pool, worker.id).await?;
            summaries.push(WorkerSummary::from_worker(
                worker,
                RatingSummary::from_ratings(&ratings),
            ));
        }
        Ok(summaries)
    }

    /// Fetch one worker's public detail: profile, associated categories,
    /// and the derived rating summary.
    pub async fn get_worker(&self, id: uuid::Uuid) -> Result<WorkerDetail, ApiCatalogError> {
        let worker = Worker::find_by_id(&self.pool, id)
            .await?
            .ok_or(ApiCatalogError::WorkerNotFound)?;

        let services = WorkerService::services_for_worker(&self.pool, worker.id).await?;
        let ratings = Feedback::ratings_for_worker(&self.pool, worker.id).await?;

        Ok(WorkerDetail::from_parts(
            worker,
            services,
            RatingSummary::from_ratings(&ratings),
        ))
    }

    /// Home-page counts.
    pub async fn home_stats(&self) -> Result<HomeStats, ApiCatalogError> {
        let total_workers = Worker::count(&self.pool).await?;
        let total_clients = Client::count(&self.pool).await?;
        Ok(HomeStats {
            total_workers,
            total_clients,
        })
    }
}
