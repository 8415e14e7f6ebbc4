//! Worker-to-service association rows.

use sqlx::FromRow;

/// A join row linking one worker to one service category.
///
/// Created atomically with the worker during registration; deleted before
/// the worker itself when a worker is removed.
#[derive(Debug, Clone, FromRow)]
pub struct WorkerService {
    pub worker_id: uuid::Uuid,
    pub service_id: uuid::Uuid,
}

impl WorkerService {
    /// Count association rows referencing a service category.
    ///
    /// This is the precondition query for the guarded category delete.
    pub async fn count_for_service(
        pool: &sqlx::PgPool,
        service_id: uuid::Uuid,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM worker_services WHERE service_id = $1")
                .bind(service_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// List the service categories a worker is associated with.
    pub async fn services_for_worker(
        pool: &sqlx::PgPool,
        worker_id: uuid::Uuid,
    ) -> Result<Vec<crate::models::Service>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT s.*
            FROM services s
            JOIN worker_services ws ON ws.service_id = s.id
            WHERE ws.worker_id = $1
            ORDER BY s.name ASC
            "#,
        )
        .bind(worker_id)
        .fetch_all(pool)
        .await
    }

    /// Delete all association rows for a worker, inside the caller's
    /// transaction. Must run before the worker row itself is deleted.
    pub async fn delete_for_worker(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        worker_id: uuid::Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM worker_services WHERE worker_id = $1")
            .bind(worker_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
