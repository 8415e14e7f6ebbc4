//! Service category entity model.
//!
//! Name uniqueness is a product expectation, not a schema constraint, and
//! deletion is guarded above the store: a category referenced by any
//! worker association must not be removed.

use chrono::{DateTime, Utc};
use fundi_core::ServiceId;
use sqlx::FromRow;

/// A service category in the catalog.
#[derive(Debug, Clone, FromRow)]
pub struct Service {
    /// Unique identifier for the category.
    pub id: uuid::Uuid,

    /// Display name (e.g. "plumbing").
    pub name: String,

    /// When the category was created.
    pub created_at: DateTime<Utc>,
}

impl Service {
    /// Get the service ID as a typed `ServiceId`.
    #[must_use]
    pub fn service_id(&self) -> ServiceId {
        ServiceId::from_uuid(self.id)
    }

    /// Find a category by id.
    pub async fn find_by_id(
        pool: &sqlx::PgPool,
        id: uuid::Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all categories ordered by name.
    pub async fn list_all(pool: &sqlx::PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM services ORDER BY name ASC")
            .fetch_all(pool)
            .await
    }

    /// Insert a new category.
    pub async fn create(pool: &sqlx::PgPool, name: &str) -> Result<Self, sqlx::Error> {
        sqlx::query_as("INSERT INTO services (name) VALUES ($1) RETURNING *")
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Rename a category. Returns the updated row.
    ///
    /// Workers registered under the old name keep their denormalized
    /// `position` label; renames are display-only going forward.
    pub async fn update_name(
        pool: &sqlx::PgPool,
        id: uuid::Uuid,
        name: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as("UPDATE services SET name = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category. Returns the number of rows removed.
    ///
    /// Callers must run the association-count guard first; this method does
    /// not re-check.
    pub async fn delete(pool: &sqlx::PgPool, id: uuid::Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Count all categories.
    pub async fn count(pool: &sqlx::PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM services")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
