//! Worker profile entity model.
//!
//! The second of the two mutually exclusive profile shapes. A worker carries
//! catalog-facing fields (bio, skills, languages, availability) plus a
//! `position` label that is denormalized from the service category's name at
//! registration time — it is intentionally not kept in sync with later
//! category renames.

use crate::models::worker_service::WorkerService;
use chrono::{DateTime, Utc};
use fundi_core::{IdentityUid, ServiceId, WorkerId};
use sqlx::FromRow;

/// A worker profile in the store.
#[derive(Debug, Clone, FromRow)]
pub struct Worker {
    /// Unique identifier for the worker row.
    pub id: uuid::Uuid,

    /// Back reference to the identity provider's account id.
    pub identity_uid: String,

    /// Email as registered with the provider (denormalized for display).
    pub email: String,

    /// Worker's first name.
    pub first_name: String,

    /// Worker's last name.
    pub last_name: String,

    /// Contact phone number.
    pub phone: Option<String>,

    /// Postal address.
    pub address: Option<String>,

    /// URL to the worker's avatar image.
    pub avatar_url: Option<String>,

    /// Free-text self description.
    pub bio: Option<String>,

    /// Free-text skill list.
    pub skills: Option<String>,

    /// Free-text spoken-language list.
    pub languages: Option<String>,

    /// Worker's age.
    pub age: Option<i32>,

    /// Display label copied from the service category at creation time.
    pub position: String,

    /// Whether the worker is currently taking jobs.
    pub is_available: bool,

    /// When the profile was created.
    pub created_at: DateTime<Utc>,

    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Fields required to insert a new worker row with its service association.
#[derive(Debug, Clone)]
pub struct NewWorker {
    pub identity_uid: IdentityUid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub bio: Option<String>,
    /// The service category this worker registered under.
    pub service_id: ServiceId,
    /// Category display name, denormalized into the worker's position.
    pub position: String,
}

impl Worker {
    /// Get the worker ID as a typed `WorkerId`.
    #[must_use]
    pub fn worker_id(&self) -> WorkerId {
        WorkerId::from_uuid(self.id)
    }

    /// Find a worker by the identity provider's uid.
    pub async fn find_by_identity_uid(
        pool: &sqlx::PgPool,
        uid: &IdentityUid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM workers WHERE identity_uid = $1")
            .bind(uid.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Find a worker by row id.
    pub async fn find_by_id(
        pool: &sqlx::PgPool,
        id: uuid::Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM workers WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new worker row together with its worker-service association.
    ///
    /// Both inserts run in one transaction: a worker never exists without
    /// its association, and a failed association insert rolls the worker
    /// back so the registration orchestrator sees a single failed step.
    pub async fn create_with_service(
        pool: &sqlx::PgPool,
        new: &NewWorker,
    ) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let worker: Worker = sqlx::query_as(
            r#"
            INSERT INTO workers (identity_uid, email, first_name, last_name,
                                 phone, address, bio, position)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(new.identity_uid.as_str())
        .bind(&new.email)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.phone)
        .bind(&new.address)
        .bind(&new.bio)
        .bind(&new.position)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO worker_services (worker_id, service_id) VALUES ($1, $2)")
            .bind(worker.id)
            .bind(new.service_id.as_uuid())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(worker)
    }

    /// Partially update a worker's profile fields, keyed by identity uid.
    ///
    /// Every omitted (`None`) field keeps its stored value, via `COALESCE`.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_profile(
        pool: &sqlx::PgPool,
        uid: &IdentityUid,
        first_name: Option<String>,
        last_name: Option<String>,
        phone: Option<String>,
        address: Option<String>,
        avatar_url: Option<String>,
        bio: Option<String>,
        skills: Option<String>,
        languages: Option<String>,
        age: Option<i32>,
        is_available: Option<bool>,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r#"
            UPDATE workers
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                phone = COALESCE($4, phone),
                address = COALESCE($5, address),
                avatar_url = COALESCE($6, avatar_url),
                bio = COALESCE($7, bio),
                skills = COALESCE($8, skills),
                languages = COALESCE($9, languages),
                age = COALESCE($10, age),
                is_available = COALESCE($11, is_available),
                updated_at = NOW()
            WHERE identity_uid = $1
            RETURNING *
            "#,
        )
        .bind(uid.as_str())
        .bind(&first_name)
        .bind(&last_name)
        .bind(&phone)
        .bind(&address)
        .bind(&avatar_url)
        .bind(&bio)
        .bind(&skills)
        .bind(&languages)
        .bind(age)
        .bind(is_available)
        .fetch_optional(pool)
        .await
    }

    /// List all workers, newest first.
    pub async fn list_all(pool: &sqlx::PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM workers ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }

    /// Flip a worker's availability flag. Returns the updated row.
    pub async fn toggle_availability(
        pool: &sqlx::PgPool,
        id: uuid::Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r#"
            UPDATE workers
            SET is_available = NOT is_available, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Delete a worker and its association rows.
    ///
    /// The association rows must go first — `worker_services` holds a plain
    /// foreign key to `workers`, so reversing the order fails at the store.
    /// Both deletes run in one transaction. Returns the removed worker's
    /// identity uid so the caller can clean up the provider side, or `None`
    /// if no such worker existed.
    pub async fn delete_with_associations(
        pool: &sqlx::PgPool,
        id: uuid::Uuid,
    ) -> Result<Option<IdentityUid>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        WorkerService::delete_for_worker(&mut tx, id).await?;

        let uid: Option<(String,)> =
            sqlx::query_as("DELETE FROM workers WHERE id = $1 RETURNING identity_uid")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        tx.commit().await?;

        // A row that made it into the table always has a non-empty uid.
        Ok(uid.and_then(|(s,)| IdentityUid::new(s).ok()))
    }

    /// Count all workers.
    pub async fn count(pool: &sqlx::PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM workers")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Count workers currently marked available.
    pub async fn count_available(pool: &sqlx::PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM workers WHERE is_available = TRUE")
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_id_wraps_row_id() {
        let worker = Worker {
            id: uuid::Uuid::new_v4(),
            identity_uid: "uid-9".to_string(),
            email: "bob@example.com".to_string(),
            first_name: "Bob".to_string(),
            last_name: "Mason".to_string(),
            phone: None,
            address: None,
            avatar_url: None,
            bio: None,
            skills: None,
            languages: None,
            age: None,
            position: "carpentry".to_string(),
            is_available: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(worker.worker_id().as_uuid(), &worker.id);
    }
}
