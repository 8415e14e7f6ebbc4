//! Client profile entity model.
//!
//! A client is one of the two mutually exclusive profile shapes an account
//! can take. The row is keyed by its own UUID but always carries the
//! identity provider's uid as a back reference; resolution from a verified
//! token goes through `find_by_identity_uid`.

use chrono::{DateTime, Utc};
use fundi_core::{ClientId, IdentityUid};
use sqlx::FromRow;

/// Role marker for ordinary clients.
pub const ROLE_USER: &str = "user";

/// Role marker for administrators. Administrators are clients; there is no
/// separate admin table.
pub const ROLE_ADMIN: &str = "admin";

/// A client profile in the store.
#[derive(Debug, Clone, FromRow)]
pub struct Client {
    /// Unique identifier for the client row.
    pub id: uuid::Uuid,

    /// Back reference to the identity provider's account id.
    pub identity_uid: String,

    /// Email as registered with the provider (denormalized for display).
    pub email: String,

    /// Client's first name.
    pub first_name: String,

    /// Client's last name.
    pub last_name: String,

    /// Contact phone number.
    pub phone: Option<String>,

    /// Postal address.
    pub address: Option<String>,

    /// URL to the client's avatar image.
    pub avatar_url: Option<String>,

    /// Role marker: `user` or `admin`.
    pub role: String,

    /// When the profile was created.
    pub created_at: DateTime<Utc>,

    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Fields required to insert a new client row.
#[derive(Debug, Clone)]
pub struct NewClient {
    pub identity_uid: IdentityUid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: String,
}

/// A client row decorated with its feedback count, for admin listings.
#[derive(Debug, Clone, FromRow)]
pub struct ClientListRow {
    pub id: uuid::Uuid,
    pub identity_uid: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar_url: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    /// Number of feedback records this client has authored.
    pub feedback_count: i64,
}

impl Client {
    /// Get the client ID as a typed `ClientId`.
    #[must_use]
    pub fn client_id(&self) -> ClientId {
        ClientId::from_uuid(self.id)
    }

    /// Whether this client holds the administrator role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Find a client by the identity provider's uid.
    pub async fn find_by_identity_uid(
        pool: &sqlx::PgPool,
        uid: &IdentityUid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM clients WHERE identity_uid = $1")
            .bind(uid.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Find a client by row id.
    pub async fn find_by_id(
        pool: &sqlx::PgPool,
        id: uuid::Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new client row.
    pub async fn create(pool: &sqlx::PgPool, new: &NewClient) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r#"
            INSERT INTO clients (identity_uid, email, first_name, last_name, phone, address, role)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(new.identity_uid.as_str())
        .bind(&new.email)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.phone)
        .bind(&new.address)
        .bind(&new.role)
        .fetch_one(pool)
        .await
    }

    /// Partially update a client's profile fields, keyed by identity uid.
    ///
    /// Omitted (`None`) fields keep their stored value; this is never an
    /// overwrite-with-null.
    pub async fn update_profile(
        pool: &sqlx::PgPool,
        uid: &IdentityUid,
        first_name: Option<String>,
        last_name: Option<String>,
        phone: Option<String>,
        address: Option<String>,
        avatar_url: Option<String>,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r#"
            UPDATE clients
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                phone = COALESCE($4, phone),
                address = COALESCE($5, address),
                avatar_url = COALESCE($6, avatar_url),
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
        .fetch_optional(pool)
        .await
    }

    /// List all clients with their authored-feedback counts, newest first.
    pub async fn list_with_feedback_counts(
        pool: &sqlx::PgPool,
    ) -> Result<Vec<ClientListRow>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT c.id, c.identity_uid, c.email, c.first_name, c.last_name,
                   c.phone, c.address, c.avatar_url, c.role, c.created_at,
                   COUNT(f.id) AS feedback_count
            FROM clients c
            LEFT JOIN feedback f ON f.client_id = c.id
            GROUP BY c.id
            ORDER BY c.created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Count all clients.
    pub async fn count(pool: &sqlx::PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM clients")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Count clients created at or after the given instant.
    pub async fn count_created_since(
        pool: &sqlx::PgPool,
        since: DateTime<Utc>,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM clients WHERE created_at >= $1")
            .bind(since)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Delete a client row. Returns the number of rows removed.
    ///
    /// Feedback authored by the client goes with it (FK cascade); there are
    /// no other downstream references, so no guard applies.
    pub async fn delete(pool: &sqlx::PgPool, id: uuid::Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_client(role: &str) -> Client {
        Client {
            id: uuid::Uuid::new_v4(),
            identity_uid: "uid-1".to_string(),
            email: "jane@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            phone: None,
            address: None,
            avatar_url: None,
            role: role.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_admin() {
        assert!(sample_client(ROLE_ADMIN).is_admin());
        assert!(!sample_client(ROLE_USER).is_admin());
    }

    #[test]
    fn test_client_id_wraps_row_id() {
        let client = sample_client(ROLE_USER);
        assert_eq!(client.client_id().as_uuid(), &client.id);
    }
}
