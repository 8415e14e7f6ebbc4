//! The profile store seam.
//!
//! The registration orchestrator and identity resolver talk to the
//! relational store through this trait rather than holding a pool
//! directly: the non-atomic two-store sequence is the part of the system
//! where failure injection matters, and the seam is what makes the
//! compensation and lag-absorption paths testable without a database.
//! [`PgProfileStore`] is the production implementation; the in-memory
//! implementation lives in [`crate::services::MemoryProfileStore`].

use async_trait::async_trait;
use fundi_core::{IdentityUid, ServiceId};
use fundi_db::{Client, DbError, NewClient, NewWorker, Service, Worker};
use sqlx::PgPool;

/// Partial update for a client profile. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ClientUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar_url: Option<String>,
}

/// Partial update for a worker profile. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct WorkerUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<String>,
    pub languages: Option<String>,
    pub age: Option<i32>,
    pub is_available: Option<bool>,
}

/// Row-level access to the profile store, scoped to what the registration
/// and resolution flows need.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Look up a service category (the orchestrator's referential check).
    async fn find_service(&self, id: ServiceId) -> Result<Option<Service>, DbError>;

    /// Insert a client profile row.
    async fn create_client(&self, new: NewClient) -> Result<Client, DbError>;

    /// Insert a worker profile row together with its service association.
    async fn create_worker(&self, new: NewWorker) -> Result<Worker, DbError>;

    /// Find the client profile for an identity, if any.
    async fn find_client(&self, uid: &IdentityUid) -> Result<Option<Client>, DbError>;

    /// Find the worker profile for an identity, if any.
    async fn find_worker(&self, uid: &IdentityUid) -> Result<Option<Worker>, DbError>;

    /// Partially update the client profile for an identity.
    async fn update_client(
        &self,
        uid: &IdentityUid,
        changes: ClientUpdate,
    ) -> Result<Option<Client>, DbError>;

    /// Partially update the worker profile for an identity.
    async fn update_worker(
        &self,
        uid: &IdentityUid,
        changes: WorkerUpdate,
    ) -> Result<Option<Worker>, DbError>;
}

/// PostgreSQL-backed profile store.
#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    /// Create a new store over the given pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn find_service(&self, id: ServiceId) -> Result<Option<Service>, DbError> {
        Service::find_by_id(&self.pool, *id.as_uuid())
            .await
            .map_err(DbError::from)
    }

    async fn create_client(&self, new: NewClient) -> Result<Client, DbError> {
        Client::create(&self.pool, &new).await.map_err(DbError::from)
    }

    async fn create_worker(&self, new: NewWorker) -> Result<Worker, DbError> {
        Worker::create_with_service(&self.pool, &new)
            .await
            .map_err(DbError::from)
    }

    async fn find_client(&self, uid: &IdentityUid) -> Result<Option<Client>, DbError> {
        Client::find_by_identity_uid(&self.pool, uid)
            .await
            .map_err(DbError::from)
    }

    async fn find_worker(&self, uid: &IdentityUid) -> Result<Option<Worker>, DbError> {
        Worker::find_by_identity_uid(&self.pool, uid)
            .await
            .map_err(DbError::from)
    }

    async fn update_client(
        &self,
        uid: &IdentityUid,
        changes: ClientUpdate,
    ) -> Result<Option<Client>, DbError> {
        Client::update_profile(
            &self.pool,
            uid,
            changes.first_name,
            changes.last_name,
            changes.phone,
            changes.address,
            changes.avatar_url,
        )
        .await
        .map_err(DbError::from)
    }

    async fn update_worker(
        &self,
        uid: &IdentityUid,
        changes: WorkerUpdate,
    ) -> Result<Option<Worker>, DbError> {
        Worker::update_profile(
            &self.pool,
            uid,
            changes.first_name,
            changes.last_name,
            changes.phone,
            changes.address,
            changes.avatar_url,
            changes.bio,
            changes.skills,
            changes.languages,
            changes.age,
            changes.is_available,
        )
        .await
        .map_err(DbError::from)
    }
}
