//! Identity resolution: verified token → exactly one profile variant.
//!
//! The client and worker tables share no supertype; the resolver queries
//! them in order (clients first — the larger population) and returns an
//! explicit tagged union. The registration invariant guarantees at most
//! one match, so the order affects efficiency only, never correctness.

use crate::models::{ProfileResponse, UpdateProfileRequest};
use crate::services::retry::RetryPolicy;
use crate::services::store::{ClientUpdate, ProfileStore, WorkerUpdate};
use fundi_core::IdentityUid;
use fundi_db::{Client, DbError, Worker};
use std::sync::Arc;

/// The single matching profile for an identity, tagged with its variant.
#[derive(Debug, Clone)]
pub enum ResolvedProfile {
    Client(Client),
    Worker(Worker),
}

impl From<ResolvedProfile> for ProfileResponse {
    fn from(resolved: ResolvedProfile) -> Self {
        match resolved {
            ResolvedProfile::Client(client) => ProfileResponse::Client(client.into()),
            ResolvedProfile::Worker(worker) => ProfileResponse::Worker(worker.into()),
        }
    }
}

/// Maps a verified identity to its profile, absorbing propagation lag.
pub struct ProfileResolver {
    store: Arc<dyn ProfileStore>,
    retry: RetryPolicy,
}

impl ProfileResolver {
    /// Create a resolver with the given lag-absorption policy.
    pub fn new(store: Arc<dyn ProfileStore>, retry: RetryPolicy) -> Self {
        Self { store, retry }
    }

    /// One resolution attempt, no retries.
    ///
    /// `Ok(None)` means neither table currently shows a row for the uid —
    /// which immediately after registration may be propagation lag rather
    /// than genuine absence.
    pub async fn resolve_once(
        &self,
        uid: &IdentityUid,
    ) -> Result<Option<ResolvedProfile>, DbError> {
        if let Some(client) = self.store.find_client(uid).await? {
            return Ok(Some(ResolvedProfile::Client(client)));
        }
        if let Some(worker) = self.store.find_worker(uid).await? {
            return Ok(Some(ResolvedProfile::Worker(worker)));
        }
        Ok(None)
    }

    /// Resolve with the bounded retry budget.
    ///
    /// `Ok(None)` after this is a genuine absence: the caller must complete
    /// registration or re-authenticate.
    pub async fn resolve(&self, uid: &IdentityUid) -> Result<Option<ResolvedProfile>, DbError> {
        self.retry
            .run_until_present("resolve_profile", || self.resolve_once(uid))
            .await
    }

    /// Partially update the profile for an identity, branching per variant.
    ///
    /// Client profiles accept only the name/contact/avatar fields; the
    /// worker-only fields in the request are ignored for them. Worker
    /// profiles additionally accept bio, skills, languages, age and the
    /// availability flag. Omitted fields keep their stored values.
    pub async fn update(
        &self,
        uid: &IdentityUid,
        request: UpdateProfileRequest,
    ) -> Result<Option<ResolvedProfile>, DbError> {
        if self.store.find_client(uid).await?.is_some() {
            let updated = self
                .store
                .update_client(
                    uid,
                    ClientUpdate {
                        first_name: request.first_name,
                        last_name: request.last_name,
                        phone: request.phone,
                        address: request.address,
                        avatar_url: request.avatar_url,
                    },
                )
                .await?;
            return Ok(updated.map(ResolvedProfile::Client));
        }

        let updated = self
            .store
            .update_worker(
                uid,
                WorkerUpdate {
                    first_name: request.first_name,
                    last_name: request.last_name,
                    phone: request.phone,
                    address: request.address,
                    avatar_url: request.avatar_url,
                    bio: request.bio,
                    skills: request.skills,
                    languages: request.languages,
                    age: request.age,
                    is_available: request.is_available,
                },
            )
            .await?;
        Ok(updated.map(ResolvedProfile::Worker))
    }
}
