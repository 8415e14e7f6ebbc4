//! Registration orchestration.
//!
//! Account creation spans two stores that share no transaction: the
//! identity provider (step 1) and the profile store (step 3, after the
//! category check in step 2 for workers). The sequence is modeled as a
//! saga — each step that can fail after the identity exists has one
//! defined compensating action, deleting that identity. The one state the
//! design cannot heal on its own is a failed compensation; that is
//! surfaced as the distinct orphaned-identity error class and logged under
//! the reconciliation target, never swallowed.

use crate::error::{ApiAuthError, RECONCILIATION_TARGET};
use crate::models::{RegisterRequest, RegisterRole};
use crate::services::resolver::ResolvedProfile;
use crate::services::store::ProfileStore;
use crate::services::validation::validate_password_complexity;
use fundi_core::{IdentityUid, ServiceId};
use fundi_db::{NewClient, NewWorker, ROLE_USER};
use fundi_identity::{IdentityError, IdentityProvider};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

/// Drives the two-step account creation sequence and its rollback.
pub struct RegistrationService {
    provider: Arc<dyn IdentityProvider>,
    store: Arc<dyn ProfileStore>,
}

impl RegistrationService {
    /// Create a new registration service.
    pub fn new(provider: Arc<dyn IdentityProvider>, store: Arc<dyn ProfileStore>) -> Self {
        Self { provider, store }
    }

    /// Register a new account: create the provider identity, then the
    /// profile row, compensating on partial failure.
    ///
    /// # Errors
    ///
    /// - `ApiAuthError::Validation` / `InvalidEmail` / `WeakPassword` —
    ///   rejected before any external call.
    /// - `ApiAuthError::EmailInUse` — the provider already holds the email;
    ///   terminal, nothing to roll back.
    /// - `ApiAuthError::InvalidCategory` — the category check failed; the
    ///   just-created identity was deleted.
    /// - `ApiAuthError::OrphanedIdentity` — profile creation failed and the
    ///   compensating delete failed too.
    pub async fn register(&self, request: RegisterRequest) -> Result<ResolvedProfile, ApiAuthError> {
        // Step 0: everything checkable without an external call.
        self.validate(&request)?;

        // Step 1: provider identity. An email conflict here is terminal —
        // no profile-store write has happened.
        let uid = self
            .provider
            .create_identity(&request.email, &request.password, &request.display_name())
            .await
            .map_err(ApiAuthError::from)?;

        info!(uid = %uid, role = ?request.role, "Provider identity created");

        match request.role {
            RegisterRole::Client => self.create_client_profile(uid, request).await,
            RegisterRole::Worker => self.create_worker_profile(uid, request).await,
        }
    }

    fn validate(&self, request: &RegisterRequest) -> Result<(), ApiAuthError> {
        request.validate().map_err(|e| {
            let messages: Vec<String> = e
                .field_errors()
                .values()
                .flat_map(|errors| {
                    errors
                        .iter()
                        .filter_map(|err| err.message.as_ref().map(ToString::to_string))
                })
                .collect();
            ApiAuthError::Validation(messages.join(", "))
        })?;

        validate_password_complexity(&request.password)?;

        if request.role == RegisterRole::Worker && request.category_id.is_none() {
            return Err(ApiAuthError::Validation(
                "category_id is required for workers".to_string(),
            ));
        }

        Ok(())
    }

    async fn create_client_profile(
        &self,
        uid: IdentityUid,
        request: RegisterRequest,
    ) -> Result<ResolvedProfile, ApiAuthError> {
        let new = NewClient {
            identity_uid: uid.clone(),
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            phone: request.phone,
            address: request.address,
            role: ROLE_USER.to_string(),
        };

        match self.store.create_client(new).await {
            Ok(client) => {
                info!(uid = %uid, client_id = %client.id, "Client profile created");
                Ok(ResolvedProfile::Client(client))
            }
            Err(e) => Err(self.abandon(uid, e.into()).await),
        }
    }

    async fn create_worker_profile(
        &self,
        uid: IdentityUid,
        request: RegisterRequest,
    ) -> Result<ResolvedProfile, ApiAuthError> {
        // Step 2: the category id is client-supplied and otherwise
        // unvalidated; check it before writing anything. An identity
        // already exists, so a missing category rolls it back.
        let category_id = ServiceId::from_uuid(
            request
                .category_id
                .expect("validated: workers carry a category id"),
        );

        let service = match self.store.find_service(category_id).await {
            Ok(Some(service)) => service,
            Ok(None) => {
                self.compensate(&uid).await;
                return Err(ApiAuthError::InvalidCategory);
            }
            Err(e) => return Err(self.abandon(uid, e.into()).await),
        };

        // Step 3: worker row plus association in one store transaction,
        // with the category name denormalized into the position label now.
        // Later category renames do not touch it.
        let new = NewWorker {
            identity_uid: uid.clone(),
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            phone: request.phone,
            address: request.address,
            bio: request.bio,
            service_id: category_id,
            position: service.name,
        };

        match self.store.create_worker(new).await {
            Ok(worker) => {
                info!(uid = %uid, worker_id = %worker.id, "Worker profile created");
                Ok(ResolvedProfile::Worker(worker))
            }
            Err(e) => Err(self.abandon(uid, e.into()).await),
        }
    }

    /// Run the compensating identity delete after a post-identity failure,
    /// escalating to the orphan error class when the compensation itself
    /// fails.
    ///
    /// Returns the error the caller should surface: the original cause
    /// when the identity was cleaned up, `OrphanedIdentity` when it was
    /// not.
    async fn abandon(&self, uid: IdentityUid, cause: ApiAuthError) -> ApiAuthError {
        if self.compensate(&uid).await {
            cause
        } else {
            ApiAuthError::OrphanedIdentity { uid }
        }
    }

    /// Delete the identity created in step 1. Returns whether the provider
    /// side is clean afterwards.
    async fn compensate(&self, uid: &IdentityUid) -> bool {
        match self.provider.delete_identity(uid).await {
            Ok(()) => {
                info!(uid = %uid, "Compensating identity delete completed");
                true
            }
            // Already gone: a concurrent cleanup beat us, the outcome is
            // what compensation wanted.
            Err(IdentityError::NotFound) => true,
            Err(e) => {
                tracing::error!(
                    target: RECONCILIATION_TARGET,
                    uid = %uid,
                    error = %e,
                    "Compensating identity delete failed; identity has no profile and must be reconciled out-of-band"
                );
                false
            }
        }
    }
}
