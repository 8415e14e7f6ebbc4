//! Authentication API router configuration.
//!
//! Routes:
//! - POST /register - Create an account (no auth)
//! - GET /me - Resolve the caller's profile
//! - PUT /me - Partially update the caller's profile

use crate::handlers::{get_me_handler, register_handler, update_me_handler};
use crate::middleware::identity_auth_middleware;
use crate::services::{
    PgProfileStore, ProfileResolver, ProfileStore, RegistrationService, RetryPolicy,
};
use axum::{
    middleware,
    routing::{get, post},
    Extension, Router,
};
use fundi_identity::IdentityProvider;
use sqlx::PgPool;
use std::sync::Arc;

/// Application state for authentication routes.
#[derive(Clone)]
pub struct AuthState {
    /// Identity provider adapter, shared with the token middleware.
    pub provider: Arc<dyn IdentityProvider>,
    /// Registration orchestrator.
    pub registration: Arc<RegistrationService>,
    /// Identity resolver with its reconciliation retry policy.
    pub resolver: Arc<ProfileResolver>,
}

impl AuthState {
    /// Create state backed by the PostgreSQL profile store and the default
    /// retry policy.
    pub fn new(pool: PgPool, provider: Arc<dyn IdentityProvider>) -> Self {
        let store: Arc<dyn ProfileStore> = Arc::new(PgProfileStore::new(pool));
        Self::with_store(provider, store, RetryPolicy::default())
    }

    /// Create state over an explicit store and retry policy. Tests use this
    /// with the in-memory store and a zero-delay policy.
    pub fn with_store(
        provider: Arc<dyn IdentityProvider>,
        store: Arc<dyn ProfileStore>,
        retry: RetryPolicy,
    ) -> Self {
        let registration = Arc::new(RegistrationService::new(provider.clone(), store.clone()));
        let resolver = Arc::new(ProfileResolver::new(store, retry));
        Self {
            provider,
            registration,
            resolver,
        }
    }
}

/// Create the authentication router.
///
/// `/register` is public; the `/me` routes require a verified bearer
/// token.
pub fn auth_router(state: AuthState) -> Router {
    let me_routes = Router::new()
        .route("/me", get(get_me_handler).put(update_me_handler))
        .layer(middleware::from_fn(identity_auth_middleware));

    Router::new()
        .route("/register", post(register_handler))
        .merge(me_routes)
        .layer(Extension(state.provider))
        .layer(Extension(state.registration))
        .layer(Extension(state.resolver))
}
