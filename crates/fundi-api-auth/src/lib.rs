//! Authentication and account orchestration endpoints for fundi.
//!
//! This crate owns the one genuinely delicate part of the platform: every
//! account spans two independently consistent stores (the external identity
//! provider and the relational profile store), and this crate drives the
//! non-atomic creation sequence between them, resolves verified tokens to
//! exactly one profile variant, and absorbs the read-after-write lag a
//! freshly created profile can exhibit.
//!
//! Endpoints:
//! - Registration (POST /auth/register)
//! - Resolve current profile (GET /auth/me)
//! - Update current profile (PUT /auth/me)

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod services;

pub use error::{ApiAuthError, ProblemDetails};
pub use middleware::{identity_auth_middleware, AuthenticatedIdentity};
pub use models::{
    ClientProfile, ProfileResponse, RegisterRequest, RegisterRole, UpdateProfileRequest,
    WorkerProfile,
};
pub use router::{auth_router, AuthState};
pub use services::{
    validate_password_complexity, ClientUpdate, MemoryProfileStore, PgProfileStore,
    ProfileResolver, ProfileStore, RegistrationService, ResolvedProfile, RetryPolicy, WorkerUpdate,
};
