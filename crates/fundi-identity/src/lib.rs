//! Identity provider adapter for fundi.
//!
//! The identity provider is an external system that owns credentials and
//! issues verifiable tokens; this crate wraps it behind the
//! [`IdentityProvider`] trait so the rest of the workspace never talks to
//! its HTTP API directly.
//!
//! Two implementations ship here:
//!
//! - [`HttpIdentityProvider`] — the real adapter, speaking the provider's
//!   admin REST API over `reqwest`.
//! - [`MockIdentityProvider`] — an in-memory stand-in for tests and local
//!   development.

pub mod error;
pub mod http;
pub mod mock;
pub mod provider;

pub use error::IdentityError;
pub use http::{HttpIdentityProvider, HttpProviderConfig};
pub use mock::MockIdentityProvider;
pub use provider::IdentityProvider;
