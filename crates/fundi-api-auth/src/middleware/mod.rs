//! Middleware for the authentication API.

pub mod token_auth;

pub use token_auth::{identity_auth_middleware, AuthenticatedIdentity};
