//! Core types shared across the fundi workspace.
//!
//! Provides strongly typed identifiers for the two stores the platform
//! spans: UUID-keyed rows in the relational profile store, and the opaque
//! identifier the external identity provider assigns to an account.

pub mod ids;

pub use ids::{ClientId, FeedbackId, IdentityUid, ParseIdError, ServiceId, WorkerId};
