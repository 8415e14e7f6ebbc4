//! The identity provider trait.

use crate::error::IdentityError;
use async_trait::async_trait;
use fundi_core::IdentityUid;

/// External identity provider: owns credentials, issues verifiable tokens.
///
/// Every method is a suspension point from the orchestrator's point of
/// view; implementations must be safe to call concurrently from stateless
/// request handlers.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create a provider-side account and return its uid.
    ///
    /// # Errors
    ///
    /// - [`IdentityError::EmailTaken`] if the email is already registered.
    /// - [`IdentityError::Provider`] for any other provider failure.
    async fn create_identity(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<IdentityUid, IdentityError>;

    /// Delete a provider-side account.
    ///
    /// Used both for explicit account removal and as the compensating
    /// action when profile creation fails after the identity was created.
    ///
    /// # Errors
    ///
    /// - [`IdentityError::NotFound`] if no such identity exists.
    /// - [`IdentityError::Provider`] for any other provider failure.
    async fn delete_identity(&self, uid: &IdentityUid) -> Result<(), IdentityError>;

    /// Verify a bearer token and return the uid it was issued for.
    ///
    /// # Errors
    ///
    /// - [`IdentityError::InvalidToken`] if the token fails verification.
    /// - [`IdentityError::Provider`] for any other provider failure.
    async fn verify_token(&self, token: &str) -> Result<IdentityUid, IdentityError>;

    /// Provider type name for logging and diagnostics.
    fn provider_type(&self) -> &'static str;
}
