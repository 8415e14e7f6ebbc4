//! Error taxonomy for identity provider operations.

use thiserror::Error;

/// Errors returned by an [`crate::IdentityProvider`].
///
/// The first three variants are contract outcomes the orchestration layer
/// branches on; `Provider` covers everything else (network trouble, 5xx
/// responses, malformed payloads) and is never shown to end users verbatim.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The email is already registered with the provider.
    ///
    /// Terminal for registration: the provider is the single source of
    /// truth for email uniqueness, and no profile-store write has happened
    /// yet when this surfaces.
    #[error("Email already registered")]
    EmailTaken,

    /// No identity exists for the given uid.
    #[error("Identity not found")]
    NotFound,

    /// The presented token failed verification.
    #[error("Invalid token")]
    InvalidToken,

    /// Any other provider-side failure.
    #[error("Identity provider error: {0}")]
    Provider(String),
}

impl IdentityError {
    /// Whether this error is a definitive contract outcome (as opposed to
    /// transient provider trouble).
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            IdentityError::EmailTaken | IdentityError::NotFound | IdentityError::InvalidToken
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(IdentityError::EmailTaken.to_string(), "Email already registered");
        assert_eq!(IdentityError::NotFound.to_string(), "Identity not found");
        assert_eq!(IdentityError::InvalidToken.to_string(), "Invalid token");
        assert_eq!(
            IdentityError::Provider("boom".to_string()).to_string(),
            "Identity provider error: boom"
        );
    }

    #[test]
    fn test_is_terminal() {
        assert!(IdentityError::EmailTaken.is_terminal());
        assert!(IdentityError::NotFound.is_terminal());
        assert!(IdentityError::InvalidToken.is_terminal());
        assert!(!IdentityError::Provider("timeout".to_string()).is_terminal());
    }
}
