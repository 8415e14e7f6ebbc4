//! In-memory identity provider for tests and local development.

use crate::error::IdentityError;
use crate::provider::IdentityProvider;
use async_trait::async_trait;
use fundi_core::IdentityUid;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone)]
struct MockAccount {
    uid: IdentityUid,
    email: String,
}

/// An in-memory [`IdentityProvider`].
///
/// Behaves like the real provider for the contract outcomes that matter to
/// the orchestration layer: duplicate emails are rejected, deleting an
/// unknown uid fails, and tokens are simply the uid they were "issued"
/// for. A failure switch lets tests simulate a provider outage, including
/// one that hits only the compensating delete.
#[derive(Default)]
pub struct MockIdentityProvider {
    accounts: Mutex<HashMap<String, MockAccount>>,
    fail_creates: AtomicBool,
    fail_deletes: AtomicBool,
}

impl MockIdentityProvider {
    /// Create an empty mock provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `create_identity` calls fail with a provider error.
    pub fn fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `delete_identity` calls fail with a provider error.
    ///
    /// This is the switch that exercises the orphaned-identity path: a
    /// profile write fails and the compensating delete fails too.
    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Number of accounts currently held by the provider.
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.accounts.lock().expect("mock lock poisoned").len()
    }

    /// Whether an account exists for the given email.
    #[must_use]
    pub fn has_email(&self, email: &str) -> bool {
        self.accounts
            .lock()
            .expect("mock lock poisoned")
            .values()
            .any(|a| a.email == email)
    }

    /// Whether an account exists for the given uid.
    #[must_use]
    pub fn has_uid(&self, uid: &IdentityUid) -> bool {
        self.accounts
            .lock()
            .expect("mock lock poisoned")
            .contains_key(uid.as_str())
    }

    /// A token that verifies to the given uid.
    #[must_use]
    pub fn token_for(uid: &IdentityUid) -> String {
        format!("token-{uid}")
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn create_identity(
        &self,
        email: &str,
        _password: &str,
        _display_name: &str,
    ) -> Result<IdentityUid, IdentityError> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(IdentityError::Provider("simulated outage".to_string()));
        }

        let mut accounts = self.accounts.lock().expect("mock lock poisoned");
        if accounts.values().any(|a| a.email == email) {
            return Err(IdentityError::EmailTaken);
        }

        let uid = IdentityUid::new(format!("mock-{}", uuid::Uuid::new_v4()))
            .expect("generated uid is non-empty");
        accounts.insert(
            uid.as_str().to_string(),
            MockAccount {
                uid: uid.clone(),
                email: email.to_string(),
            },
        );
        Ok(uid)
    }

    async fn delete_identity(&self, uid: &IdentityUid) -> Result<(), IdentityError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(IdentityError::Provider("simulated outage".to_string()));
        }

        let mut accounts = self.accounts.lock().expect("mock lock poisoned");
        accounts
            .remove(uid.as_str())
            .map(|_| ())
            .ok_or(IdentityError::NotFound)
    }

    async fn verify_token(&self, token: &str) -> Result<IdentityUid, IdentityError> {
        let uid_str = token
            .strip_prefix("token-")
            .ok_or(IdentityError::InvalidToken)?;

        let accounts = self.accounts.lock().expect("mock lock poisoned");
        accounts
            .get(uid_str)
            .map(|a| a.uid.clone())
            .ok_or(IdentityError::InvalidToken)
    }

    fn provider_type(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_verify_roundtrip() {
        let provider = MockIdentityProvider::new();
        let uid = provider
            .create_identity("jane@example.com", "Passw0rd", "Jane Doe")
            .await
            .unwrap();

        let token = MockIdentityProvider::token_for(&uid);
        let verified = provider.verify_token(&token).await.unwrap();
        assert_eq!(verified, uid);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let provider = MockIdentityProvider::new();
        provider
            .create_identity("jane@example.com", "Passw0rd", "Jane")
            .await
            .unwrap();

        let err = provider
            .create_identity("jane@example.com", "Other1pw", "Janet")
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::EmailTaken));
        assert_eq!(provider.account_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_unknown_uid_fails() {
        let provider = MockIdentityProvider::new();
        let uid = IdentityUid::new("mock-missing").unwrap();
        let err = provider.delete_identity(&uid).await.unwrap_err();
        assert!(matches!(err, IdentityError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_removes_account() {
        let provider = MockIdentityProvider::new();
        let uid = provider
            .create_identity("jane@example.com", "Passw0rd", "Jane")
            .await
            .unwrap();

        provider.delete_identity(&uid).await.unwrap();
        assert!(!provider.has_uid(&uid));
        assert!(!provider.has_email("jane@example.com"));
    }

    #[tokio::test]
    async fn test_verify_rejects_garbage_token() {
        let provider = MockIdentityProvider::new();
        let err = provider.verify_token("not-a-token").await.unwrap_err();
        assert!(matches!(err, IdentityError::InvalidToken));
    }

    #[tokio::test]
    async fn test_verify_rejects_token_for_deleted_account() {
        let provider = MockIdentityProvider::new();
        let uid = provider
            .create_identity("jane@example.com", "Passw0rd", "Jane")
            .await
            .unwrap();
        let token = MockIdentityProvider::token_for(&uid);
        provider.delete_identity(&uid).await.unwrap();

        let err = provider.verify_token(&token).await.unwrap_err();
        assert!(matches!(err, IdentityError::InvalidToken));
    }

    #[tokio::test]
    async fn test_failure_switches() {
        let provider = MockIdentityProvider::new();
        provider.fail_creates(true);
        let err = provider
            .create_identity("jane@example.com", "Passw0rd", "Jane")
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::Provider(_)));

        provider.fail_creates(false);
        let uid = provider
            .create_identity("jane@example.com", "Passw0rd", "Jane")
            .await
            .unwrap();

        provider.fail_deletes(true);
        let err = provider.delete_identity(&uid).await.unwrap_err();
        assert!(matches!(err, IdentityError::Provider(_)));
        // The account survives the failed delete.
        assert!(provider.has_uid(&uid));
    }
}
