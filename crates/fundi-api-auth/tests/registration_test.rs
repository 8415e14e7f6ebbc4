//! Integration tests for the registration saga.
//!
//! Exercised against the in-memory profile store and mock identity
//! provider so every partial-failure path is reachable: category rollback,
//! profile-write rollback, and the orphaned-identity state where the
//! compensating delete itself fails.

use std::sync::Arc;

use fundi_api_auth::{
    ApiAuthError, MemoryProfileStore, RegisterRequest, RegisterRole, RegistrationService,
    ResolvedProfile,
};
use fundi_db::ROLE_USER;
use fundi_identity::MockIdentityProvider;
use uuid::Uuid;

struct Harness {
    provider: Arc<MockIdentityProvider>,
    store: Arc<MemoryProfileStore>,
    service: RegistrationService,
}

fn harness() -> Harness {
    let provider = Arc::new(MockIdentityProvider::new());
    let store = Arc::new(MemoryProfileStore::new());
    let service = RegistrationService::new(provider.clone(), store.clone());
    Harness {
        provider,
        store,
        service,
    }
}

fn client_request(email: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.to_string(),
        password: "Passw0rd1".to_string(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        phone: Some("555-0100".to_string()),
        address: None,
        bio: None,
        role: RegisterRole::Client,
        category_id: None,
    }
}

fn worker_request(email: &str, category_id: Uuid) -> RegisterRequest {
    RegisterRequest {
        email: email.to_string(),
        password: "Passw0rd1".to_string(),
        first_name: "Bob".to_string(),
        last_name: "Mason".to_string(),
        phone: None,
        address: Some("12 Main St".to_string()),
        bio: Some("Twenty years on the job".to_string()),
        role: RegisterRole::Worker,
        category_id: Some(category_id),
    }
}

// ── Success paths ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_client_registration_creates_identity_and_profile() {
    let h = harness();

    let profile = h.service.register(client_request("jane@example.com")).await.unwrap();

    let ResolvedProfile::Client(client) = profile else {
        panic!("expected a client profile");
    };
    assert_eq!(client.email, "jane@example.com");
    assert_eq!(client.role, ROLE_USER);
    assert!(h.provider.has_uid(&client.identity_uid.parse().unwrap()));

    // Exactly one profile row exists, and it matches the requested role.
    assert_eq!(h.store.client_count(), 1);
    assert_eq!(h.store.worker_count(), 0);
}

#[tokio::test]
async fn test_worker_registration_creates_association_and_denormalizes_position() {
    let h = harness();
    let plumbing = h.store.add_service("plumbing");

    let profile = h
        .service
        .register(worker_request("bob@example.com", plumbing.id))
        .await
        .unwrap();

    let ResolvedProfile::Worker(worker) = profile else {
        panic!("expected a worker profile");
    };
    // The category's display name was copied into the position label.
    assert_eq!(worker.position, "plumbing");
    assert!(worker.is_available);
    assert_eq!(h.store.worker_count(), 1);
    assert_eq!(h.store.client_count(), 0);
    assert_eq!(h.store.association_count(plumbing.service_id()), 1);
}

// ── Validation: rejected before any external call ───────────────────────

#[tokio::test]
async fn test_invalid_email_rejected_before_provider_call() {
    let h = harness();
    let mut request = client_request("not-an-email");
    request.email = "not-an-email".to_string();

    let err = h.service.register(request).await.unwrap_err();
    assert!(matches!(err, ApiAuthError::Validation(_)));
    assert_eq!(h.provider.account_count(), 0);
}

#[tokio::test]
async fn test_weak_password_rejected_before_provider_call() {
    let h = harness();
    let mut request = client_request("jane@example.com");
    request.password = "weak".to_string();

    let err = h.service.register(request).await.unwrap_err();
    assert!(matches!(err, ApiAuthError::WeakPassword(_)));
    assert_eq!(h.provider.account_count(), 0);
}

#[tokio::test]
async fn test_worker_without_category_rejected_before_provider_call() {
    let h = harness();
    let mut request = worker_request("bob@example.com", Uuid::new_v4());
    request.category_id = None;

    let err = h.service.register(request).await.unwrap_err();
    assert!(matches!(err, ApiAuthError::Validation(_)));
    assert_eq!(h.provider.account_count(), 0);
}

// ── Provider conflict: terminal, no compensation needed ─────────────────

#[tokio::test]
async fn test_duplicate_email_fails_with_conflict_and_single_profile() {
    let h = harness();

    h.service.register(client_request("jane@example.com")).await.unwrap();
    let err = h
        .service
        .register(client_request("jane@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiAuthError::EmailInUse));
    // Exactly one identity and one profile exist.
    assert_eq!(h.provider.account_count(), 1);
    assert_eq!(h.store.client_count(), 1);
}

// ── Referential failure: compensation removes the identity ──────────────

#[tokio::test]
async fn test_unknown_category_compensates_identity() {
    let h = harness();

    let err = h
        .service
        .register(worker_request("bob@example.com", Uuid::new_v4()))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiAuthError::InvalidCategory));
    // The just-created identity was deleted: a subsequent lookup of the
    // email at the provider finds nothing.
    assert!(!h.provider.has_email("bob@example.com"));
    assert_eq!(h.provider.account_count(), 0);
    assert_eq!(h.store.worker_count(), 0);
}

// ── Profile-write failure: compensation, then the orphan class ──────────

#[tokio::test]
async fn test_profile_write_failure_compensates_identity() {
    let h = harness();
    h.store.fail_profile_creates(true);

    let err = h
        .service
        .register(client_request("jane@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiAuthError::Database(_)));
    assert_eq!(h.provider.account_count(), 0);
    assert_eq!(h.store.client_count(), 0);
}

#[tokio::test]
async fn test_worker_profile_write_failure_compensates_identity() {
    let h = harness();
    let plumbing = h.store.add_service("plumbing");
    h.store.fail_profile_creates(true);

    let err = h
        .service
        .register(worker_request("bob@example.com", plumbing.id))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiAuthError::Database(_)));
    assert_eq!(h.provider.account_count(), 0);
    assert_eq!(h.store.association_count(plumbing.service_id()), 0);
}

#[tokio::test]
async fn test_failed_compensation_surfaces_orphaned_identity() {
    let h = harness();
    h.store.fail_profile_creates(true);
    h.provider.fail_deletes(true);

    let err = h
        .service
        .register(client_request("jane@example.com"))
        .await
        .unwrap_err();

    let ApiAuthError::OrphanedIdentity { uid } = err else {
        panic!("expected OrphanedIdentity, got: {err:?}");
    };
    // The identity is still there with no profile: the one state the
    // design cannot heal automatically.
    assert!(h.provider.has_uid(&uid));
    assert_eq!(h.store.client_count(), 0);
}

#[tokio::test]
async fn test_registration_can_be_retried_after_compensation() {
    let h = harness();

    // First attempt fails at the profile store, compensation runs.
    h.store.fail_profile_creates(true);
    let err = h
        .service
        .register(client_request("jane@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiAuthError::Database(_)));

    // The email is free again, so a retry succeeds cleanly: the server-side
    // compensation is what makes the sequence safely abandonable.
    h.store.fail_profile_creates(false);
    h.service.register(client_request("jane@example.com")).await.unwrap();

    assert_eq!(h.provider.account_count(), 1);
    assert_eq!(h.store.client_count(), 1);
}
