//! Integration tests for identity resolution and the reconciliation
//! retry policy.

use std::sync::Arc;

use fundi_api_auth::{
    MemoryProfileStore, ProfileResolver, RegisterRequest, RegisterRole, RegistrationService,
    ResolvedProfile, RetryPolicy, UpdateProfileRequest,
};
use fundi_core::IdentityUid;
use fundi_identity::MockIdentityProvider;

fn resolver_with(store: Arc<MemoryProfileStore>, retries: u32) -> ProfileResolver {
    ProfileResolver::new(store, RetryPolicy::immediate(retries))
}

async fn register_client(
    provider: &Arc<MockIdentityProvider>,
    store: &Arc<MemoryProfileStore>,
    email: &str,
) -> IdentityUid {
    let service = RegistrationService::new(provider.clone(), store.clone());
    let profile = service
        .register(RegisterRequest {
            email: email.to_string(),
            password: "Passw0rd1".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            phone: None,
            address: None,
            bio: None,
            role: RegisterRole::Client,
            category_id: None,
        })
        .await
        .unwrap();
    match profile {
        ResolvedProfile::Client(client) => client.identity_uid.parse().unwrap(),
        ResolvedProfile::Worker(_) => panic!("expected a client"),
    }
}

async fn register_worker(
    provider: &Arc<MockIdentityProvider>,
    store: &Arc<MemoryProfileStore>,
    email: &str,
) -> IdentityUid {
    let category = store.add_service("carpentry");
    let service = RegistrationService::new(provider.clone(), store.clone());
    let profile = service
        .register(RegisterRequest {
            email: email.to_string(),
            password: "Passw0rd1".to_string(),
            first_name: "Bob".to_string(),
            last_name: "Mason".to_string(),
            phone: None,
            address: None,
            bio: None,
            role: RegisterRole::Worker,
            category_id: Some(category.id),
        })
        .await
        .unwrap();
    match profile {
        ResolvedProfile::Worker(worker) => worker.identity_uid.parse().unwrap(),
        ResolvedProfile::Client(_) => panic!("expected a worker"),
    }
}

// ── Resolution returns the tagged variant ───────────────────────────────

#[tokio::test]
async fn test_resolves_client_variant() {
    let provider = Arc::new(MockIdentityProvider::new());
    let store = Arc::new(MemoryProfileStore::new());
    let uid = register_client(&provider, &store, "jane@example.com").await;

    let resolved = resolver_with(store, 0).resolve(&uid).await.unwrap();
    assert!(matches!(resolved, Some(ResolvedProfile::Client(_))));
}

#[tokio::test]
async fn test_resolves_worker_variant() {
    let provider = Arc::new(MockIdentityProvider::new());
    let store = Arc::new(MemoryProfileStore::new());
    let uid = register_worker(&provider, &store, "bob@example.com").await;

    let resolved = resolver_with(store, 0).resolve(&uid).await.unwrap();
    let Some(ResolvedProfile::Worker(worker)) = resolved else {
        panic!("expected a worker");
    };
    assert_eq!(worker.position, "carpentry");
}

#[tokio::test]
async fn test_unknown_identity_resolves_to_none() {
    let store = Arc::new(MemoryProfileStore::new());
    let uid = IdentityUid::new("mock-unknown").unwrap();

    let resolved = resolver_with(store, 2).resolve(&uid).await.unwrap();
    assert!(resolved.is_none());
}

// ── Propagation lag is absorbed by the retry budget ─────────────────────

#[tokio::test]
async fn test_lagging_profile_resolves_within_retry_budget() {
    let provider = Arc::new(MockIdentityProvider::new());
    let store = Arc::new(MemoryProfileStore::new());
    let uid = register_worker(&provider, &store, "bob@example.com").await;

    // The first internal attempts observe "not found" (each resolution
    // attempt reads both tables), then the write becomes visible. The
    // caller sees success with added latency, not an error.
    store.hide_reads(4);

    let resolved = resolver_with(store, 5).resolve(&uid).await.unwrap();
    assert!(matches!(resolved, Some(ResolvedProfile::Worker(_))));
}

#[tokio::test]
async fn test_lag_beyond_budget_reports_absence() {
    let provider = Arc::new(MockIdentityProvider::new());
    let store = Arc::new(MemoryProfileStore::new());
    let uid = register_client(&provider, &store, "jane@example.com").await;

    // More hidden reads than the budget can absorb.
    store.hide_reads(100);

    let resolved = resolver_with(store.clone(), 3).resolve(&uid).await.unwrap();
    assert!(resolved.is_none());

    // The absence was lag, not loss: once visibility returns the profile
    // resolves normally.
    store.hide_reads(0);
    let resolved = resolver_with(store, 0).resolve(&uid).await.unwrap();
    assert!(matches!(resolved, Some(ResolvedProfile::Client(_))));
}

// ── Partial updates branch per variant ──────────────────────────────────

#[tokio::test]
async fn test_client_update_keeps_omitted_fields() {
    let provider = Arc::new(MockIdentityProvider::new());
    let store = Arc::new(MemoryProfileStore::new());
    let uid = register_client(&provider, &store, "jane@example.com").await;
    let resolver = resolver_with(store, 0);

    let updated = resolver
        .update(
            &uid,
            UpdateProfileRequest {
                phone: Some("555-0199".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let Some(ResolvedProfile::Client(client)) = updated else {
        panic!("expected a client");
    };
    assert_eq!(client.phone.as_deref(), Some("555-0199"));
    // Omitted fields keep their stored values.
    assert_eq!(client.first_name, "Jane");
    assert_eq!(client.last_name, "Doe");
}

#[tokio::test]
async fn test_client_update_ignores_worker_only_fields() {
    let provider = Arc::new(MockIdentityProvider::new());
    let store = Arc::new(MemoryProfileStore::new());
    let uid = register_client(&provider, &store, "jane@example.com").await;
    let resolver = resolver_with(store, 0);

    let updated = resolver
        .update(
            &uid,
            UpdateProfileRequest {
                bio: Some("ignored".to_string()),
                age: Some(33),
                is_available: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Still a client; the worker-only fields had nowhere to land.
    assert!(matches!(updated, Some(ResolvedProfile::Client(_))));
}

#[tokio::test]
async fn test_worker_update_accepts_extended_fields() {
    let provider = Arc::new(MockIdentityProvider::new());
    let store = Arc::new(MemoryProfileStore::new());
    let uid = register_worker(&provider, &store, "bob@example.com").await;
    let resolver = resolver_with(store, 0);

    let updated = resolver
        .update(
            &uid,
            UpdateProfileRequest {
                bio: Some("Cabinets a specialty".to_string()),
                skills: Some("framing, joinery".to_string()),
                languages: Some("en, sw".to_string()),
                age: Some(41),
                is_available: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let Some(ResolvedProfile::Worker(worker)) = updated else {
        panic!("expected a worker");
    };
    assert_eq!(worker.bio.as_deref(), Some("Cabinets a specialty"));
    assert_eq!(worker.skills.as_deref(), Some("framing, joinery"));
    assert_eq!(worker.age, Some(41));
    assert!(!worker.is_available);
    // Untouched fields survive.
    assert_eq!(worker.first_name, "Bob");
    assert_eq!(worker.position, "carpentry");
}

#[tokio::test]
async fn test_update_for_unknown_identity_is_none() {
    let store = Arc::new(MemoryProfileStore::new());
    let resolver = resolver_with(store, 0);
    let uid = IdentityUid::new("mock-unknown").unwrap();

    let updated = resolver
        .update(&uid, UpdateProfileRequest::default())
        .await
        .unwrap();
    assert!(updated.is_none());
}
