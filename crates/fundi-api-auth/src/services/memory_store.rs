//! In-memory profile store for tests and local development.

use crate::services::store::{ClientUpdate, ProfileStore, WorkerUpdate};
use async_trait::async_trait;
use chrono::Utc;
use fundi_core::{IdentityUid, ServiceId};
use fundi_db::{Client, DbError, NewClient, NewWorker, Service, Worker, ROLE_USER};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

#[derive(Default)]
struct Inner {
    clients: HashMap<String, Client>,
    workers: HashMap<String, Worker>,
    services: HashMap<uuid::Uuid, Service>,
    associations: Vec<(uuid::Uuid, uuid::Uuid)>,
}

/// An in-memory [`ProfileStore`].
///
/// Two switches shape its behavior for tests:
///
/// - `fail_profile_creates` makes every profile insert fail, which drives
///   the orchestrator down its compensation path.
/// - `hide_reads(n)` makes the next `n` profile lookups report absence even
///   when the row exists, simulating the read-after-write lag the
///   reconciliation poller exists to absorb.
#[derive(Default)]
pub struct MemoryProfileStore {
    inner: Mutex<Inner>,
    fail_profile_creates: AtomicBool,
    hidden_reads: AtomicU32,
}

impl MemoryProfileStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a service category and return it.
    pub fn add_service(&self, name: &str) -> Service {
        let service = Service {
            id: uuid::Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.inner
            .lock()
            .expect("store lock poisoned")
            .services
            .insert(service.id, service.clone());
        service
    }

    /// Make subsequent profile inserts fail with `DbError::Unavailable`.
    pub fn fail_profile_creates(&self, fail: bool) {
        self.fail_profile_creates.store(fail, Ordering::SeqCst);
    }

    /// Hide the next `n` profile lookups, simulating propagation lag.
    pub fn hide_reads(&self, n: u32) {
        self.hidden_reads.store(n, Ordering::SeqCst);
    }

    /// Number of client rows currently stored.
    #[must_use]
    pub fn client_count(&self) -> usize {
        self.inner.lock().expect("store lock poisoned").clients.len()
    }

    /// Number of worker rows currently stored.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.inner.lock().expect("store lock poisoned").workers.len()
    }

    /// Number of association rows referencing the given service.
    #[must_use]
    pub fn association_count(&self, service_id: ServiceId) -> usize {
        self.inner
            .lock()
            .expect("store lock poisoned")
            .associations
            .iter()
            .filter(|(_, sid)| sid == service_id.as_uuid())
            .count()
    }

    /// Consume one hidden read if any are pending. Returns true when the
    /// current lookup should report absence.
    fn read_hidden(&self) -> bool {
        self.hidden_reads
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn find_service(&self, id: ServiceId) -> Result<Option<Service>, DbError> {
        let inner = self.inner.lock().expect("store lock poisoned");
        Ok(inner.services.get(id.as_uuid()).cloned())
    }

    async fn create_client(&self, new: NewClient) -> Result<Client, DbError> {
        if self.fail_profile_creates.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable("simulated outage".to_string()));
        }

        let now = Utc::now();
        let client = Client {
            id: uuid::Uuid::new_v4(),
            identity_uid: new.identity_uid.as_str().to_string(),
            email: new.email,
            first_name: new.first_name,
            last_name: new.last_name,
            phone: new.phone,
            address: new.address,
            avatar_url: None,
            role: if new.role.is_empty() {
                ROLE_USER.to_string()
            } else {
                new.role
            },
            created_at: now,
            updated_at: now,
        };

        self.inner
            .lock()
            .expect("store lock poisoned")
            .clients
            .insert(client.identity_uid.clone(), client.clone());
        Ok(client)
    }

    async fn create_worker(&self, new: NewWorker) -> Result<Worker, DbError> {
        if self.fail_profile_creates.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable("simulated outage".to_string()));
        }

        let now = Utc::now();
        let worker = Worker {
            id: uuid::Uuid::new_v4(),
            identity_uid: new.identity_uid.as_str().to_string(),
            email: new.email,
            first_name: new.first_name,
            last_name: new.last_name,
            phone: new.phone,
            address: new.address,
            avatar_url: None,
            bio: new.bio,
            skills: None,
            languages: None,
            age: None,
            position: new.position,
            is_available: true,
            created_at: now,
            updated_at: now,
        };

        let mut inner = self.inner.lock().expect("store lock poisoned");
        inner
            .associations
            .push((worker.id, *new.service_id.as_uuid()));
        inner
            .workers
            .insert(worker.identity_uid.clone(), worker.clone());
        Ok(worker)
    }

    async fn find_client(&self, uid: &IdentityUid) -> Result<Option<Client>, DbError> {
        if self.read_hidden() {
            return Ok(None);
        }
        let inner = self.inner.lock().expect("store lock poisoned");
        Ok(inner.clients.get(uid.as_str()).cloned())
    }

    async fn find_worker(&self, uid: &IdentityUid) -> Result<Option<Worker>, DbError> {
        if self.read_hidden() {
            return Ok(None);
        }
        let inner = self.inner.lock().expect("store lock poisoned");
        Ok(inner.workers.get(uid.as_str()).cloned())
    }

    async fn update_client(
        &self,
        uid: &IdentityUid,
        changes: ClientUpdate,
    ) -> Result<Option<Client>, DbError> {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        let Some(client) = inner.clients.get_mut(uid.as_str()) else {
            return Ok(None);
        };

        if let Some(v) = changes.first_name {
            client.first_name = v;
        }
        if let Some(v) = changes.last_name {
            client.last_name = v;
        }
        if let Some(v) = changes.phone {
            client.phone = Some(v);
        }
        if let Some(v) = changes.address {
            client.address = Some(v);
        }
        if let Some(v) = changes.avatar_url {
            client.avatar_url = Some(v);
        }
        client.updated_at = Utc::now();
        Ok(Some(client.clone()))
    }

    async fn update_worker(
        &self,
        uid: &IdentityUid,
        changes: WorkerUpdate,
    ) -> Result<Option<Worker>, DbError> {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        let Some(worker) = inner.workers.get_mut(uid.as_str()) else {
            return Ok(None);
        };

        if let Some(v) = changes.first_name {
            worker.first_name = v;
        }
        if let Some(v) = changes.last_name {
            worker.last_name = v;
        }
        if let Some(v) = changes.phone {
            worker.phone = Some(v);
        }
        if let Some(v) = changes.address {
            worker.address = Some(v);
        }
        if let Some(v) = changes.avatar_url {
            worker.avatar_url = Some(v);
        }
        if let Some(v) = changes.bio {
            worker.bio = Some(v);
        }
        if let Some(v) = changes.skills {
            worker.skills = Some(v);
        }
        if let Some(v) = changes.languages {
            worker.languages = Some(v);
        }
        if let Some(v) = changes.age {
            worker.age = Some(v);
        }
        if let Some(v) = changes.is_available {
            worker.is_available = v;
        }
        worker.updated_at = Utc::now();
        Ok(Some(worker.clone()))
    }
}
