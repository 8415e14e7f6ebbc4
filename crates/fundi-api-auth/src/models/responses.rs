//! Response models for the authentication API.
//!
//! Resolution returns a tagged union — `{"kind": "...", "data": {...}}` —
//! so callers pattern-match on the variant instead of duck-typing on which
//! fields happen to be present.

use chrono::{DateTime, Utc};
use fundi_db::{Client, Worker};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// A client profile as returned to callers.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClientProfile {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar_url: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<Client> for ClientProfile {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            email: client.email,
            first_name: client.first_name,
            last_name: client.last_name,
            phone: client.phone,
            address: client.address,
            avatar_url: client.avatar_url,
            role: client.role,
            created_at: client.created_at,
        }
    }
}

/// A worker profile as returned to callers.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WorkerProfile {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<String>,
    pub languages: Option<String>,
    pub age: Option<i32>,
    pub position: String,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Worker> for WorkerProfile {
    fn from(worker: Worker) -> Self {
        Self {
            id: worker.id,
            email: worker.email,
            first_name: worker.first_name,
            last_name: worker.last_name,
            phone: worker.phone,
            address: worker.address,
            avatar_url: worker.avatar_url,
            bio: worker.bio,
            skills: worker.skills,
            languages: worker.languages,
            age: worker.age,
            position: worker.position,
            is_available: worker.is_available,
            created_at: worker.created_at,
        }
    }
}

/// The tagged profile union returned by registration and resolution.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ProfileResponse {
    Client(ClientProfile),
    Worker(WorkerProfile),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_client() -> Client {
        Client {
            id: Uuid::new_v4(),
            identity_uid: "uid-1".to_string(),
            email: "jane@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            phone: None,
            address: None,
            avatar_url: None,
            role: "user".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_tagged_serialization_shape() {
        let response = ProfileResponse::Client(sample_client().into());
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["kind"], "client");
        assert_eq!(json["data"]["email"], "jane@example.com");
        // The provider uid never leaks into responses.
        assert!(json["data"].get("identity_uid").is_none());
    }
}
