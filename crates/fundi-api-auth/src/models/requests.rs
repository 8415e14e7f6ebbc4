//! Request models for the authentication API.

use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Which profile variant a registration creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RegisterRole {
    /// A client browsing and rating workers.
    Client,
    /// A service professional listed in the catalog.
    Worker,
}

/// Registration request.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Account email; must be unique with the identity provider.
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,

    /// Account password; complexity is checked separately.
    pub password: String,

    /// First name.
    #[validate(length(min = 1, message = "first_name is required"))]
    pub first_name: String,

    /// Last name.
    #[validate(length(min = 1, message = "last_name is required"))]
    pub last_name: String,

    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,

    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,

    /// Free-text self description (workers only).
    #[serde(default)]
    pub bio: Option<String>,

    /// Requested profile variant.
    pub role: RegisterRole,

    /// Service category id; required when `role` is `worker`. The value is
    /// client-supplied and otherwise unvalidated, so the orchestrator
    /// checks it against the catalog before any profile write.
    #[serde(default)]
    pub category_id: Option<Uuid>,
}

impl RegisterRequest {
    /// Display name sent to the identity provider.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Partial profile update.
///
/// Every field is optional: an omitted field keeps its stored value. The
/// worker-only fields are ignored for client profiles.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub avatar_url: Option<String>,

    // Worker-only fields.
    #[serde(default)]
    pub bio: Option<String>,

    #[serde(default)]
    pub skills: Option<String>,

    #[serde(default)]
    pub languages: Option<String>,

    #[serde(default)]
    pub age: Option<i32>,

    #[serde(default)]
    pub is_available: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> RegisterRequest {
        RegisterRequest {
            email: "jane@example.com".to_string(),
            password: "Passw0rd1".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            phone: None,
            address: None,
            bio: None,
            role: RegisterRole::Client,
            category_id: None,
        }
    }

    #[test]
    fn test_valid_request_passes_derive_validation() {
        assert!(base_request().validate().is_ok());
    }

    #[test]
    fn test_bad_email_fails_derive_validation() {
        let mut request = base_request();
        request.email = "not-an-email".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_empty_name_fails_derive_validation() {
        let mut request = base_request();
        request.first_name = String::new();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(base_request().display_name(), "Jane Doe");
    }

    #[test]
    fn test_role_deserializes_snake_case() {
        let role: RegisterRole = serde_json::from_str("\"worker\"").unwrap();
        assert_eq!(role, RegisterRole::Worker);
        let role: RegisterRole = serde_json::from_str("\"client\"").unwrap();
        assert_eq!(role, RegisterRole::Client);
    }

    #[test]
    fn test_update_request_defaults_to_all_none() {
        let update: UpdateProfileRequest = serde_json::from_str("{}").unwrap();
        assert!(update.first_name.is_none());
        assert!(update.age.is_none());
        assert!(update.is_available.is_none());
    }
}
