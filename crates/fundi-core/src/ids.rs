//! Strongly typed identifiers.
//!
//! Newtype wrappers prevent accidental misuse of different ID types at
//! compile time: a `WorkerId` cannot be passed where a `ServiceId` is
//! expected, and the provider-owned `IdentityUid` can never be confused
//! with a profile-store row id — the two stores share no key space.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Error type for ID parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse.
    pub id_type: &'static str,
    /// The underlying parse error message.
    pub message: String,
}

impl Display for ParseIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse {}: {}", self.id_type, self.message)
    }
}

impl std::error::Error for ParseIdError {}

/// Macro to define a strongly-typed UUID-backed ID type.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random ID using UUID v4.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns a reference to the underlying UUID.
            #[must_use]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|e| ParseIdError {
                        id_type: stringify!($name),
                        message: e.to_string(),
                    })
            }
        }
    };
}

define_id!(
    /// Strongly typed identifier for client profiles.
    ClientId
);

define_id!(
    /// Strongly typed identifier for worker profiles.
    WorkerId
);

define_id!(
    /// Strongly typed identifier for service categories.
    ServiceId
);

define_id!(
    /// Strongly typed identifier for feedback records.
    FeedbackId
);

/// Opaque account identifier owned by the external identity provider.
///
/// Unlike the row IDs above this is not a UUID: the provider assigns it and
/// the profile store only carries it as a back reference. It is never
/// generated locally outside of mocks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityUid(String);

impl IdentityUid {
    /// Wrap a provider-assigned identifier.
    ///
    /// Returns `ParseIdError` if the value is empty — the provider never
    /// issues empty identifiers, so an empty value always signals a caller
    /// bug or a mangled request.
    pub fn new(uid: impl Into<String>) -> Result<Self, ParseIdError> {
        let uid = uid.into();
        if uid.is_empty() {
            return Err(ParseIdError {
                id_type: "IdentityUid",
                message: "identifier must not be empty".to_string(),
            });
        }
        Ok(Self(uid))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for IdentityUid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IdentityUid {
    type Err = ParseIdError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod uuid_id_tests {
        use super::*;

        #[test]
        fn test_new_creates_valid_id() {
            let id = WorkerId::new();
            let id_str = id.to_string();
            // UUID format: 8-4-4-4-12 hex digits
            assert_eq!(id_str.len(), 36);
            assert!(id_str.contains('-'));
        }

        #[test]
        fn test_from_uuid_preserves_value() {
            let uuid = Uuid::new_v4();
            let id = ServiceId::from_uuid(uuid);
            assert_eq!(id.as_uuid(), &uuid);
        }

        #[test]
        fn test_display_returns_uuid_string() {
            let uuid = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
            let id = ClientId::from_uuid(uuid);
            assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
        }

        #[test]
        fn test_parse_valid_uuid() {
            let id: FeedbackId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
            assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
        }

        #[test]
        fn test_parse_invalid_uuid_returns_error() {
            let result: std::result::Result<WorkerId, _> = "not-a-uuid".parse();
            assert!(result.is_err());
            let err = result.unwrap_err();
            assert_eq!(err.id_type, "WorkerId");
            assert!(!err.message.is_empty());
        }

        #[test]
        fn test_different_id_types_are_distinct() {
            // Compile-time property; the runtime assertion just keeps the
            // test body non-empty.
            let worker = WorkerId::new();
            let service = ServiceId::new();
            assert_ne!(worker.as_uuid(), service.as_uuid());
        }

        #[test]
        fn test_serializes_as_plain_string() {
            let uuid = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
            let id = WorkerId::from_uuid(uuid);
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, "\"550e8400-e29b-41d4-a716-446655440000\"");
        }

        #[test]
        fn test_serde_roundtrip() {
            let original = ClientId::new();
            let json = serde_json::to_string(&original).unwrap();
            let deserialized: ClientId = serde_json::from_str(&json).unwrap();
            assert_eq!(original, deserialized);
        }
    }

    mod identity_uid_tests {
        use super::*;

        #[test]
        fn test_accepts_opaque_provider_value() {
            let uid = IdentityUid::new("fb-aBc123XyZ").unwrap();
            assert_eq!(uid.as_str(), "fb-aBc123XyZ");
            assert_eq!(uid.to_string(), "fb-aBc123XyZ");
        }

        #[test]
        fn test_rejects_empty_value() {
            let err = IdentityUid::new("").unwrap_err();
            assert_eq!(err.id_type, "IdentityUid");
            assert!(err.to_string().contains("IdentityUid"));
        }

        #[test]
        fn test_from_str() {
            let uid: IdentityUid = "provider-uid-1".parse().unwrap();
            assert_eq!(uid.as_str(), "provider-uid-1");
        }

        #[test]
        fn test_serde_roundtrip_as_plain_string() {
            let uid = IdentityUid::new("abc").unwrap();
            let json = serde_json::to_string(&uid).unwrap();
            assert_eq!(json, "\"abc\"");
            let back: IdentityUid = serde_json::from_str(&json).unwrap();
            assert_eq!(uid, back);
        }

        #[test]
        fn test_usable_as_hashmap_key() {
            use std::collections::HashMap;
            let mut map: HashMap<IdentityUid, String> = HashMap::new();
            let uid = IdentityUid::new("k1").unwrap();
            map.insert(uid.clone(), "client".to_string());
            assert_eq!(map.get(&uid), Some(&"client".to_string()));
        }
    }
}
