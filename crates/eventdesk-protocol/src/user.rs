//! The signed-in user's profile and login credentials.

use serde::{Deserialize, Serialize};

use crate::{Extra, ResourceId};

/// Profile of an organizer or admin account.
///
/// `role` drives capability checks such as "is admin", but the client
/// treats it as an opaque label: the backend decides which roles exist.
///
/// Everything except `id` is optional, because the login, register and
/// profile endpoints don't all send the same fields. Unknown fields are
/// kept in `extra`, so a profile written to the session store and read
/// back is identical to the one the server sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct UserProfile {
    /// The account id. The backend sends `_id`, `id` or both; `_id` wins
    /// when they differ, and `id` is written back.
    pub id: ResourceId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(flatten)]
    pub extra: Extra,
}

impl UserProfile {
    /// Creates a profile with only an id and a role.
    pub fn new(id: impl Into<ResourceId>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: None,
            last_name: None,
            email: None,
            role: Some(role.into()),
            extra: Extra::new(),
        }
    }

    /// `true` if the profile's role equals `role` exactly.
    pub fn has_role(&self, role: &str) -> bool {
        self.role.as_deref() == Some(role)
    }

    /// "First Last", falling back to whichever part exists, then email.
    pub fn display_name(&self) -> Option<String> {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(name), None) | (None, Some(name)) => Some(name.to_string()),
            (None, None) => self.email.clone(),
        }
    }
}

serde_with_id!(UserProfile, "id");

/// Body of a login request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_accepts_underscore_id() {
        let user: UserProfile =
            serde_json::from_str(r#"{"_id":"1","role":"organizer"}"#).unwrap();

        assert_eq!(user.id, "1");
        assert_eq!(user.role.as_deref(), Some("organizer"));
        assert!(user.extra.is_empty());
    }

    #[test]
    fn test_decode_with_both_id_keys_prefers_underscore_id() {
        let same: UserProfile =
            serde_json::from_str(r#"{"_id":"1","id":"1","role":"admin"}"#)
                .unwrap();
        let differ: UserProfile =
            serde_json::from_str(r#"{"id":"stale","_id":"1"}"#).unwrap();

        assert_eq!(same.id, "1");
        assert!(same.extra.is_empty());
        assert_eq!(differ.id, "1");
    }

    #[test]
    fn test_encode_then_decode_with_underscore_id() {
        let user: UserProfile =
            serde_json::from_str(r#"{"_id":"1","firstName":"Ada"}"#).unwrap();

        let back = serde_json::to_value(&user).unwrap();

        assert_eq!(back, serde_json::json!({ "id": "1", "firstName": "Ada" }));
    }

    #[test]
    fn test_decode_keeps_unknown_fields() {
        let json = r#"{
            "id": "7",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "role": "admin",
            "organization": "Analytical Engines"
        }"#;

        let user: UserProfile = serde_json::from_str(json).unwrap();

        assert_eq!(user.first_name.as_deref(), Some("Ada"));
        assert_eq!(user.extra["organization"], "Analytical Engines");

        // Encoding writes the extra field back at the top level.
        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["organization"], "Analytical Engines");
        assert_eq!(back["firstName"], "Ada");
    }

    #[test]
    fn test_encode_omits_missing_optional_fields() {
        let user = UserProfile::new("1", "organizer");

        let back = serde_json::to_value(&user).unwrap();

        assert_eq!(back, serde_json::json!({ "id": "1", "role": "organizer" }));
    }

    #[test]
    fn test_has_role_is_exact_match() {
        let user = UserProfile::new("1", "admin");
        assert!(user.has_role("admin"));
        assert!(!user.has_role("Admin"));
        assert!(!user.has_role("organizer"));
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut user = UserProfile::new("1", "organizer");
        assert_eq!(user.display_name(), None);

        user.email = Some("ada@example.com".into());
        assert_eq!(user.display_name().as_deref(), Some("ada@example.com"));

        user.first_name = Some("Ada".into());
        assert_eq!(user.display_name().as_deref(), Some("Ada"));

        user.last_name = Some("Lovelace".into());
        assert_eq!(user.display_name().as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn test_credentials_encode_shape() {
        let creds = Credentials::new("ada@example.com", "hunter2");
        let json = serde_json::to_value(&creds).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "email": "ada@example.com", "password": "hunter2" })
        );
    }
}
