//! Provider profile and its mapping onto the session record.

use serde::{Deserialize, Serialize};
use shared_types::{AuthProvider, UserSessionRecord};

/// A single email or photo entry of a provider profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileValue {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

impl ProfileValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            verified: None,
        }
    }
}

/// Normalized user profile returned by an identity provider after a
/// successful code exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderProfile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub emails: Vec<ProfileValue>,
    #[serde(default)]
    pub photos: Vec<ProfileValue>,
}

/// Map a Google profile onto the record stored in the session cookie.
pub fn map_profile(profile: &ProviderProfile) -> UserSessionRecord {
    UserSessionRecord {
        id: profile.id.clone(),
        email: profile.emails.first().map(|e| e.value.clone()),
        name: profile.display_name.clone().unwrap_or_default(),
        picture: profile
            .photos
            .first()
            .map(|p| p.value.clone())
            .unwrap_or_default(),
        provider: AuthProvider::Google,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_minimal_profile() {
        let profile: ProviderProfile = serde_json::from_value(serde_json::json!({
            "id": "42",
            "emails": [{ "value": "a@b.com" }],
            "displayName": "A"
        }))
        .unwrap();

        let record = map_profile(&profile);
        assert_eq!(
            record,
            UserSessionRecord {
                id: "42".to_string(),
                email: Some("a@b.com".to_string()),
                name: "A".to_string(),
                picture: String::new(),
                provider: AuthProvider::Google,
            }
        );
    }

    #[test]
    fn test_map_takes_first_email_and_photo() {
        let profile = ProviderProfile {
            id: "7".to_string(),
            display_name: Some("Ada".to_string()),
            emails: vec![ProfileValue::new("first@x.io"), ProfileValue::new("second@x.io")],
            photos: vec![ProfileValue::new("https://img/1"), ProfileValue::new("https://img/2")],
        };

        let record = map_profile(&profile);
        assert_eq!(record.email.as_deref(), Some("first@x.io"));
        assert_eq!(record.picture, "https://img/1");
        assert_eq!(record.name, "Ada");
    }

    #[test]
    fn test_map_bare_profile() {
        let profile = ProviderProfile {
            id: "x".to_string(),
            ..Default::default()
        };

        let record = map_profile(&profile);
        assert_eq!(record.email, None);
        assert_eq!(record.name, "");
        assert_eq!(record.picture, "");
        assert_eq!(record.provider, AuthProvider::Google);
    }
}
