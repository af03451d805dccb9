use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Role attached to a user by the backend.
///
/// Unknown roles are kept verbatim so a restored session serializes back to
/// exactly what was saved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    User,
    Admin,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Other(role) => role,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "user" => Self::User,
            "admin" => Self::Admin,
            _ => Self::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(role) => role,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User payload returned by the backend on login.
///
/// Only `id` and `role` are interpreted locally; every other profile field
/// is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: Value,
    pub role: Role,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl UserRef {
    /// Best available label for the navbar and dashboards.
    pub fn display_name(&self) -> String {
        ["name", "email", "phone"]
            .iter()
            .filter_map(|key| self.profile.get(*key).and_then(Value::as_str))
            .find(|value| !value.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| match &self.id {
                Value::String(id) => id.clone(),
                other => other.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_unknown_values() {
        let role: Role = serde_json::from_str(r#""manager""#).unwrap();
        assert_eq!(role, Role::Other("manager".to_string()));
        assert_eq!(serde_json::to_string(&role).unwrap(), r#""manager""#);

        let admin: Role = serde_json::from_str(r#""admin""#).unwrap();
        assert!(admin.is_admin());
    }

    #[test]
    fn test_user_ref_keeps_profile_fields() {
        let json = r#"{"id":"alice@example.com","role":"user","email":"alice@example.com","name":"alice","created_at":"2024-01-01T00:00:00"}"#;
        let user: UserRef = serde_json::from_str(json).unwrap();

        assert_eq!(user.role, Role::User);
        assert_eq!(user.display_name(), "alice");

        let back: Value = serde_json::to_value(&user).unwrap();
        let original: Value = serde_json::from_str(json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_user_ref_requires_role() {
        let result = serde_json::from_str::<UserRef>(r#"{"id":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let user: UserRef = serde_json::from_str(r#"{"id":"9876543210","role":"user","name":""}"#).unwrap();
        assert_eq!(user.display_name(), "9876543210");
    }
}
