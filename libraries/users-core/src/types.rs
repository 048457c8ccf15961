/// User domain types
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned user identifier
pub type UserId = i64;

/// Persisted user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique, immutable identifier
    pub id: UserId,

    /// Display name (trimmed)
    pub name: String,

    /// Email address (trimmed, lowercase, unique)
    pub email: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Raw create/update payload as received from a client.
///
/// Both fields are optional so that missing fields are reported as
/// validation errors instead of deserialization failures. `nome` is accepted
/// as an alias of `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    #[serde(default, alias = "nome")]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
}

impl UserInput {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }
}

/// Validated and normalized user fields, ready to be written to a store.
///
/// Only `validation::validate` builds these from client input, so a store
/// can rely on `name` being trimmed and `email` being trimmed and lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserFields {
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_accepts_nome_alias() {
        let input: UserInput =
            serde_json::from_str(r#"{"nome":"Ana","email":"ana@x.com"}"#).unwrap();
        assert_eq!(input.name.as_deref(), Some("Ana"));
        assert_eq!(input.email.as_deref(), Some("ana@x.com"));
    }

    #[test]
    fn test_input_missing_fields_are_none() {
        let input: UserInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input, UserInput::default());
    }

    #[test]
    fn test_user_serializes_rfc3339_timestamps() {
        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let user = User {
            id: 7,
            name: "Ana".into(),
            email: "ana@x.com".into(),
            created_at: at,
            updated_at: at,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["created_at"], "2023-11-14T22:13:20Z");
    }
}
