use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::database::models::User;

/// Public wire shape of a user record. The credential hash is not a field
/// here, so it cannot leak into any response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Convert a user record into the public wire format
pub fn user_to_api_value(user: &User) -> Value {
    serde_json::to_value(UserResponse::from(user)).unwrap_or(Value::Null)
}

/// Convert a list of records to API values
pub fn users_to_api_values(users: &[User]) -> Vec<Value> {
    users.iter().map(user_to_api_value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 1,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn wire_format_never_contains_the_credential_hash() {
        let value = user_to_api_value(&sample_user());

        assert_eq!(value["id"], 1);
        assert_eq!(value["email"], "alice@example.com");
        assert!(value.get("password_hash").is_none());
        assert!(value.get("secret").is_none());
    }
}
