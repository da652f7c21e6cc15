/// User model
///
/// A user account identified by a unique email address. Passwords are
/// stored as Argon2id hashes, never in plaintext, and the hash is skipped
/// when a user is serialized for the wire.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID (UUID v4), assigned at creation, immutable
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address, unique across all users; used as the login key
    pub email: String,

    /// Argon2id password hash, never exposed on the wire
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Display name
    pub name: String,

    /// Email address (uniqueness enforced at write time)
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("test@example.com"));
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("passwordHash"));
    }
}
