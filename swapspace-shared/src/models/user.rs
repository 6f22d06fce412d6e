/// User model
///
/// Users own listings and authenticate with email + password. The stored
/// secret is an Argon2id PHC string and never leaves the process: anything
/// that crosses the API boundary goes through [`PublicUser`].
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id            TEXT PRIMARY KEY,
///     name          TEXT NOT NULL DEFAULT '',
///     email         TEXT NOT NULL,
///     password_hash TEXT NOT NULL,
///     location      TEXT NOT NULL DEFAULT '',
///     created_at    TIMESTAMPTZ NOT NULL,
///     updated_at    TIMESTAMPTZ NOT NULL
/// );
/// CREATE UNIQUE INDEX users_email_lower_idx ON users (lower(email));
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored user account
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: String,

    /// Display name, copied onto listings as `ownerName`
    pub name: String,

    /// Email address, unique case-insensitively
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    pub location: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new user
///
/// The password must already be hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub location: String,
}

impl CreateUser {
    /// Builds the full record for a freshly generated identifier
    pub fn into_user(self, id: String) -> User {
        let now = Utc::now();
        User {
            id,
            name: self.name,
            email: normalize_email(&self.email),
            password_hash: self.password_hash,
            location: self.location,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Profile changes; only `Some` fields are applied
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub location: Option<String>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.location.is_none()
    }
}

/// User as exposed over the API, without the password hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            location: user.location.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            location: user.location,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Canonical email form used for storage and lookups
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
