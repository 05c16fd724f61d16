//! User domain models.
//!
//! [`User`] is the public representation: it never carries the password
//! hash, so it can be serialized into any response. The hash only travels
//! inside [`UserWithPassword`], which is read for login and nothing else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::ids::UserId;

/// Access level of a user. The first registered user is `Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    /// Role assigned at registration, given how many users already exist.
    pub const fn for_new_user(existing_users: i64) -> Self {
        if existing_users == 0 {
            Role::Admin
        } else {
            Role::User
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub location: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user row together with its bcrypt hash.
#[derive(FromRow, Debug, Clone)]
pub struct UserWithPassword {
    #[sqlx(flatten)]
    pub user: User,
    pub password: String,
}

/// Data needed to insert a user. The role is decided by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub location: String,
    pub password_hash: String,
}

/// Profile fields a user may change about themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub location: String,
}

/// Canonical form of an email address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_first_user_is_admin() {
        assert_eq!(Role::for_new_user(0), Role::Admin);
        assert_eq!(Role::for_new_user(1), Role::User);
        assert_eq!(Role::for_new_user(500), Role::User);
    }

    #[test]
    fn test_role_roundtrips_through_str() {
        for role in [Role::Admin, Role::User] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Jane.Doe@Example.COM "), "jane.doe@example.com");
    }

    #[test]
    fn test_user_json_is_camel_case_without_password() {
        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@example.com".into(),
            location: "Lisbon".into(),
            role: Role::Admin,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["lastName"], "Doe");
        assert_eq!(json["role"], "admin");
        assert!(json.get("password").is_none());
    }
}
