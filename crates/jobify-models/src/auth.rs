//! Request and response bodies of the auth and user endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::users::User;

#[derive(Deserialize, Debug, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    #[schema(example = "Jane")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "Doe")]
    pub last_name: String,
    #[serde(default)]
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "Lisbon")]
    pub location: String,
    #[serde(default)]
    #[schema(example = "secret123", min_length = 8)]
    pub password: String,
}

#[derive(Deserialize, Clone, Default, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "secret123")]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Profile update. Password and role are not accepted here.
#[derive(Deserialize, Debug, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// `{msg, user}` returned by register and login.
#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct AuthUserResponse {
    pub msg: String,
    pub user: User,
}

#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct CurrentUserResponse {
    pub user: User,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
pub struct AppStats {
    pub users: i64,
    pub jobs: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let req: RegisterRequest = serde_json::from_str(r#"{"name":"Jane"}"#).unwrap();
        assert_eq!(req.name, "Jane");
        assert!(req.password.is_empty());
        assert!(req.last_name.is_empty());
    }

    #[test]
    fn test_register_uses_camel_case() {
        let req: RegisterRequest = serde_json::from_str(r#"{"lastName":"Doe"}"#).unwrap();
        assert_eq!(req.last_name, "Doe");
    }

    #[test]
    fn test_login_debug_redacts_password() {
        let req = LoginRequest {
            email: "jane@example.com".into(),
            password: "hunter22".into(),
        };
        let debug = format!("{:?}", req);
        assert!(!debug.contains("hunter22"));
    }
}
