//! JWT claim structure of the session token.

use jobify_models::{Role, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims embedded in a session token.
///
/// They carry everything the ownership guard needs, so protected routes
/// never look the caller up in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub user_id: UserId,
    pub role: Role,
    /// Issued-at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
