use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;

use jobify_auth::{INVALID_SESSION_MESSAGE, SessionClaims};
use jobify_core::AppError;
use jobify_models::{Role, UserId};

use crate::state::AppState;

/// Extractor that verifies the session cookie and provides the caller's
/// claims.
///
/// A missing cookie, the logged-out placeholder, a bad signature and an
/// expired token all reject with the same 401.
#[derive(Debug, Clone)]
pub struct AuthUser(pub SessionClaims);

impl AuthUser {
    pub fn user_id(&self) -> UserId {
        self.0.user_id
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_admin()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(&state.session_cookie.name)
            .map(|cookie| cookie.value().to_owned())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::unauthenticated(INVALID_SESSION_MESSAGE))?;

        let claims = state.tokens.verify(&token)?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: Role) -> SessionClaims {
        SessionClaims {
            user_id: UserId::new(),
            role,
            iat: 1_700_000_000,
            exp: 9_999_999_999,
        }
    }

    #[test]
    fn test_accessors() {
        let admin = AuthUser(claims(Role::Admin));
        assert!(admin.is_admin());
        assert_eq!(admin.role(), Role::Admin);
        assert_eq!(admin.user_id(), admin.0.user_id);

        let user = AuthUser(claims(Role::User));
        assert!(!user.is_admin());
    }
}
