//! HS256 session tokens.
//!
//! A [`SessionTokenCodec`] is built once at startup from [`JwtConfig`] and
//! shared through the application state. Issuing is pure; verifying accepts
//! only tokens signed with the same secret that have not yet expired. Expiry
//! is checked with zero leeway.
//!
//! Every verification failure (bad signature, malformed token, expired)
//! collapses into the same unauthenticated error so clients cannot tell
//! them apart.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use jobify_config::JwtConfig;
use jobify_core::AppError;
use jobify_models::{Role, UserId};

use crate::claims::SessionClaims;

pub const INVALID_SESSION_MESSAGE: &str = "authentication invalid";

#[derive(Clone)]
pub struct SessionTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in: i64,
}

impl std::fmt::Debug for SessionTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenCodec")
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}

impl SessionTokenCodec {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            expires_in: config.expires_in,
        }
    }

    /// Token validity in seconds.
    pub fn expires_in(&self) -> i64 {
        self.expires_in
    }

    /// Signs a token for `user_id` that expires after the configured window.
    ///
    /// # Errors
    ///
    /// Returns an internal error if encoding fails.
    pub fn issue(&self, user_id: UserId, role: Role) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            user_id,
            role,
            iat: now,
            exp: now + self.expires_in,
        };
        self.encode(&claims)
    }

    pub(crate) fn encode(&self, claims: &SessionClaims) -> Result<String, AppError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AppError::internal_error(format!("Failed to create session token: {}", e)))
    }

    /// Verifies `token` and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns an unauthenticated error with [`INVALID_SESSION_MESSAGE`] for
    /// any invalid, tampered or expired token.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AppError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected session token");
                AppError::unauthenticated(INVALID_SESSION_MESSAGE)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobify_core::ErrorKind;

    fn codec() -> SessionTokenCodec {
        SessionTokenCodec::new(&JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            expires_in: 3600,
        })
    }

    #[test]
    fn test_issue_then_verify_returns_same_identity() {
        let codec = codec();
        let user_id = UserId::new();

        let token = codec.issue(user_id, Role::Admin).unwrap();
        let claims = codec.verify(&token).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let err = codec().verify("not-a-token").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
        assert_eq!(err.public_message(), INVALID_SESSION_MESSAGE);
    }

    #[test]
    fn test_verify_rejects_other_secret() {
        let token = codec().issue(UserId::new(), Role::User).unwrap();
        let other = SessionTokenCodec::new(&JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            expires_in: 3600,
        });

        let err = other.verify(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let codec = codec();
        let now = Utc::now().timestamp();
        let expired = SessionClaims {
            user_id: UserId::new(),
            role: Role::User,
            iat: now - 7200,
            exp: now - 10,
        };
        let token = codec.encode(&expired).unwrap();

        let err = codec.verify(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
        assert_eq!(err.public_message(), INVALID_SESSION_MESSAGE);
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let codec = codec();
        let token = codec.issue(UserId::new(), Role::User).unwrap();
        let admin_token = codec.issue(UserId::new(), Role::Admin).unwrap();

        // Splice the admin payload onto the user signature.
        let user_parts: Vec<&str> = token.split('.').collect();
        let admin_parts: Vec<&str> = admin_token.split('.').collect();
        let forged = format!("{}.{}.{}", user_parts[0], admin_parts[1], user_parts[2]);

        assert!(codec.verify(&forged).is_err());
    }
}
