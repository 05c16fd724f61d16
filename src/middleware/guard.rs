//! Record-level authorization.
//!
//! A caller may act on a record when they own it or hold the admin role.
//! There is no delegated access.

use jobify_auth::SessionClaims;
use jobify_core::AppError;
use jobify_models::UserId;

pub const NOT_AUTHORIZED_MESSAGE: &str = "not authorized to access this route";

pub fn permits(caller: &SessionClaims, owner: UserId) -> bool {
    caller.is_admin() || caller.user_id == owner
}

/// # Errors
///
/// 403 with [`NOT_AUTHORIZED_MESSAGE`] when [`permits`] is false.
pub fn authorize(caller: &SessionClaims, owner: UserId) -> Result<(), AppError> {
    if permits(caller, owner) {
        Ok(())
    } else {
        tracing::debug!(caller = %caller.user_id, owner = %owner, "Ownership check failed");
        Err(AppError::unauthorized(NOT_AUTHORIZED_MESSAGE))
    }
}
