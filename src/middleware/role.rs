//! Role-based route layers.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use jobify_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::middleware::guard::NOT_AUTHORIZED_MESSAGE;
use crate::state::AppState;

/// Middleware restricting a router to admins.
///
/// The role comes from the session claims; the store is not consulted.
///
/// # Usage with axum::middleware::from_fn_with_state
///
/// ```rust,ignore
/// use axum::{Router, middleware, routing::get};
/// use crate::middleware::role::require_admin;
///
/// let admin_routes = Router::new()
///     .route("/app-stats", get(show_stats))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
/// ```
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let auth_user = match AuthUser::from_request_parts(&mut parts, &state).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    if !auth_user.is_admin() {
        return AppError::unauthorized(NOT_AUTHORIZED_MESSAGE).into_response();
    }

    next.run(Request::from_parts(parts, body)).await
}
