use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::controller::{login_user, logout_user, register_user};
use crate::middleware::rate_limit::auth_rate_limit;
use crate::state::AppState;

/// Register and login share the per-IP limiter; logout is not limited.
pub fn init_auth_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route_layer(middleware::from_fn_with_state(state, auth_rate_limit))
        .route("/logout", get(logout_user))
}
