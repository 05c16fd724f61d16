use axum::{
    Router, middleware,
    routing::{get, patch},
};

use super::controller::{get_current_user, show_app_stats, update_user};
use crate::middleware::role::require_admin;
use crate::state::AppState;

pub fn init_users_router(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/app-stats", get(show_app_stats))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/current-user", get(get_current_user))
        .route("/update-user", patch(update_user))
        .nest("/admin", admin_routes)
}
