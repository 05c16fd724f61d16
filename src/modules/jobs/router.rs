use axum::{Router, routing::get};

use super::controller::{create_job, delete_job, get_all_jobs, get_job, show_stats, update_job};
use crate::state::AppState;

pub fn init_jobs_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_jobs).post(create_job))
        .route("/stats", get(show_stats))
        .route("/{id}", get(get_job).patch(update_job).delete(delete_job))
}
