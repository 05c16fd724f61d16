use axum::{Json, extract::State};
use tracing::instrument;

use jobify_core::AppError;

use super::model::{
    AppStats, CurrentUserResponse, MessageResponse, USER_UPDATED_MESSAGE, UpdateUserRequest,
};
use super::service::UserService;
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/users/current-user",
    responses(
        (status = 200, description = "The caller's profile", body = CurrentUserResponse),
        (status = 401, description = "Missing or invalid session", body = MessageResponse),
        (status = 404, description = "Account no longer exists", body = MessageResponse)
    ),
    tag = "Users",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_current_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<CurrentUserResponse>, AppError> {
    let user = UserService::get_current_user(state.users.as_ref(), auth_user.user_id()).await?;
    Ok(Json(CurrentUserResponse { user }))
}

/// Update the caller's profile
///
/// Password and role cannot be changed here.
#[utoipa::path(
    patch,
    path = "/api/v1/users/update-user",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Profile updated", body = MessageResponse),
        (status = 400, description = "Validation failed or email already exists", body = MessageResponse),
        (status = 401, description = "Missing or invalid session", body = MessageResponse)
    ),
    tag = "Users",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    JsonBody(dto): JsonBody<UpdateUserRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    UserService::update_user(state.users.as_ref(), auth_user.user_id(), dto).await?;
    Ok(Json(MessageResponse::new(USER_UPDATED_MESSAGE)))
}

/// Total users and jobs (admin only)
#[utoipa::path(
    get,
    path = "/api/v1/users/admin/app-stats",
    responses(
        (status = 200, description = "Application totals", body = AppStats),
        (status = 401, description = "Missing or invalid session", body = MessageResponse),
        (status = 403, description = "Caller is not an admin", body = MessageResponse)
    ),
    tag = "Users",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state))]
pub async fn show_app_stats(State(state): State<AppState>) -> Result<Json<AppStats>, AppError> {
    let stats = UserService::app_stats(state.users.as_ref(), state.jobs.as_ref()).await?;
    Ok(Json(stats))
}
