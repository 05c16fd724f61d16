use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::{Duration, OffsetDateTime};
use tracing::instrument;

use jobify_config::SessionCookieConfig;
use jobify_config::session::LOGGED_OUT_PLACEHOLDER;
use jobify_core::AppError;
use jobify_observability::{track_session_token_issued, track_user_login, track_user_registered};

use super::model::{
    AuthUserResponse, LOGGED_IN_MESSAGE, LOGGED_OUT_MESSAGE, LoginRequest, MessageResponse,
    RegisterRequest, USER_CREATED_MESSAGE,
};
use super::service::AuthService;
use crate::extract::JsonBody;
use crate::state::AppState;

fn session_cookie(config: &SessionCookieConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.name.clone(), token))
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(config.secure)
        .path("/")
        .expires(OffsetDateTime::now_utc() + Duration::seconds(config.max_age_secs))
        .build()
}

fn logged_out_cookie(config: &SessionCookieConfig) -> Cookie<'static> {
    Cookie::build((config.name.clone(), LOGGED_OUT_PLACEHOLDER))
        .http_only(true)
        .path("/")
        .expires(OffsetDateTime::now_utc())
        .build()
}

/// Register a new user
///
/// The first account ever created is given the `admin` role.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthUserResponse),
        (status = 400, description = "Validation failed or email already exists", body = MessageResponse),
        (status = 429, description = "Rate limit exceeded", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthUserResponse>), AppError> {
    let user = AuthService::register_user(state.users.as_ref(), dto).await?;
    track_user_registered(user.role.as_str());

    Ok((
        StatusCode::CREATED,
        Json(AuthUserResponse {
            msg: USER_CREATED_MESSAGE.to_string(),
            user,
        }),
    ))
}

/// Login and receive the session cookie
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session set in the `token` cookie", body = AuthUserResponse),
        (status = 400, description = "Validation failed", body = MessageResponse),
        (status = 401, description = "Invalid credentials", body = MessageResponse),
        (status = 429, description = "Rate limit exceeded", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(dto): JsonBody<LoginRequest>,
) -> Result<(CookieJar, Json<AuthUserResponse>), AppError> {
    let (user, token) = match AuthService::login_user(state.users.as_ref(), &state.tokens, dto).await
    {
        Ok(result) => result,
        Err(err) => {
            track_user_login(if err.status() == StatusCode::UNAUTHORIZED {
                "invalid_credentials"
            } else {
                "rejected"
            });
            return Err(err);
        }
    };

    track_user_login("success");
    track_session_token_issued();

    let jar = jar.add(session_cookie(&state.session_cookie, token));

    Ok((
        jar,
        Json(AuthUserResponse {
            msg: LOGGED_IN_MESSAGE.to_string(),
            user,
        }),
    ))
}

/// Clear the session cookie
///
/// Does not look at the current session, so it always succeeds.
#[utoipa::path(
    get,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar))]
pub async fn logout_user(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.add(logged_out_cookie(&state.session_cookie));
    (jar, Json(MessageResponse::new(LOGGED_OUT_MESSAGE)))
}
