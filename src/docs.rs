use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use jobify_auth::SessionClaims;
use jobify_models::auth::{
    AppStats, AuthUserResponse, CurrentUserResponse, LoginRequest, MessageResponse,
    RegisterRequest, UpdateUserRequest,
};
use jobify_models::jobs::{
    Job, JobInput, JobMessageResponse, JobResponse, JobStats, JobStatus, JobType, JobsPage,
    MonthlyApplication, StatusCounts,
};
use jobify_models::users::{Role, User};
use jobify_models::{JobId, UserId};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::logout_user,
        crate::modules::jobs::controller::create_job,
        crate::modules::jobs::controller::get_all_jobs,
        crate::modules::jobs::controller::get_job,
        crate::modules::jobs::controller::update_job,
        crate::modules::jobs::controller::delete_job,
        crate::modules::jobs::controller::show_stats,
        crate::modules::users::controller::get_current_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::show_app_stats,
    ),
    components(
        schemas(
            UserId,
            JobId,
            Role,
            User,
            SessionClaims,
            RegisterRequest,
            LoginRequest,
            UpdateUserRequest,
            AuthUserResponse,
            CurrentUserResponse,
            MessageResponse,
            AppStats,
            Job,
            JobStatus,
            JobType,
            JobInput,
            JobResponse,
            JobMessageResponse,
            JobsPage,
            JobStats,
            StatusCounts,
            MonthlyApplication,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and logout"),
        (name = "Jobs", description = "Job applications of the signed-in user"),
        (name = "Users", description = "Profile and admin statistics")
    ),
    info(
        title = "Jobify API",
        version = "0.1.0",
        description = "Track job applications. Sessions travel in an HttpOnly `token` cookie set by login.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("token"))),
            )
        }
    }
}
