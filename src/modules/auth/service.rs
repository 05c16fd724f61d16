use tracing::instrument;

use jobify_auth::SessionTokenCodec;
use jobify_core::AppError;
use jobify_core::password::{hash_password_async, verify_password_async};
use jobify_db::UserStore;
use jobify_models::User;
use jobify_models::users::{NewUser, normalize_email};

use super::model::{INVALID_CREDENTIALS_MESSAGE, LoginRequest, MIN_PASSWORD_LENGTH, RegisterRequest};
use crate::validation::{FieldRules, Validation, rules};

pub struct AuthService;

impl AuthService {
    /// Field rules of the register body, in reporting order.
    pub async fn validate_registration(
        users: &dyn UserStore,
        dto: &RegisterRequest,
    ) -> Result<(), AppError> {
        Validation::new()
            .field(FieldRules::new("name", &dto.name).rule(rules::required("name is required")))
            .field(
                FieldRules::new("email", &dto.email)
                    .rule(rules::required("email is required"))
                    .rule(rules::email("invalid email format"))
                    .rule(rules::unique("email already exists", move |email| async move {
                        users.email_taken(&normalize_email(&email), None).await
                    })),
            )
            .field(
                FieldRules::new("password", &dto.password)
                    .rule(rules::required("password is required"))
                    .rule(rules::min_length(
                        MIN_PASSWORD_LENGTH,
                        format!("password must be at least {MIN_PASSWORD_LENGTH} characters long"),
                    )),
            )
            .field(
                FieldRules::new("location", &dto.location)
                    .rule(rules::required("location is required")),
            )
            .field(
                FieldRules::new("lastName", &dto.last_name)
                    .rule(rules::required("last name is required")),
            )
            .run()
            .await
    }

    pub async fn validate_login(dto: &LoginRequest) -> Result<(), AppError> {
        Validation::new()
            .field(
                FieldRules::new("email", &dto.email)
                    .rule(rules::required("email is required"))
                    .rule(rules::email("invalid email format")),
            )
            .field(
                FieldRules::new("password", &dto.password)
                    .rule(rules::required("password is required")),
            )
            .run()
            .await
    }

    /// Creates the account. The very first account becomes `admin`.
    #[instrument(skip(users, dto), fields(email = %dto.email))]
    pub async fn register_user(
        users: &dyn UserStore,
        dto: RegisterRequest,
    ) -> Result<User, AppError> {
        Self::validate_registration(users, &dto).await?;

        let password_hash = hash_password_async(dto.password).await?;

        let user = users
            .create_with_first_admin(NewUser {
                name: dto.name.trim().to_string(),
                last_name: dto.last_name.trim().to_string(),
                email: normalize_email(&dto.email),
                location: dto.location.trim().to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Checks credentials and issues a session token.
    ///
    /// Unknown email and wrong password produce the same 401.
    #[instrument(skip(users, tokens, dto), fields(email = %dto.email))]
    pub async fn login_user(
        users: &dyn UserStore,
        tokens: &SessionTokenCodec,
        dto: LoginRequest,
    ) -> Result<(User, String), AppError> {
        Self::validate_login(&dto).await?;

        let email = normalize_email(&dto.email);
        let Some(credentials) = users.find_credentials_by_email(&email).await? else {
            tracing::debug!("Login for unknown email");
            return Err(AppError::unauthenticated(INVALID_CREDENTIALS_MESSAGE));
        };

        if !verify_password_async(dto.password, credentials.password).await? {
            tracing::debug!(user_id = %credentials.user.id, "Login with wrong password");
            return Err(AppError::unauthenticated(INVALID_CREDENTIALS_MESSAGE));
        }

        let user = credentials.user;
        let token = tokens.issue(user.id, user.role)?;

        Ok((user, token))
    }
}
