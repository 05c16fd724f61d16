use tracing::instrument;

use jobify_core::AppError;
use jobify_db::{JobStore, UserStore};
use jobify_models::UserId;
use jobify_models::users::{UserChanges, normalize_email};

use super::model::{AppStats, UpdateUserRequest, User};
use crate::validation::{FieldRules, Validation, rules};

pub struct UserService;

impl UserService {
    #[instrument(skip(users))]
    pub async fn get_current_user(users: &dyn UserStore, id: UserId) -> Result<User, AppError> {
        users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("no user with id {}", id)))
    }

    /// The email may stay the caller's own; it must not belong to anyone else.
    pub async fn validate_update(
        users: &dyn UserStore,
        caller: UserId,
        dto: &UpdateUserRequest,
    ) -> Result<(), AppError> {
        Validation::new()
            .field(FieldRules::new("name", &dto.name).rule(rules::required("name is required")))
            .field(
                FieldRules::new("email", &dto.email)
                    .rule(rules::required("email is required"))
                    .rule(rules::email("invalid email format"))
                    .rule(rules::unique("email already exists", move |email| async move {
                        users.email_taken(&normalize_email(&email), Some(caller)).await
                    })),
            )
            .field(
                FieldRules::new("lastName", &dto.last_name)
                    .rule(rules::required("last name is required")),
            )
            .field(
                FieldRules::new("location", &dto.location)
                    .rule(rules::required("location is required")),
            )
            .run()
            .await
    }

    #[instrument(skip(users, dto))]
    pub async fn update_user(
        users: &dyn UserStore,
        caller: UserId,
        dto: UpdateUserRequest,
    ) -> Result<User, AppError> {
        Self::validate_update(users, caller, &dto).await?;

        let changes = UserChanges {
            name: dto.name.trim().to_string(),
            last_name: dto.last_name.trim().to_string(),
            email: normalize_email(&dto.email),
            location: dto.location.trim().to_string(),
        };

        users
            .update(caller, changes)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("no user with id {}", caller)))
    }

    pub async fn app_stats(users: &dyn UserStore, jobs: &dyn JobStore) -> Result<AppStats, AppError> {
        Ok(AppStats {
            users: users.count().await?,
            jobs: jobs.count_all().await?,
        })
    }
}
