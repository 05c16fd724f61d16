//! Storage traits used by the HTTP layer.
//!
//! All methods return [`AppError`]; a storage failure is always an internal
//! error, never a validation failure.

use async_trait::async_trait;
use jobify_core::AppError;
use jobify_models::jobs::{JobChanges, JobFilter, MonthlyCount, NewJob, StatusCounts};
use jobify_models::users::{NewUser, UserChanges, UserWithPassword};
use jobify_models::{Job, JobId, User, UserId};

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn count(&self) -> Result<i64, AppError>;

    /// Inserts `new_user`, assigning `admin` when no user exists yet and
    /// `user` otherwise.
    ///
    /// The count and the insert are atomic with respect to other calls, so
    /// at most one user is ever auto-promoted.
    async fn create_with_first_admin(&self, new_user: NewUser) -> Result<User, AppError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError>;

    /// `email` must already be normalized.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserWithPassword>, AppError>;

    /// Whether a user other than `except` already owns `email`.
    async fn email_taken(&self, email: &str, except: Option<UserId>) -> Result<bool, AppError>;

    async fn update(&self, id: UserId, changes: UserChanges) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn create(&self, job: NewJob) -> Result<Job, AppError>;

    async fn find_by_id(&self, id: JobId) -> Result<Option<Job>, AppError>;

    /// One page of jobs matching `filter`, plus the total match count.
    async fn list(&self, filter: &JobFilter) -> Result<(Vec<Job>, i64), AppError>;

    async fn update(&self, id: JobId, changes: JobChanges) -> Result<Option<Job>, AppError>;

    /// Deletes and returns the job, if it existed.
    async fn delete(&self, id: JobId) -> Result<Option<Job>, AppError>;

    async fn delete_all_for(&self, owner: UserId) -> Result<u64, AppError>;

    async fn status_counts(&self, owner: UserId) -> Result<StatusCounts, AppError>;

    /// Jobs created per calendar month over the last `months` months, oldest
    /// first. Months without jobs are omitted.
    async fn monthly_counts(&self, owner: UserId, months: u32)
    -> Result<Vec<MonthlyCount>, AppError>;

    async fn count_all(&self) -> Result<i64, AppError>;
}
