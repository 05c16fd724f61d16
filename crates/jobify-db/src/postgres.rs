//! PostgreSQL-backed stores.

use async_trait::async_trait;
use jobify_core::AppError;
use jobify_models::jobs::{JobChanges, JobFilter, JobSort, MonthlyCount, NewJob, StatusCounts};
use jobify_models::users::{NewUser, UserChanges, UserWithPassword};
use jobify_models::{Job, JobId, JobStatus, Role, User, UserId};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use crate::store::{JobStore, UserStore};

/// Advisory lock key serializing registrations while the first-admin
/// decision is made.
const REGISTRATION_LOCK_KEY: i64 = 0x6a6f_6269_6679;

const USER_COLUMNS: &str = "id, name, last_name, email, location, role, created_at, updated_at";
const JOB_COLUMNS: &str =
    "id, company, position, job_status, job_type, job_location, created_by, created_at, updated_at";

fn email_conflict(err: sqlx::Error) -> AppError {
    let unique = err
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation());
    if unique {
        AppError::bad_request(anyhow::anyhow!("email already exists"))
    } else {
        AppError::internal(err)
    }
}

#[derive(Clone, Debug)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip(self))]
    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    #[instrument(skip(self, new_user), fields(email = %new_user.email))]
    async fn create_with_first_admin(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(REGISTRATION_LOCK_KEY)
            .execute(&mut *tx)
            .await?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *tx)
            .await?;
        let role = Role::for_new_user(existing);

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, last_name, email, location, password, role)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&new_user.name)
        .bind(&new_user.last_name)
        .bind(&new_user.email)
        .bind(&new_user.location)
        .bind(&new_user.password_hash)
        .bind(role)
        .fetch_one(&mut *tx)
        .await
        .map_err(email_conflict)?;

        tx.commit().await?;

        if role == Role::Admin {
            tracing::info!(user_id = %user.id, "First user registered, granted admin role");
        }

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserWithPassword>, AppError> {
        let user = sqlx::query_as::<_, UserWithPassword>(&format!(
            "SELECT {USER_COLUMNS}, password FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn email_taken(&self, email: &str, except: Option<UserId>) -> Result<bool, AppError> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM users
                WHERE email = $1 AND ($2::UUID IS NULL OR id <> $2)
             )",
        )
        .bind(email)
        .bind(except)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: UserId, changes: UserChanges) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET name = $2, last_name = $3, email = $4, location = $5, updated_at = NOW()
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.last_name)
        .bind(&changes.email)
        .bind(&changes.location)
        .fetch_optional(&self.pool)
        .await
        .map_err(email_conflict)?;
        Ok(user)
    }
}

#[derive(Clone, Debug)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn push_job_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &JobFilter) {
    qb.push(" WHERE created_by = ").push_bind(filter.created_by);

    if let Some(status) = filter.job_status {
        qb.push(" AND job_status = ").push_bind(status);
    }
    if let Some(job_type) = filter.job_type {
        qb.push(" AND job_type = ").push_bind(job_type);
    }
    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", escape_like(search));
        qb.push(" AND (company ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR position ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

fn order_clause(sort: JobSort) -> &'static str {
    match sort {
        JobSort::Newest => " ORDER BY created_at DESC, id",
        JobSort::Oldest => " ORDER BY created_at ASC, id",
        JobSort::AZ => " ORDER BY position ASC, id",
        JobSort::ZA => " ORDER BY position DESC, id",
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    #[instrument(skip(self, job), fields(created_by = %job.created_by))]
    async fn create(&self, job: NewJob) -> Result<Job, AppError> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "INSERT INTO jobs (company, position, job_status, job_type, job_location, created_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {JOB_COLUMNS}"
        ))
        .bind(&job.company)
        .bind(&job.position)
        .bind(job.job_status)
        .bind(job.job_type)
        .bind(&job.job_location)
        .bind(job.created_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: JobId) -> Result<Option<Job>, AppError> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(job)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &JobFilter) -> Result<(Vec<Job>, i64), AppError> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM jobs");
        push_job_filter(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut list_query = QueryBuilder::<Postgres>::new(format!("SELECT {JOB_COLUMNS} FROM jobs"));
        push_job_filter(&mut list_query, filter);
        list_query.push(order_clause(filter.sort));
        list_query
            .push(" LIMIT ")
            .push_bind(filter.page.limit())
            .push(" OFFSET ")
            .push_bind(filter.page.offset());

        let jobs = list_query
            .build_query_as::<Job>()
            .fetch_all(&self.pool)
            .await?;

        Ok((jobs, total))
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: JobId, changes: JobChanges) -> Result<Option<Job>, AppError> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "UPDATE jobs
             SET company = $2, position = $3, job_status = $4, job_type = $5,
                 job_location = $6, updated_at = NOW()
             WHERE id = $1
             RETURNING {JOB_COLUMNS}"
        ))
        .bind(id)
        .bind(&changes.company)
        .bind(&changes.position)
        .bind(changes.job_status)
        .bind(changes.job_type)
        .bind(&changes.job_location)
        .fetch_optional(&self.pool)
        .await?;
        Ok(job)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: JobId) -> Result<Option<Job>, AppError> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "DELETE FROM jobs WHERE id = $1 RETURNING {JOB_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(job)
    }

    #[instrument(skip(self))]
    async fn delete_all_for(&self, owner: UserId) -> Result<u64, AppError> {
        let deleted = sqlx::query("DELETE FROM jobs WHERE created_by = $1")
            .bind(owner)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn status_counts(&self, owner: UserId) -> Result<StatusCounts, AppError> {
        let rows: Vec<(JobStatus, i64)> = sqlx::query_as(
            "SELECT job_status, COUNT(*) FROM jobs WHERE created_by = $1 GROUP BY job_status",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(StatusCounts::from_pairs(rows))
    }

    #[instrument(skip(self))]
    async fn monthly_counts(
        &self,
        owner: UserId,
        months: u32,
    ) -> Result<Vec<MonthlyCount>, AppError> {
        let back = i32::try_from(months.saturating_sub(1)).unwrap_or(i32::MAX);
        let rows: Vec<(i32, i32, i64)> = sqlx::query_as(
            "SELECT EXTRACT(YEAR FROM created_at)::INT4 AS year,
                    EXTRACT(MONTH FROM created_at)::INT4 AS month,
                    COUNT(*) AS count
             FROM jobs
             WHERE created_by = $1
               AND created_at >= date_trunc('month', NOW()) - make_interval(months => $2)
             GROUP BY 1, 2
             ORDER BY 1, 2",
        )
        .bind(owner)
        .bind(back)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(year, month, count)| MonthlyCount {
                year,
                month: month.unsigned_abs(),
                count,
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn count_all(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
