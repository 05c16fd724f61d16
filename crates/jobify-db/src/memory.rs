//! In-process stores for tests.
//!
//! Each store keeps its rows behind one `tokio::sync::RwLock`. Writes take
//! the write lock for their whole duration, which gives the same atomicity
//! the PostgreSQL stores get from transactions.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use jobify_core::AppError;
use jobify_models::jobs::{JobChanges, JobFilter, JobSort, MonthlyCount, NewJob, StatusCounts};
use jobify_models::users::{NewUser, UserChanges, UserWithPassword};
use jobify_models::{Job, JobId, Role, User, UserId};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::store::{JobStore, UserStore};

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<UserWithPassword>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored bcrypt hash of `email`, if the user exists.
    pub async fn password_hash(&self, email: &str) -> Option<String> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.user.email == email)
            .map(|u| u.password.clone())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.users.read().await.len() as i64)
    }

    async fn create_with_first_admin(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.user.email == new_user.email) {
            return Err(AppError::bad_request(anyhow::anyhow!("email already exists")));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            name: new_user.name,
            last_name: new_user.last_name,
            email: new_user.email,
            location: new_user.location,
            role: Role::for_new_user(users.len() as i64),
            created_at: now,
            updated_at: now,
        };
        users.push(UserWithPassword {
            user: user.clone(),
            password: new_user.password_hash,
        });

        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.user.id == id)
            .map(|u| u.user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.user.email == email)
            .map(|u| u.user.clone()))
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserWithPassword>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.user.email == email)
            .cloned())
    }

    async fn email_taken(&self, email: &str, except: Option<UserId>) -> Result<bool, AppError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .any(|u| u.user.email == email && Some(u.user.id) != except))
    }

    async fn update(&self, id: UserId, changes: UserChanges) -> Result<Option<User>, AppError> {
        let mut users = self.users.write().await;

        if users
            .iter()
            .any(|u| u.user.email == changes.email && u.user.id != id)
        {
            return Err(AppError::bad_request(anyhow::anyhow!("email already exists")));
        }

        let Some(entry) = users.iter_mut().find(|u| u.user.id == id) else {
            return Ok(None);
        };
        entry.user.name = changes.name;
        entry.user.last_name = changes.last_name;
        entry.user.email = changes.email;
        entry.user.location = changes.location;
        entry.user.updated_at = Utc::now();

        Ok(Some(entry.user.clone()))
    }
}

#[derive(Debug, Default)]
pub struct MemoryJobStore {
    jobs: RwLock<Vec<Job>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fully formed job, e.g. one with a backdated `created_at`.
    pub async fn insert(&self, job: Job) {
        self.jobs.write().await.push(job);
    }
}

fn month_index(at: DateTime<Utc>) -> i64 {
    i64::from(at.year()) * 12 + i64::from(at.month0())
}

fn sort_jobs(jobs: &mut [Job], sort: JobSort) {
    match sort {
        JobSort::Newest => jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        JobSort::Oldest => jobs.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        JobSort::AZ => jobs.sort_by(|a, b| a.position.cmp(&b.position)),
        JobSort::ZA => jobs.sort_by(|a, b| b.position.cmp(&a.position)),
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn create(&self, job: NewJob) -> Result<Job, AppError> {
        let now = Utc::now();
        let job = Job {
            id: JobId::new(),
            company: job.company,
            position: job.position,
            job_status: job.job_status,
            job_type: job.job_type,
            job_location: job.job_location,
            created_by: job.created_by,
            created_at: now,
            updated_at: now,
        };
        self.jobs.write().await.push(job.clone());
        Ok(job)
    }

    async fn find_by_id(&self, id: JobId) -> Result<Option<Job>, AppError> {
        Ok(self.jobs.read().await.iter().find(|j| j.id == id).cloned())
    }

    async fn list(&self, filter: &JobFilter) -> Result<(Vec<Job>, i64), AppError> {
        let mut matching: Vec<Job> = self
            .jobs
            .read()
            .await
            .iter()
            .filter(|job| filter.matches(job))
            .cloned()
            .collect();
        let total = matching.len() as i64;

        sort_jobs(&mut matching, filter.sort);
        let page = matching
            .into_iter()
            .skip(usize::try_from(filter.page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(filter.page.limit()).unwrap_or(0))
            .collect();

        Ok((page, total))
    }

    async fn update(&self, id: JobId, changes: JobChanges) -> Result<Option<Job>, AppError> {
        let mut jobs = self.jobs.write().await;
        let Some(job) = jobs.iter_mut().find(|j| j.id == id) else {
            return Ok(None);
        };
        job.company = changes.company;
        job.position = changes.position;
        job.job_status = changes.job_status;
        job.job_type = changes.job_type;
        job.job_location = changes.job_location;
        job.updated_at = Utc::now();
        Ok(Some(job.clone()))
    }

    async fn delete(&self, id: JobId) -> Result<Option<Job>, AppError> {
        let mut jobs = self.jobs.write().await;
        Ok(jobs
            .iter()
            .position(|j| j.id == id)
            .map(|index| jobs.remove(index)))
    }

    async fn delete_all_for(&self, owner: UserId) -> Result<u64, AppError> {
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|j| j.created_by != owner);
        Ok((before - jobs.len()) as u64)
    }

    async fn status_counts(&self, owner: UserId) -> Result<StatusCounts, AppError> {
        let jobs = self.jobs.read().await;
        Ok(StatusCounts::from_pairs(
            jobs.iter()
                .filter(|j| j.created_by == owner)
                .map(|j| (j.job_status, 1)),
        ))
    }

    async fn monthly_counts(
        &self,
        owner: UserId,
        months: u32,
    ) -> Result<Vec<MonthlyCount>, AppError> {
        let earliest = month_index(Utc::now()) - i64::from(months.saturating_sub(1));
        let mut buckets: BTreeMap<(i32, u32), i64> = BTreeMap::new();

        for job in self.jobs.read().await.iter() {
            if job.created_by == owner && month_index(job.created_at) >= earliest {
                *buckets
                    .entry((job.created_at.year(), job.created_at.month()))
                    .or_default() += 1;
            }
        }

        Ok(buckets
            .into_iter()
            .map(|((year, month), count)| MonthlyCount { year, month, count })
            .collect())
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        Ok(self.jobs.read().await.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use jobify_models::{JobStatus, JobType};
    use std::sync::Arc;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Jane".into(),
            last_name: "Doe".into(),
            email: email.into(),
            location: "Lisbon".into(),
            password_hash: "hash".into(),
        }
    }

    fn new_job(owner: UserId, position: &str) -> NewJob {
        NewJob {
            company: "Acme".into(),
            position: position.into(),
            job_status: JobStatus::Pending,
            job_type: JobType::FullTime,
            job_location: "my city".into(),
            created_by: owner,
        }
    }

    #[tokio::test]
    async fn test_first_user_becomes_admin() {
        let store = MemoryUserStore::new();
        let first = store.create_with_first_admin(new_user("a@x.io")).await.unwrap();
        let second = store.create_with_first_admin(new_user("b@x.io")).await.unwrap();

        assert_eq!(first.role, Role::Admin);
        assert_eq!(second.role, Role::User);
    }

    #[tokio::test]
    async fn test_concurrent_registrations_yield_one_admin() {
        let store = Arc::new(MemoryUserStore::new());
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .create_with_first_admin(new_user(&format!("user{}@x.io", i)))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut admins = 0;
        for handle in handles {
            if handle.await.unwrap().role == Role::Admin {
                admins += 1;
            }
        }
        assert_eq!(admins, 1);
    }

    #[tokio::test]
    async fn test_email_taken_excludes_self() {
        let store = MemoryUserStore::new();
        let user = store.create_with_first_admin(new_user("a@x.io")).await.unwrap();

        assert!(store.email_taken("a@x.io", None).await.unwrap());
        assert!(!store.email_taken("a@x.io", Some(user.id)).await.unwrap());
        assert!(!store.email_taken("nobody@x.io", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_paginates_and_counts() {
        let store = MemoryJobStore::new();
        let owner = UserId::new();
        for i in 0..12 {
            store.create(new_job(owner, &format!("Role {:02}", i))).await.unwrap();
        }
        store.create(new_job(UserId::new(), "Other")).await.unwrap();

        let mut filter = JobFilter::for_owner(owner);
        filter.sort = JobSort::AZ;
        filter.page = jobify_core::PageParams::new(Some(2), Some(5));

        let (jobs, total) = store.list(&filter).await.unwrap();
        assert_eq!(total, 12);
        assert_eq!(jobs.len(), 5);
        assert_eq!(jobs[0].position, "Role 05");
    }

    #[tokio::test]
    async fn test_delete_returns_removed_job() {
        let store = MemoryJobStore::new();
        let job = store.create(new_job(UserId::new(), "Dev")).await.unwrap();

        assert_eq!(store.delete(job.id).await.unwrap(), Some(job.clone()));
        assert_eq!(store.delete(job.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_monthly_counts_skip_old_jobs() {
        let store = MemoryJobStore::new();
        let owner = UserId::new();
        let recent = store.create(new_job(owner, "Recent")).await.unwrap();

        let mut old = recent.clone();
        old.id = JobId::new();
        old.created_at = Utc::now() - Duration::days(400);
        store.insert(old).await;

        let counts = store.monthly_counts(owner, 6).await.unwrap();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].count, 1);
        assert_eq!(counts[0].month, recent.created_at.month());
    }
}
