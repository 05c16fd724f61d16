//! Job seeding functionality.
//!
//! Generates fake job applications for one owner and inserts them in
//! batches. Creation dates are spread over the past year so the monthly
//! statistics have something to show.

use chrono::{DateTime, Duration, Utc};
use fake::Fake;
use fake::faker::address::en::CityName;
use fake::faker::company::en::CompanyName;
use fake::faker::job::en::Title;
use jobify_db::{JobStore, PgJobStore};
use jobify_models::{JobId, JobStatus, JobType, UserId};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

const BATCH_SIZE: usize = 500;
const SPREAD_DAYS: i64 = 365;

/// Seed data for creating a job.
#[derive(Debug, Clone)]
pub struct JobSeed {
    pub company: String,
    pub position: String,
    pub job_status: JobStatus,
    pub job_type: JobType,
    pub job_location: String,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

/// Generates `count` fake jobs owned by `owner`.
pub fn generate_jobs(owner: UserId, count: usize) -> Vec<JobSeed> {
    let now = Utc::now();

    (0..count)
        .into_par_iter()
        .map(|_| {
            let days_ago: i64 = (0..SPREAD_DAYS).fake();
            let minutes: i64 = (0..24 * 60).fake();

            JobSeed {
                company: CompanyName().fake(),
                position: Title().fake(),
                job_status: JobStatus::ALL[(0..JobStatus::ALL.len()).fake::<usize>()],
                job_type: JobType::ALL[(0..JobType::ALL.len()).fake::<usize>()],
                job_location: CityName().fake(),
                created_by: owner,
                created_at: now - Duration::days(days_ago) - Duration::minutes(minutes),
            }
        })
        .collect()
}

/// Generates and inserts `count` jobs for `owner`.
pub async fn seed_jobs(db: &PgPool, owner: UserId, count: usize) -> anyhow::Result<Vec<JobId>> {
    let start_time = Instant::now();
    println!("📊 Seeding {} jobs...", count);

    let jobs = generate_jobs(owner, count);
    let ids = insert_jobs_batch(db, &jobs).await?;

    println!(
        "   ✓ Inserted {} jobs in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

/// Inserts jobs in batches inside one transaction.
pub async fn insert_jobs_batch(db: &PgPool, jobs: &[JobSeed]) -> anyhow::Result<Vec<JobId>> {
    let mut tx = db.begin().await?;
    let mut all_ids = Vec::with_capacity(jobs.len());

    for chunk in jobs.chunks(BATCH_SIZE) {
        all_ids.extend(insert_jobs_chunk(&mut tx, chunk).await?);
    }

    tx.commit().await?;
    Ok(all_ids)
}

async fn insert_jobs_chunk(
    tx: &mut Transaction<'_, Postgres>,
    jobs: &[JobSeed],
) -> anyhow::Result<Vec<JobId>> {
    if jobs.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from(
        "INSERT INTO jobs (company, position, job_status, job_type, job_location, created_by, created_at, updated_at) VALUES ",
    );

    for i in 0..jobs.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let p = i * 7;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${}, ${}, ${}, ${})",
            p + 1,
            p + 2,
            p + 3,
            p + 4,
            p + 5,
            p + 6,
            p + 7,
            p + 7
        ));
    }

    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for job in jobs {
        q = q
            .bind(&job.company)
            .bind(&job.position)
            .bind(job.job_status)
            .bind(job.job_type)
            .bind(&job.job_location)
            .bind(job.created_by)
            .bind(job.created_at);
    }

    let ids: Vec<JobId> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

/// Deletes every job owned by `owner`.
pub async fn clear_jobs_for(db: &PgPool, owner: UserId) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing jobs...");

    let deleted = PgJobStore::new(db.clone())
        .delete_all_for(owner)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete jobs: {}", e))?;

    println!("   ✓ Deleted {} jobs in {:?}", deleted, start_time.elapsed());

    Ok(deleted)
}
