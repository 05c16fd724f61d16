use std::sync::OnceLock;

use tracing::instrument;

use jobify_auth::SessionClaims;
use jobify_core::{AppError, PageParams};
use jobify_db::JobStore;
use jobify_models::jobs::{JobStatus, JobType};
use jobify_models::{Job, JobId};

use super::model::{INVALID_JOB_ID_MESSAGE, JobInput, JobQuery, JobStats, JobsPage, STATS_MONTHS};
use crate::middleware::guard::authorize;
use crate::validation::{FieldRules, Validation, rules};

pub struct JobService;

impl JobService {
    pub async fn validate_job_input(input: &JobInput) -> Result<(), AppError> {
        Validation::new()
            .field(
                FieldRules::new("company", &input.company)
                    .rule(rules::required("company is required")),
            )
            .field(
                FieldRules::new("position", &input.position)
                    .rule(rules::required("position is required")),
            )
            .field(
                FieldRules::new("jobStatus", &input.job_status)
                    .rule(rules::one_of(&JobStatus::VALUES, "invalid job status")),
            )
            .field(
                FieldRules::new("jobType", &input.job_type)
                    .rule(rules::one_of(&JobType::VALUES, "invalid job type")),
            )
            .run()
            .await
    }

    /// Resolves `raw_id` to a job the caller may act on.
    ///
    /// Runs, in order: id format (400), existence (404), owner-or-admin (403).
    #[instrument(skip(jobs, caller), fields(caller = %caller.user_id))]
    pub async fn authorize_job_access(
        jobs: &dyn JobStore,
        caller: &SessionClaims,
        raw_id: &str,
    ) -> Result<Job, AppError> {
        let found = OnceLock::new();
        let slot = &found;

        Validation::new()
            .field(
                FieldRules::new("id", raw_id)
                    .rule(rules::object_id(INVALID_JOB_ID_MESSAGE))
                    .rule(rules::exists(
                        format!("no job with id {}", raw_id.trim()),
                        move |value| async move {
                            let id: JobId = value
                                .parse()
                                .map_err(|_| AppError::bad_request(anyhow::anyhow!(INVALID_JOB_ID_MESSAGE)))?;
                            Ok(match jobs.find_by_id(id).await? {
                                Some(job) => slot.set(job).is_ok(),
                                None => false,
                            })
                        },
                    )),
            )
            .run()
            .await?;

        let job = found
            .into_inner()
            .ok_or_else(|| AppError::internal_error("job passed the id checks but was not loaded"))?;
        authorize(caller, job.created_by)?;

        Ok(job)
    }

    #[instrument(skip(jobs, caller, input), fields(caller = %caller.user_id))]
    pub async fn create_job(
        jobs: &dyn JobStore,
        caller: &SessionClaims,
        input: JobInput,
    ) -> Result<Job, AppError> {
        Self::validate_job_input(&input).await?;

        let job = jobs
            .create(input.into_changes()?.into_new_job(caller.user_id))
            .await?;

        tracing::info!(job_id = %job.id, "Job created");
        Ok(job)
    }

    #[instrument(skip(jobs, caller, query), fields(caller = %caller.user_id))]
    pub async fn list_jobs(
        jobs: &dyn JobStore,
        caller: &SessionClaims,
        query: JobQuery,
    ) -> Result<JobsPage, AppError> {
        let filter = query.into_filter(caller.user_id)?;
        let (page_jobs, total) = jobs.list(&filter).await?;

        Ok(JobsPage {
            total_jobs: total,
            num_of_pages: PageParams::num_of_pages(total, filter.page.limit()),
            current_page: filter.page.page(),
            jobs: page_jobs,
        })
    }

    pub async fn get_job(
        jobs: &dyn JobStore,
        caller: &SessionClaims,
        raw_id: &str,
    ) -> Result<Job, AppError> {
        Self::authorize_job_access(jobs, caller, raw_id).await
    }

    /// Input is validated before the id guard runs.
    #[instrument(skip(jobs, caller, input), fields(caller = %caller.user_id))]
    pub async fn update_job(
        jobs: &dyn JobStore,
        caller: &SessionClaims,
        raw_id: &str,
        input: JobInput,
    ) -> Result<Job, AppError> {
        Self::validate_job_input(&input).await?;
        let job = Self::authorize_job_access(jobs, caller, raw_id).await?;

        jobs.update(job.id, input.into_changes()?)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("no job with id {}", job.id)))
    }

    #[instrument(skip(jobs, caller), fields(caller = %caller.user_id))]
    pub async fn delete_job(
        jobs: &dyn JobStore,
        caller: &SessionClaims,
        raw_id: &str,
    ) -> Result<Job, AppError> {
        let job = Self::authorize_job_access(jobs, caller, raw_id).await?;

        let deleted = jobs
            .delete(job.id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("no job with id {}", job.id)))?;

        tracing::info!(job_id = %deleted.id, "Job deleted");
        Ok(deleted)
    }

    pub async fn job_stats(jobs: &dyn JobStore, caller: &SessionClaims) -> Result<JobStats, AppError> {
        let default_stats = jobs.status_counts(caller.user_id).await?;
        let monthly = jobs.monthly_counts(caller.user_id, STATS_MONTHS).await?;

        Ok(JobStats {
            default_stats,
            monthly_applications: monthly.into_iter().map(Into::into).collect(),
        })
    }
}
