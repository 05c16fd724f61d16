//! Job application models, request DTOs and list/stats shapes.

use anyhow::anyhow;
use chrono::{DateTime, NaiveDate, Utc};
use jobify_core::{AppError, PageParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

use crate::ids::{JobId, UserId};

pub const DEFAULT_JOB_LOCATION: &str = "my city";

/// Query value meaning "no filter" for `jobStatus` / `jobType`.
pub const FILTER_ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "job_status", rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Pending,
    Interview,
    Declined,
}

impl JobStatus {
    pub const ALL: [JobStatus; 3] = [JobStatus::Pending, JobStatus::Interview, JobStatus::Declined];
    pub const VALUES: [&'static str; 3] = ["pending", "interview", "declined"];

    pub const fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Interview => "interview",
            JobStatus::Declined => "declined",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown job status: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "job_type", rename_all = "kebab-case")]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Internship,
}

impl JobType {
    pub const ALL: [JobType; 3] = [JobType::FullTime, JobType::PartTime, JobType::Internship];
    pub const VALUES: [&'static str; 3] = ["full-time", "part-time", "internship"];

    pub const fn as_str(self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Internship => "internship",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobType::ALL
            .into_iter()
            .find(|job_type| job_type.as_str() == s)
            .ok_or_else(|| format!("unknown job type: {}", s))
    }
}

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub company: String,
    pub position: String,
    pub job_status: JobStatus,
    pub job_type: JobType,
    pub job_location: String,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    pub company: String,
    pub position: String,
    pub job_status: JobStatus,
    pub job_type: JobType,
    pub job_location: String,
    pub created_by: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobChanges {
    pub company: String,
    pub position: String,
    pub job_status: JobStatus,
    pub job_type: JobType,
    pub job_location: String,
}

/// Body of create and update job requests.
///
/// Missing fields deserialize as empty strings so the validation rules can
/// report every absent field at once.
#[derive(Deserialize, Debug, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobInput {
    #[serde(default)]
    #[schema(example = "Acme Corp")]
    pub company: String,
    #[serde(default)]
    #[schema(example = "Backend Engineer")]
    pub position: String,
    #[serde(default)]
    #[schema(example = "pending")]
    pub job_status: String,
    #[serde(default)]
    #[schema(example = "full-time")]
    pub job_type: String,
    #[serde(default)]
    #[schema(example = "Remote")]
    pub job_location: String,
}

impl JobInput {
    /// The location to store, falling back to [`DEFAULT_JOB_LOCATION`].
    pub fn job_location_or_default(&self) -> String {
        let location = self.job_location.trim();
        if location.is_empty() {
            DEFAULT_JOB_LOCATION.to_string()
        } else {
            location.to_string()
        }
    }

    /// Converts an input that already passed validation.
    pub fn into_changes(self) -> Result<JobChanges, AppError> {
        let job_status = self
            .job_status
            .parse::<JobStatus>()
            .map_err(|e| AppError::bad_request(anyhow!(e)))?;
        let job_type = self
            .job_type
            .parse::<JobType>()
            .map_err(|e| AppError::bad_request(anyhow!(e)))?;
        let job_location = self.job_location_or_default();

        Ok(JobChanges {
            company: self.company.trim().to_string(),
            position: self.position.trim().to_string(),
            job_status,
            job_type,
            job_location,
        })
    }
}

impl JobChanges {
    pub fn into_new_job(self, created_by: UserId) -> NewJob {
        NewJob {
            company: self.company,
            position: self.position,
            job_status: self.job_status,
            job_type: self.job_type,
            job_location: self.job_location,
            created_by,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobSort {
    #[default]
    Newest,
    Oldest,
    AZ,
    ZA,
}

impl FromStr for JobSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(JobSort::Newest),
            "oldest" => Ok(JobSort::Oldest),
            "a-z" => Ok(JobSort::AZ),
            "z-a" => Ok(JobSort::ZA),
            other => Err(format!("unknown sort option: {}", other)),
        }
    }
}

/// Query string of `GET /api/v1/jobs`.
#[derive(Deserialize, Debug, Clone, Default, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct JobQuery {
    /// Case-insensitive substring matched against company and position.
    #[serde(default, deserialize_with = "jobify_core::serde::deserialize_optional_string")]
    pub search: Option<String>,
    /// A job status, or `all`.
    #[serde(default, deserialize_with = "jobify_core::serde::deserialize_optional_string")]
    pub job_status: Option<String>,
    /// A job type, or `all`.
    #[serde(default, deserialize_with = "jobify_core::serde::deserialize_optional_string")]
    pub job_type: Option<String>,
    /// `newest` (default), `oldest`, `a-z` or `z-a`.
    #[serde(default, deserialize_with = "jobify_core::serde::deserialize_optional_string")]
    pub sort: Option<String>,
    #[serde(default, deserialize_with = "jobify_core::serde::deserialize_optional_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "jobify_core::serde::deserialize_optional_i64")]
    pub limit: Option<i64>,
}

/// Resolved list filter handed to the job store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFilter {
    pub created_by: UserId,
    pub search: Option<String>,
    pub job_status: Option<JobStatus>,
    pub job_type: Option<JobType>,
    pub sort: JobSort,
    pub page: PageParams,
}

impl JobFilter {
    pub fn for_owner(created_by: UserId) -> Self {
        Self {
            created_by,
            search: None,
            job_status: None,
            job_type: None,
            sort: JobSort::default(),
            page: PageParams::new(None, None),
        }
    }

    /// Whether `job` satisfies the search, status and type constraints.
    pub fn matches(&self, job: &Job) -> bool {
        if job.created_by != self.created_by {
            return false;
        }
        if self.job_status.is_some_and(|status| status != job.job_status) {
            return false;
        }
        if self.job_type.is_some_and(|job_type| job_type != job.job_type) {
            return false;
        }
        match &self.search {
            Some(term) => {
                let term = term.to_lowercase();
                job.company.to_lowercase().contains(&term)
                    || job.position.to_lowercase().contains(&term)
            }
            None => true,
        }
    }
}

impl JobQuery {
    pub fn into_filter(self, created_by: UserId) -> Result<JobFilter, AppError> {
        let job_status = parse_filter::<JobStatus>(self.job_status, "invalid job status")?;
        let job_type = parse_filter::<JobType>(self.job_type, "invalid job type")?;
        let sort = match self.sort {
            Some(sort) => sort
                .parse::<JobSort>()
                .map_err(|_| AppError::bad_request(anyhow!("invalid sort option")))?,
            None => JobSort::default(),
        };

        Ok(JobFilter {
            created_by,
            search: self.search.map(|s| s.trim().to_string()),
            job_status,
            job_type,
            sort,
            page: PageParams::new(self.page, self.limit),
        })
    }
}

fn parse_filter<T: FromStr>(raw: Option<String>, message: &str) -> Result<Option<T>, AppError> {
    match raw.as_deref() {
        None | Some(FILTER_ALL) => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::bad_request(anyhow!(message.to_string()))),
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq, ToSchema)]
pub struct StatusCounts {
    pub pending: i64,
    pub interview: i64,
    pub declined: i64,
}

impl StatusCounts {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (JobStatus, i64)>) -> Self {
        let mut counts = Self::default();
        for (status, count) in pairs {
            match status {
                JobStatus::Pending => counts.pending += count,
                JobStatus::Interview => counts.interview += count,
                JobStatus::Declined => counts.declined += count,
            }
        }
        counts
    }
}

/// Number of jobs created in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyCount {
    pub year: i32,
    pub month: u32,
    pub count: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct MonthlyApplication {
    /// Month label, e.g. `Mar 2026`.
    #[schema(example = "Mar 2026")]
    pub date: String,
    pub count: i64,
}

impl From<MonthlyCount> for MonthlyApplication {
    fn from(value: MonthlyCount) -> Self {
        let date = NaiveDate::from_ymd_opt(value.year, value.month, 1)
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_else(|| format!("{}-{:02}", value.year, value.month));
        Self {
            date,
            count: value.count,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobStats {
    pub default_stats: StatusCounts,
    /// Oldest month first.
    pub monthly_applications: Vec<MonthlyApplication>,
}

#[derive(Serialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobsPage {
    pub total_jobs: i64,
    pub num_of_pages: i64,
    pub current_page: i64,
    pub jobs: Vec<Job>,
}

#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct JobResponse {
    pub job: Job,
}

#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct JobMessageResponse {
    pub msg: String,
    pub job: Job,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(owner: UserId, company: &str, position: &str, status: JobStatus) -> Job {
        let now = Utc::now();
        Job {
            id: JobId::new(),
            company: company.into(),
            position: position.into(),
            job_status: status,
            job_type: JobType::FullTime,
            job_location: DEFAULT_JOB_LOCATION.into(),
            created_by: owner,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_enum_wire_values() {
        assert_eq!(serde_json::to_value(JobType::PartTime).unwrap(), "part-time");
        assert_eq!(serde_json::to_value(JobStatus::Interview).unwrap(), "interview");
        assert_eq!("internship".parse::<JobType>().unwrap(), JobType::Internship);
        assert!("Full-Time".parse::<JobType>().is_err());
        assert!("".parse::<JobStatus>().is_err());
    }

    #[test]
    fn test_blank_location_defaults() {
        let input = JobInput {
            company: "Acme".into(),
            position: "Dev".into(),
            job_status: "pending".into(),
            job_type: "full-time".into(),
            job_location: "   ".into(),
        };
        let changes = input.into_changes().unwrap();
        assert_eq!(changes.job_location, DEFAULT_JOB_LOCATION);
    }

    #[test]
    fn test_query_all_means_no_filter() {
        let owner = UserId::new();
        let query = JobQuery {
            job_status: Some("all".into()),
            job_type: Some("part-time".into()),
            sort: Some("a-z".into()),
            ..JobQuery::default()
        };

        let filter = query.into_filter(owner).unwrap();
        assert_eq!(filter.job_status, None);
        assert_eq!(filter.job_type, Some(JobType::PartTime));
        assert_eq!(filter.sort, JobSort::AZ);
    }

    #[test]
    fn test_query_rejects_unknown_status() {
        let query = JobQuery {
            job_status: Some("hired".into()),
            ..JobQuery::default()
        };
        let err = query.into_filter(UserId::new()).unwrap_err();
        assert_eq!(err.public_message(), "invalid job status");
    }

    #[test]
    fn test_filter_matches_search_case_insensitively() {
        let owner = UserId::new();
        let mut filter = JobFilter::for_owner(owner);
        filter.search = Some("ACME".into());

        assert!(filter.matches(&job(owner, "Acme Corp", "Dev", JobStatus::Pending)));
        assert!(!filter.matches(&job(owner, "Globex", "Dev", JobStatus::Pending)));
        assert!(!filter.matches(&job(UserId::new(), "Acme Corp", "Dev", JobStatus::Pending)));
    }

    #[test]
    fn test_status_counts_from_pairs() {
        let counts = StatusCounts::from_pairs([(JobStatus::Pending, 3), (JobStatus::Declined, 1)]);
        assert_eq!(
            counts,
            StatusCounts {
                pending: 3,
                interview: 0,
                declined: 1
            }
        );
    }

    #[test]
    fn test_monthly_label() {
        let app: MonthlyApplication = MonthlyCount {
            year: 2026,
            month: 3,
            count: 4,
        }
        .into();
        assert_eq!(app.date, "Mar 2026");
        assert_eq!(app.count, 4);
    }
}
