//! Job request and response bodies.

pub use jobify_models::jobs::{
    JobInput, JobMessageResponse, JobQuery, JobResponse, JobStats, JobsPage, MonthlyApplication,
    StatusCounts,
};

/// Months covered by `monthlyApplications`, including the current one.
pub const STATS_MONTHS: u32 = 6;

pub const JOB_MODIFIED_MESSAGE: &str = "job modified";
pub const JOB_DELETED_MESSAGE: &str = "job deleted";
pub const INVALID_JOB_ID_MESSAGE: &str = "invalid job id";
