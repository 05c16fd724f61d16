//! Fake job generation and bulk insertion.

mod jobs;

pub use jobs::{JobSeed, clear_jobs_for, generate_jobs, insert_jobs_batch, seed_jobs};
