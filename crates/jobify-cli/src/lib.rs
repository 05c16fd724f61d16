//! # Jobify CLI
//!
//! Database seeding utilities for Jobify testing and development.
//!
//! ```ignore
//! use jobify_cli::seeder::seed_jobs;
//!
//! let ids = seed_jobs(&pool, owner_id, 50).await?;
//! ```

pub mod seeder;
