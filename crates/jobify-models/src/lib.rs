//! # Jobify Models
//!
//! Domain models and DTOs shared by the API, the storage layer and the CLI.
//!
//! - [`ids`]: strongly-typed UUID identifiers
//! - [`users`]: users, roles, and the records written to storage
//! - [`jobs`]: job applications, their enumerations, filters and statistics
//! - [`auth`]: request and response bodies of the HTTP API
//!
//! JSON field names are camelCase (`lastName`, `jobStatus`, `createdBy`).

pub mod auth;
pub mod ids;
pub mod jobs;
pub mod users;

// Re-export commonly used types at crate root
pub use ids::{JobId, UserId};
pub use jobs::{Job, JobStatus, JobType};
pub use users::{Role, User};
