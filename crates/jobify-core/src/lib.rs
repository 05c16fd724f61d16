//! # Jobify Core
//!
//! Core types, errors, and utilities shared by every Jobify crate.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Page-based pagination parameters
//! - [`password`]: Password hashing and verification (bcrypt)
//! - [`serde`]: Custom serde helpers for query strings
//!
//! # Example
//!
//! ```ignore
//! use jobify_core::errors::AppError;
//! use jobify_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("no job with id 42"));
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash)?);
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind};
pub use pagination::PageParams;
