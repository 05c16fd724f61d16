//! The rule catalog.
//!
//! Sync rules test the raw string value; async rules wrap a storage lookup.
//! All rules fail with [`FailureKind::BadRequest`] unless stated otherwise.

use std::future::Future;

use jobify_core::AppError;
use validator::ValidateEmail;

use super::{FailureKind, Rule};

/// Non-empty after trimming.
pub fn required<'a>(message: impl Into<String>) -> Rule<'a> {
    Rule::check(FailureKind::BadRequest, message, |value| {
        !value.trim().is_empty()
    })
}

/// Exact membership in `allowed`.
pub fn one_of<'a>(allowed: &'a [&'a str], message: impl Into<String>) -> Rule<'a> {
    Rule::check(FailureKind::BadRequest, message, move |value| {
        allowed.contains(&value)
    })
}

/// Shaped like an email address.
pub fn email<'a>(message: impl Into<String>) -> Rule<'a> {
    Rule::check(FailureKind::BadRequest, message, |value| {
        value.trim().validate_email()
    })
}

/// At least `min` characters.
pub fn min_length<'a>(min: usize, message: impl Into<String>) -> Rule<'a> {
    Rule::check(FailureKind::BadRequest, message, move |value| {
        value.chars().count() >= min
    })
}

/// Parses as a UUID record identifier.
pub fn object_id<'a>(message: impl Into<String>) -> Rule<'a> {
    Rule::check(FailureKind::BadRequest, message, |value| {
        uuid::Uuid::parse_str(value.trim()).is_ok()
    })
}

/// Passes when `lookup` finds a record. Fails with [`FailureKind::NotFound`].
pub fn exists<'a, F, Fut>(message: impl Into<String>, lookup: F) -> Rule<'a>
where
    F: FnOnce(String) -> Fut + Send + 'a,
    Fut: Future<Output = Result<bool, AppError>> + Send + 'a,
{
    Rule::check_async(FailureKind::NotFound, message, lookup)
}

/// Passes when `taken` reports the value is free.
///
/// The lookup decides which records count, so an update can exclude the
/// caller's own record.
pub fn unique<'a, F, Fut>(message: impl Into<String>, taken: F) -> Rule<'a>
where
    F: FnOnce(String) -> Fut + Send + 'a,
    Fut: Future<Output = Result<bool, AppError>> + Send + 'a,
{
    Rule::check_async(FailureKind::BadRequest, message, move |value| {
        let taken = taken(value);
        async move { taken.await.map(|is_taken| !is_taken) }
    })
}
