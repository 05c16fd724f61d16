//! Declarative request validation.
//!
//! A [`Validation`] is a list of [`FieldRules`]: a field name, the raw value
//! and an ordered chain of [`Rule`]s. Every rule is tagged with the
//! [`FailureKind`] to report when it fails.
//!
//! Evaluation:
//!
//! 1. Fields run in declaration order. Within a field, the first failing rule
//!    records a failure and the rest of that chain is skipped. Other fields
//!    still run.
//! 2. Async rules are only started once every earlier rule of the field has
//!    passed. An `Err` from an async rule (a storage failure) aborts the whole
//!    validation with that error.
//! 3. No failures → `Ok(())`. Otherwise one [`AppError`] whose status comes
//!    from the kind of the first failure and whose body lists every message.
//!
//! ```ignore
//! Validation::new()
//!     .field(FieldRules::new("name", &dto.name).rule(rules::required("name is required")))
//!     .field(
//!         FieldRules::new("email", &dto.email)
//!             .rule(rules::required("email is required"))
//!             .rule(rules::email("invalid email format"))
//!             .rule(rules::unique("email already exists", |email| async move {
//!                 users.email_taken(&email, None).await
//!             })),
//!     )
//!     .run()
//!     .await?;
//! ```

pub mod rules;

use futures::future::BoxFuture;
use jobify_core::{AppError, ErrorKind};
use std::future::Future;

/// What a failed rule means for the request as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    BadRequest,
    NotFound,
    Unauthorized,
}

impl FailureKind {
    pub const fn error_kind(self) -> ErrorKind {
        match self {
            FailureKind::BadRequest => ErrorKind::BadRequest,
            FailureKind::NotFound => ErrorKind::NotFound,
            FailureKind::Unauthorized => ErrorKind::Unauthorized,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub field: &'static str,
    pub kind: FailureKind,
    pub message: String,
}

type SyncCheck<'a> = Box<dyn Fn(&str) -> bool + Send + Sync + 'a>;
type AsyncCheck<'a> = Box<dyn FnOnce(String) -> BoxFuture<'a, Result<bool, AppError>> + Send + 'a>;

enum Check<'a> {
    Sync(SyncCheck<'a>),
    Async(AsyncCheck<'a>),
}

/// One check of a field. Passes when its predicate returns `true`.
pub struct Rule<'a> {
    kind: FailureKind,
    message: String,
    check: Check<'a>,
}

impl<'a> Rule<'a> {
    pub fn check<F>(kind: FailureKind, message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'a,
    {
        Self {
            kind,
            message: message.into(),
            check: Check::Sync(Box::new(predicate)),
        }
    }

    /// A rule backed by an async lookup. The lookup receives the field value
    /// and is only called if every earlier rule of the field passed.
    pub fn check_async<F, Fut>(kind: FailureKind, message: impl Into<String>, lookup: F) -> Self
    where
        F: FnOnce(String) -> Fut + Send + 'a,
        Fut: Future<Output = Result<bool, AppError>> + Send + 'a,
    {
        Self {
            kind,
            message: message.into(),
            check: Check::Async(Box::new(move |value| Box::pin(lookup(value)))),
        }
    }

    /// Overrides the failure kind.
    pub fn with_kind(mut self, kind: FailureKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    async fn passes(self, value: &str) -> Result<bool, AppError> {
        match self.check {
            Check::Sync(predicate) => Ok(predicate(value)),
            Check::Async(lookup) => lookup(value.to_string()).await,
        }
    }
}

impl std::fmt::Debug for Rule<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// A field and its ordered rule chain.
#[derive(Debug)]
pub struct FieldRules<'a> {
    field: &'static str,
    value: String,
    rules: Vec<Rule<'a>>,
}

impl<'a> FieldRules<'a> {
    pub fn new(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule<'a>) -> Self {
        self.rules.push(rule);
        self
    }

    /// First failure of the chain, if any.
    async fn evaluate(self) -> Result<Option<Failure>, AppError> {
        for rule in self.rules {
            let kind = rule.kind;
            let message = rule.message.clone();
            if !rule.passes(&self.value).await? {
                return Ok(Some(Failure {
                    field: self.field,
                    kind,
                    message,
                }));
            }
        }
        Ok(None)
    }
}

#[derive(Debug, Default)]
pub struct Validation<'a> {
    fields: Vec<FieldRules<'a>>,
}

impl<'a> Validation<'a> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn field(mut self, field: FieldRules<'a>) -> Self {
        self.fields.push(field);
        self
    }

    /// Runs every field and collects one failure per failing field.
    pub async fn failures(self) -> Result<Vec<Failure>, AppError> {
        let mut failures = Vec::new();
        for field in self.fields {
            if let Some(failure) = field.evaluate().await? {
                failures.push(failure);
            }
        }
        Ok(failures)
    }

    pub async fn run(self) -> Result<(), AppError> {
        into_result(self.failures().await?)
    }
}

/// Folds a failure list into the request outcome.
pub fn into_result(failures: Vec<Failure>) -> Result<(), AppError> {
    let Some(first) = failures.first() else {
        return Ok(());
    };

    let kind = first.kind.error_kind();
    tracing::debug!(
        fields = ?failures.iter().map(|f| f.field).collect::<Vec<_>>(),
        "Request validation failed"
    );
    Err(AppError::validation(
        kind,
        failures.into_iter().map(|f| f.message).collect(),
    ))
}
