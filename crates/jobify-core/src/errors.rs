//! Application error type and its HTTP representation.
//!
//! Every handler returns `Result<_, AppError>`. The error carries an
//! [`ErrorKind`] that selects the status code, the underlying cause, and,
//! for validation failures, the full list of field messages.
//!
//! Responses always have the shape `{"msg": "..."}`; validation failures add
//! an `"errors": [...]` array. Server errors never leak their cause: the
//! client sees a fixed message and the cause goes to the log.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Message returned to clients for any 5xx response.
pub const INTERNAL_ERROR_MESSAGE: &str = "something went wrong, try again later";

/// Classification of an [`AppError`], one per HTTP status the API emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400 - malformed, missing or invalid input
    BadRequest,
    /// 401 - missing or invalid credentials or session
    Unauthenticated,
    /// 403 - authenticated but not allowed to act on the resource
    Unauthorized,
    /// 404 - referenced resource does not exist
    NotFound,
    /// 429 - rate limit exceeded
    TooManyRequests,
    /// 500 - anything unexpected
    Internal,
}

impl ErrorKind {
    #[inline]
    pub const fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorKind::Unauthorized => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[inline]
    pub const fn is_server_error(self) -> bool {
        matches!(self, ErrorKind::Internal)
    }
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub error: Error,
    /// Individual messages of a failed validation, in evaluation order.
    pub details: Vec<String>,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            error: err.into(),
            details: Vec::new(),
        }
    }

    /// Builds an error from a list of validation messages.
    ///
    /// The top-level message is the messages joined with `", "`.
    pub fn validation(kind: ErrorKind, messages: Vec<String>) -> Self {
        Self {
            kind,
            error: anyhow::anyhow!(messages.join(", ")),
            details: messages,
        }
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::BadRequest, err)
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, anyhow::anyhow!(message.into()))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, anyhow::anyhow!(message.into()))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err)
    }

    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TooManyRequests, anyhow::anyhow!(message.into()))
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::internal(anyhow::anyhow!(message.into()))
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status_code()
    }

    /// The message a client would see for this error.
    pub fn public_message(&self) -> String {
        if self.kind.is_server_error() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.error.to_string()
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.kind.is_server_error() {
            tracing::error!(error = ?self.error, "Unhandled error while processing request");
        }

        let msg = self.public_message();
        let body = if self.details.is_empty() {
            json!({ "msg": msg })
        } else {
            json!({ "msg": msg, "errors": self.details })
        };

        (self.status(), Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
