use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use jobify_core::AppError;

/// JSON body extractor whose rejections are [`AppError`]s.
///
/// Request DTOs default missing string fields to empty, so absence is left
/// to the validation rules. Only a body that cannot be read as the DTO at
/// all is rejected here, always with a single 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

fn rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "missing 'Content-Type: application/json' header".to_string()
        }
        JsonRejection::JsonSyntaxError(_) => "malformed JSON body".to_string(),
        JsonRejection::JsonDataError(_) => "invalid field type in request".to_string(),
        _ => "invalid request body".to_string(),
    }
}

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(rejection = %rejection.body_text(), "Rejected request body");
                AppError::bad_request(anyhow!(rejection_message(&rejection)))
            })?;

        Ok(JsonBody(value))
    }
}
