//! Request body extraction with the application's error contract.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use lovelock_core::error::CoreError;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON body extractor whose rejections render as [`AppError`].
///
/// Axum's own [`Json`] answers a malformed body with a plain-text 4xx.
/// Handlers take `ValidJson<T>` instead so that a missing field or a wrong
/// type comes back as the usual `{ "error", "code" }` body.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ValidJson(value))
    }
}

impl From<JsonRejection> for AppError {
    /// Well-formed JSON of the wrong shape is a validation failure. Anything
    /// that is not JSON at all is a bad request.
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                AppError::Core(CoreError::Validation(err.body_text()))
            }
            other => AppError::BadRequest(other.body_text()),
        }
    }
}
