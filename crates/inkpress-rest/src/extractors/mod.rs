//! Extractors that report malformed input through the API envelope.
//!
//! Axum's own `Json` and `Query` rejections answer with plain text; these
//! wrappers turn them into `VALIDATION_ERROR` responses instead. Field
//! validation itself happens in the service layer.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use inkpress_core::InkpressError;
use serde::de::DeserializeOwned;

/// JSON body extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError(InkpressError::validation(rejection.body_text())))?;
        Ok(Self(value))
    }
}

/// Query string extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError(InkpressError::validation(rejection.body_text())))?;
        Ok(Self(value))
    }
}
