//! Request extractors whose rejections are [`ApiFailure`]s

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::api::failure::ApiFailure;

/// `Path` that rejects with `ApiFailure::TypeMismatch`
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(ApiFailure))]
pub struct ApiPath<T>(pub T);

/// `Query` that rejects with `ApiFailure::MissingParameter`
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(ApiFailure))]
pub struct ApiQuery<T>(pub T);

/// JSON body that has passed `validator` checks
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiFailure;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}
