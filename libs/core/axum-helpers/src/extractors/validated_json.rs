//! JSON extractor with validation through the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// `Json<T>` followed by `T::validate()`.
///
/// Malformed bodies and field failures both come back as 400 with the shared
/// error body; field failures list each field under `details`.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct NewProducto {
///     #[validate(length(min = 1))]
///     nombre: String,
/// }
///
/// async fn create(ValidatedJson(input): ValidatedJson<NewProducto>) -> String {
///     input.nombre
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
