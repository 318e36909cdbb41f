//! Request extractors.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;

/// JSON object body extractor whose rejection is a 422 validation response.
///
/// Anything but a top-level object is refused before `T` is built, so
/// sequences never fill struct fields by position.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = match Json::<Value>::from_request(req, state).await {
            Ok(Json(value @ Value::Object(_))) => value,
            Ok(Json(other)) => {
                debug!(kind = json_kind(&other), "rejected non-object request body");
                return Err(ApiError::malformed_body());
            }
            Err(rejection) => {
                debug!(reason = %rejection.body_text(), "rejected request body");
                return Err(ApiError::malformed_body());
            }
        };

        serde_json::from_value(value).map(Self).map_err(|e| {
            debug!(error = %e, "request body does not match the expected shape");
            ApiError::malformed_body()
        })
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
