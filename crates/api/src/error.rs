//! Mapping of application errors onto HTTP responses.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pricelist_db::repositories::{CurrencyError, ProductError, ProductPriceError, UserError};
use pricelist_shared::{AppError, AuthFailure, JwtError};
use sea_orm::DbErr;
use serde_json::{Value, json};
use tracing::{error, warn};
use validator::{ValidationError, ValidationErrors};

/// Message used when a request body cannot be read as a JSON object.
pub const MALFORMED_BODY: &str = "El cuerpo de la solicitud debe ser un objeto JSON válido.";

/// Handler error. Wraps [`AppError`] so it can be returned from axum handlers.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// A 422 for a body that is not valid JSON.
    #[must_use]
    pub fn malformed_body() -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(
            "body",
            ValidationError::new("json").with_message(MALFORMED_BODY.into()),
        );
        Self(AppError::Validation(errors))
    }

    /// A 401 with the given failure code and message.
    #[must_use]
    pub fn unauthorized(failure: AuthFailure, message: &str) -> Self {
        Self(AppError::Unauthorized(failure, message.to_string()))
    }
}

impl From<JwtError> for ApiError {
    fn from(error: JwtError) -> Self {
        match error {
            JwtError::Expired => Self::unauthorized(AuthFailure::TokenExpired, "Token has expired"),
            _ => Self::unauthorized(AuthFailure::InvalidToken, "Invalid or malformed token"),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self(AppError::Validation(errors))
    }
}

impl From<DbErr> for ApiError {
    fn from(error: DbErr) -> Self {
        Self(AppError::Database(error.to_string()))
    }
}

impl From<ProductError> for ApiError {
    fn from(error: ProductError) -> Self {
        Self(error.into())
    }
}

impl From<ProductPriceError> for ApiError {
    fn from(error: ProductPriceError) -> Self {
        Self(error.into())
    }
}

impl From<CurrencyError> for ApiError {
    fn from(error: CurrencyError) -> Self {
        Self(error.into())
    }
}

impl From<UserError> for ApiError {
    fn from(error: UserError) -> Self {
        Self(error.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = match &self.0 {
            AppError::NotFound(message) => json!({
                "status": "error",
                "message": message
            }),
            AppError::Validation(errors) => validation_body(errors),
            AppError::InvalidExchangeRate(rate) => {
                warn!(rate = %rate, "conversion rejected a non-positive exchange rate");
                let mut errors = ValidationErrors::new();
                errors.add(
                    "exchange_rate",
                    ValidationError::new("gt")
                        .with_message("La tasa de cambio debe ser mayor que 0.".into()),
                );
                validation_body(&errors)
            }
            AppError::Unauthorized(failure, message) => json!({
                "error": failure.code(),
                "message": message
            }),
            AppError::Database(_) | AppError::Internal(_) => {
                error!(error = %self.0, code = self.0.error_code(), "request failed");
                json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// `{"message": <first message>, "errors": {field: [messages]}}`, fields in name order.
fn validation_body(errors: &ValidationErrors) -> Value {
    let fields: BTreeMap<String, Vec<String>> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| (field.to_string(), errs.iter().map(message_of).collect()))
        .collect();

    let message = fields
        .values()
        .find_map(|messages| messages.first())
        .cloned()
        .unwrap_or_else(|| "Los datos proporcionados no son válidos.".to_string());

    json!({
        "message": message,
        "errors": fields
    })
}

fn message_of(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map_or_else(|| error.code.to_string(), ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let response = ApiError(AppError::product_not_found()).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({"status": "error", "message": "Producto no encontrado"})
        );
    }

    #[tokio::test]
    async fn test_validation_body_uses_first_field_message() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "price",
            ValidationError::new("numeric").with_message("El campo price debe ser un número.".into()),
        );
        errors.add(
            "name",
            ValidationError::new("required").with_message("El campo name es obligatorio.".into()),
        );

        let response = ApiError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["message"], "El campo name es obligatorio.");
        assert_eq!(body["errors"]["price"][0], "El campo price debe ser un número.");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = ApiError(AppError::Database("connection refused".into())).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"error": "internal_error", "message": "An error occurred"})
        );
    }

    #[tokio::test]
    async fn test_unauthorized_body_carries_failure_code() {
        let response = ApiError::from(JwtError::Expired).into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await,
            json!({"error": "token_expired", "message": "Token has expired"})
        );

        let response = ApiError::from(JwtError::DecodingError("bad".into())).into_response();
        assert_eq!(body_json(response).await["error"], "invalid_token");
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let response = ApiError::malformed_body().into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["errors"]["body"][0], MALFORMED_BODY);
    }

    #[test]
    fn test_message_falls_back_to_code() {
        assert_eq!(message_of(&ValidationError::new("email")), "email");
    }
}
