//! Application-wide error types.

use thiserror::Error;
use validator::ValidationErrors;

/// User-facing message for a missing product.
pub const PRODUCT_NOT_FOUND: &str = "Producto no encontrado";

/// Why a request failed authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// Wrong credentials, or the token's user is gone.
    Credentials,
    /// No bearer token on a protected route.
    MissingToken,
    /// Token could not be decoded or verified.
    InvalidToken,
    /// Token is past its expiry.
    TokenExpired,
}

impl AuthFailure {
    /// Error code sent to clients.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Credentials => "unauthorized",
            Self::MissingToken => "missing_token",
            Self::InvalidToken => "invalid_token",
            Self::TokenExpired => "token_expired",
        }
    }
}

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed.
    #[error("Authentication failed: {1}")]
    Unauthorized(AuthFailure, String),

    /// Resource not found. Carries the user-facing message.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request failed field-level validation.
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// A currency carried a non-positive exchange rate.
    #[error("Invalid exchange rate: {0}")]
    InvalidExchangeRate(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Shorthand for the product-not-found error.
    #[must_use]
    pub fn product_not_found() -> Self {
        Self::NotFound(PRODUCT_NOT_FOUND.to_string())
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(..) => 401,
            Self::NotFound(_) => 404,
            Self::Validation(_) | Self::InvalidExchangeRate(_) => 422,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(..) => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidExchangeRate(_) => "INVALID_EXCHANGE_RATE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}
