//! Authentication types for JWT and tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: i32,
    /// User email at the time the token was issued.
    pub email: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: i32, email: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: user_id,
            email: email.to_string(),
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> i32 {
        self.sub
    }
}

/// Token returned after a successful login or registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed access token.
    pub access_token: String,
    /// Always `bearer`.
    pub token_type: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

impl TokenResponse {
    /// Wraps an access token as a bearer token response.
    #[must_use]
    pub fn bearer(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            expires_in,
        }
    }
}

/// Login request payload.
///
/// Fields are optional so missing values surface as validation errors
/// rather than deserialization failures.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginRequest {
    /// User email.
    #[validate(
        required(message = "El campo email es obligatorio."),
        email(message = "El campo email debe ser una dirección de correo válida.")
    )]
    pub email: Option<String>,
    /// User password.
    #[validate(required(message = "El campo password es obligatorio."))]
    pub password: Option<String>,
}

/// Registration request payload.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterRequest {
    /// User display name.
    #[validate(
        required(message = "El campo name es obligatorio."),
        length(min = 1, max = 255, message = "El campo name debe tener entre 1 y 255 caracteres.")
    )]
    pub name: Option<String>,
    /// User email.
    #[validate(
        required(message = "El campo email es obligatorio."),
        email(message = "El campo email debe ser una dirección de correo válida.")
    )]
    pub email: Option<String>,
    /// User password.
    #[validate(
        required(message = "El campo password es obligatorio."),
        length(min = 6, message = "El campo password debe tener al menos 6 caracteres.")
    )]
    pub password: Option<String>,
}

/// Public user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    /// User ID.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

/// Response body for login and registration.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    /// Authenticated user.
    pub user: UserInfo,
    /// Token fields, flattened into the body.
    #[serde(flatten)]
    pub token: TokenResponse,
}
