//! Bearer-token authentication for the product catalog routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use pricelist_shared::{AuthFailure, Claims};
use tracing::debug;

use crate::{AppState, error::ApiError};

const BEARER_REQUIRED: &str = "Authorization header with Bearer token is required";

/// Token part of an `Authorization: Bearer <token>` header value.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(extract_bearer_token)
        .ok_or_else(|| ApiError::unauthorized(AuthFailure::MissingToken, BEARER_REQUIRED))
}

/// Verifies the bearer token and stores its [`Claims`] for [`AuthUser`].
///
/// # Errors
///
/// Responds 401 when the token is missing, malformed or expired.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = {
        let token = bearer_token(request.headers())?;
        state.jwt_service.validate_token(token).inspect_err(|e| {
            debug!(error = %e, path = %request.uri().path(), "rejected bearer token");
        })?
    };

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// The caller a protected handler runs for.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// ID of the authenticated user.
    #[must_use]
    pub const fn user_id(&self) -> i32 {
        self.0.user_id()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError::unauthorized(AuthFailure::MissingToken, BEARER_REQUIRED))
    }
}
