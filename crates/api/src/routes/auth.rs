//! Authentication routes: login, registration and the current user profile.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use pricelist_core::auth::{hash_password, verify_password};
use pricelist_db::{UserRepository, entities::users};
use pricelist_shared::{
    AppError, AuthFailure, TokenResponse,
    auth::{AuthResponse, LoginRequest, RegisterRequest, UserInfo},
};
use tracing::{error, info};
use validator::Validate;

use crate::{AppState, error::ApiError, extractors::JsonBody, middleware::AuthUser};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Creates the public auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
}

/// Creates the auth routes that require a token.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/user", get(current_user))
}

/// POST /login - Authenticate user and return a token.
async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Response, ApiError> {
    payload.validate()?;
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        return Err(ApiError::unauthorized(AuthFailure::Credentials, INVALID_CREDENTIALS));
    };

    let user_repo = UserRepository::new((*state.db).clone());
    let Some(user) = user_repo.find_by_email(&email).await? else {
        info!(email = %email, "Login attempt for non-existent user");
        return Err(ApiError::unauthorized(AuthFailure::Credentials, INVALID_CREDENTIALS));
    };

    match verify_password(&password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = user.id, "Failed login attempt - invalid password");
            return Err(ApiError::unauthorized(AuthFailure::Credentials, INVALID_CREDENTIALS));
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return Err(AppError::Internal(e.to_string()).into());
        }
    }

    let response = issue_token(&state, user)?;
    info!(user_id = response.user.id, "User logged in successfully");

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// POST /register - Register a new user and return a token.
async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> Result<Response, ApiError> {
    payload.validate()?;
    let (Some(name), Some(email), Some(password)) =
        (payload.name, payload.email, payload.password)
    else {
        return Err(AppError::Internal("validated registration missing a field".into()).into());
    };

    let password_hash = hash_password(&password).map_err(|e| {
        error!(error = %e, "Failed to hash password");
        AppError::Internal(e.to_string())
    })?;

    let user_repo = UserRepository::new((*state.db).clone());
    let user = user_repo.create(name.trim(), &email, &password_hash).await?;
    info!(user_id = user.id, email = %user.email, "New user registered");

    let response = issue_token(&state, user)?;
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// GET /user - Profile of the authenticated user.
async fn current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserInfo>, ApiError> {
    let user = UserRepository::new((*state.db).clone())
        .find_by_id(auth.user_id())
        .await?
        .ok_or_else(|| ApiError::unauthorized(AuthFailure::Credentials, "User no longer exists"))?;

    Ok(Json(user_info(user)))
}

fn issue_token(state: &AppState, user: users::Model) -> Result<AuthResponse, ApiError> {
    let access_token = state
        .jwt_service
        .generate_access_token(user.id, &user.email)
        .map_err(|e| {
            error!(error = %e, "Failed to generate access token");
            AppError::Internal(e.to_string())
        })?;

    Ok(AuthResponse {
        user: user_info(user),
        token: TokenResponse::bearer(access_token, state.jwt_service.access_token_expires_in()),
    })
}

fn user_info(user: users::Model) -> UserInfo {
    UserInfo {
        id: user.id,
        name: user.name,
        email: user.email,
    }
}
