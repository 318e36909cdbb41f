//! Product CRUD routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use pricelist_core::product::ProductInput;
use pricelist_db::ProductRepository;
use pricelist_shared::AppError;
use serde_json::json;
use tracing::info;

use crate::{AppState, error::ApiError, extractors::JsonBody, middleware::AuthUser};

/// Creates the product routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product)
                .put(update_product)
                .patch(update_product)
                .delete(delete_product),
        )
}

/// Parses a product ID path segment. Anything that is not an ID cannot name a product.
pub(crate) fn parse_product_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse()
        .map_err(|_| ApiError(AppError::product_not_found()))
}

/// GET `/products` - List all products with their base currency.
async fn list_products(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Response, ApiError> {
    let products = ProductRepository::new((*state.db).clone())
        .list(true)
        .await?;

    Ok((StatusCode::OK, Json(products)).into_response())
}

/// POST `/products` - Create a product.
async fn create_product(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(payload): JsonBody<ProductInput>,
) -> Result<Response, ApiError> {
    let product = ProductRepository::new((*state.db).clone())
        .create(&payload)
        .await?;

    info!(product_id = product.id, user_id = auth.user_id(), "Product created");
    Ok((StatusCode::CREATED, Json(product)).into_response())
}

/// GET `/products/{id}` - Fetch one product.
async fn get_product(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_product_id(&id)?;
    let product = ProductRepository::new((*state.db).clone()).find(id).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "data": product
        })),
    )
        .into_response())
}

/// PUT/PATCH `/products/{id}` - Update the fields present in the body.
async fn update_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<ProductInput>,
) -> Result<Response, ApiError> {
    let id = parse_product_id(&id)?;
    let product = ProductRepository::new((*state.db).clone())
        .update(id, &payload)
        .await?;

    info!(product_id = id, user_id = auth.user_id(), "Product updated");
    Ok((StatusCode::OK, Json(product)).into_response())
}

/// DELETE `/products/{id}` - Delete a product and its prices.
async fn delete_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_product_id(&id)?;
    ProductRepository::new((*state.db).clone())
        .delete(id)
        .await?;

    info!(product_id = id, user_id = auth.user_id(), "Product deleted");
    Ok(StatusCode::NO_CONTENT.into_response())
}
