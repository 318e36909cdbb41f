//! Per-currency product price routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use pricelist_core::product::ProductPriceInput;
use pricelist_db::ProductPriceRepository;
use tracing::info;

use super::products::parse_product_id;
use crate::{AppState, error::ApiError, extractors::JsonBody, middleware::AuthUser};

/// Creates the price routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/products/{id}/prices",
        get(list_prices).post(create_price),
    )
}

/// GET `/products/{id}/prices` - List a product's prices with their currencies.
async fn list_prices(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_product_id(&id)?;
    let prices = ProductPriceRepository::new((*state.db).clone())
        .list_for_product(id)
        .await?;

    Ok((StatusCode::OK, Json(prices)).into_response())
}

/// POST `/products/{id}/prices` - Add a price in one currency.
async fn create_price(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<ProductPriceInput>,
) -> Result<Response, ApiError> {
    let id = parse_product_id(&id)?;
    let price = ProductPriceRepository::new((*state.db).clone())
        .add_price(id, &payload)
        .await?;

    info!(
        product_id = id,
        currency_id = price.currency_id,
        user_id = auth.user_id(),
        "Product price added"
    );
    Ok((StatusCode::CREATED, Json(price)).into_response())
}
