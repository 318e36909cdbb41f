//! Product price repository: manual prices and batch generation from exchange rates.

use chrono::Utc;
use pricelist_core::currency::{ConversionError, CurrencyRate, PricedProduct, plan_conversions};
use pricelist_core::product::{ProductPriceInput, unknown_currency};
use pricelist_shared::AppError;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::{debug, info};
use validator::ValidationErrors;

use super::currency::{currency_exists, load_rates};
use crate::entities::{currencies, product_prices, products};

/// Error types for product price operations.
#[derive(Debug, thiserror::Error)]
pub enum ProductPriceError {
    /// Owning product not found.
    #[error("Product {0} not found")]
    ProductNotFound(i32),

    /// Payload failed validation.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Price generation failed.
    #[error("Conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ValidationErrors> for ProductPriceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<ProductPriceError> for AppError {
    fn from(error: ProductPriceError) -> Self {
        match error {
            ProductPriceError::ProductNotFound(_) => Self::product_not_found(),
            ProductPriceError::Validation(errors) => Self::Validation(errors),
            ProductPriceError::Conversion(ConversionError::InvalidExchangeRate(rate)) => {
                Self::InvalidExchangeRate(rate.to_string())
            }
            ProductPriceError::Conversion(e) => Self::Internal(e.to_string()),
            ProductPriceError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// A product price with its currency embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductPriceWithCurrency {
    /// Price columns.
    #[serde(flatten)]
    pub price: product_prices::Model,
    /// Currency the price is expressed in.
    pub currency: Option<currencies::Model>,
}

/// Product price repository.
#[derive(Debug, Clone)]
pub struct ProductPriceRepository {
    db: DatabaseConnection,
}

impl ProductPriceRepository {
    /// Creates a new product price repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists a product's prices in ID order, each with its currency.
    ///
    /// # Errors
    ///
    /// Returns `ProductPriceError::ProductNotFound` if the product does not exist.
    pub async fn list_for_product(
        &self,
        product_id: i32,
    ) -> Result<Vec<ProductPriceWithCurrency>, ProductPriceError> {
        find_product(&self.db, product_id).await?;

        let rows = product_prices::Entity::find()
            .filter(product_prices::Column::ProductId.eq(product_id))
            .order_by_asc(product_prices::Column::Id)
            .find_also_related(currencies::Entity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(price, currency)| ProductPriceWithCurrency { price, currency })
            .collect())
    }

    /// Validates and stores a price for a product in one currency.
    ///
    /// Duplicate `(product, currency)` pairs are kept as separate rows.
    ///
    /// # Errors
    ///
    /// Returns `ProductPriceError::ProductNotFound` before validating the
    /// payload, then `ProductPriceError::Validation` for a bad payload or an
    /// unknown currency.
    pub async fn add_price(
        &self,
        product_id: i32,
        input: &ProductPriceInput,
    ) -> Result<product_prices::Model, ProductPriceError> {
        find_product(&self.db, product_id).await?;

        let price = input.validate_new()?;
        if !currency_exists(&self.db, price.currency_id).await? {
            return Err(unknown_currency().into());
        }

        let now = Utc::now().into();
        let model = product_prices::ActiveModel {
            product_id: Set(product_id),
            currency_id: Set(price.currency_id),
            price: Set(price.price),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(model.insert(&self.db).await?)
    }

    /// Derives and stores the product's price in every currency other than its
    /// base currency. All rows are written or none are.
    ///
    /// # Errors
    ///
    /// Returns `ProductPriceError::ProductNotFound` if the product does not
    /// exist, or `ProductPriceError::Conversion` if a rate is unusable.
    pub async fn generate_for_product(
        &self,
        product_id: i32,
    ) -> Result<Vec<product_prices::Model>, ProductPriceError> {
        let txn = self.db.begin().await?;

        let product = find_product(&txn, product_id).await?;
        let rates = load_rates(&txn).await?;
        let created = insert_generated(&txn, &product, &rates).await?;

        txn.commit().await?;
        debug!(product_id, generated = created.len(), "product prices generated");
        Ok(created)
    }

    /// Runs [`Self::generate_for_product`] over every product in one transaction.
    /// Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Returns `ProductPriceError::Conversion` if any product cannot be converted,
    /// in which case nothing is written.
    pub async fn generate_for_all(&self) -> Result<usize, ProductPriceError> {
        let txn = self.db.begin().await?;

        let rates = load_rates(&txn).await?;
        let all = products::Entity::find()
            .order_by_asc(products::Column::Id)
            .all(&txn)
            .await?;

        let mut total = 0;
        for product in &all {
            total += insert_generated(&txn, product, &rates).await?.len();
        }

        txn.commit().await?;
        info!(products = all.len(), prices = total, "generated prices for all products");
        Ok(total)
    }
}

async fn find_product<C: ConnectionTrait>(
    db: &C,
    product_id: i32,
) -> Result<products::Model, ProductPriceError> {
    products::Entity::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(ProductPriceError::ProductNotFound(product_id))
}

async fn insert_generated<C: ConnectionTrait>(
    db: &C,
    product: &products::Model,
    rates: &[CurrencyRate],
) -> Result<Vec<product_prices::Model>, ProductPriceError> {
    let planned = plan_conversions(
        &PricedProduct {
            price: product.price,
            currency_id: product.currency_id,
        },
        rates,
    )?;

    let now = Utc::now().into();
    let mut created = Vec::with_capacity(planned.len());
    for converted in planned {
        let model = product_prices::ActiveModel {
            product_id: Set(product.id),
            currency_id: Set(converted.currency_id),
            price: Set(converted.price),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        created.push(model.insert(db).await?);
    }

    Ok(created)
}
