//! Product repository.
//!
//! Every write validates its payload first and checks that the referenced
//! currency exists, so a rejected request never touches the database.

use chrono::Utc;
use pricelist_core::product::{NewProduct, ProductChanges, ProductInput, unknown_currency};
use pricelist_shared::AppError;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::debug;
use validator::ValidationErrors;

use super::currency::currency_exists;
use crate::entities::{currencies, product_prices, products};

/// Error types for product operations.
#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    /// Product not found.
    #[error("Product {0} not found")]
    NotFound(i32),

    /// Payload failed validation.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ValidationErrors> for ProductError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<ProductError> for AppError {
    fn from(error: ProductError) -> Self {
        match error {
            ProductError::NotFound(_) => Self::product_not_found(),
            ProductError::Validation(errors) => Self::Validation(errors),
            ProductError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// A product, optionally with its base currency embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductWithCurrency {
    /// Product columns.
    #[serde(flatten)]
    pub product: products::Model,
    /// Base currency, when loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<currencies::Model>,
}

/// Product repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    db: DatabaseConnection,
}

impl ProductRepository {
    /// Creates a new product repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists every product in ID order, with its base currency if requested.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, with_currency: bool) -> Result<Vec<ProductWithCurrency>, DbErr> {
        let query = products::Entity::find().order_by_asc(products::Column::Id);

        if !with_currency {
            let rows = query.all(&self.db).await?;
            return Ok(rows
                .into_iter()
                .map(|product| ProductWithCurrency {
                    product,
                    currency: None,
                })
                .collect());
        }

        let rows = query
            .find_also_related(currencies::Entity)
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(product, currency)| ProductWithCurrency { product, currency })
            .collect())
    }

    /// Fetches one product with its base currency.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::NotFound` if no product has this ID.
    pub async fn find(&self, id: i32) -> Result<ProductWithCurrency, ProductError> {
        products::Entity::find_by_id(id)
            .find_also_related(currencies::Entity)
            .one(&self.db)
            .await?
            .map(|(product, currency)| ProductWithCurrency { product, currency })
            .ok_or(ProductError::NotFound(id))
    }

    /// Validates and stores a new product.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::Validation` if the payload is invalid or names an
    /// unknown currency.
    pub async fn create(&self, input: &ProductInput) -> Result<products::Model, ProductError> {
        let product = input.validate_new()?;
        self.insert(product).await
    }

    /// Stores an already validated product.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::Validation` if the currency does not exist.
    pub async fn insert(&self, product: NewProduct) -> Result<products::Model, ProductError> {
        if !currency_exists(&self.db, product.currency_id).await? {
            return Err(unknown_currency().into());
        }

        let now = Utc::now().into();
        let model = products::ActiveModel {
            name: Set(product.name),
            description: Set(product.description),
            price: Set(product.price),
            currency_id: Set(product.currency_id),
            tax_cost: Set(product.tax_cost),
            manufacturing_cost: Set(product.manufacturing_cost),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model.insert(&self.db).await?;
        debug!(product_id = created.id, "product created");
        Ok(created)
    }

    /// Applies the fields present in `input` to an existing product.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::NotFound` before any validation if the product
    /// does not exist, then `ProductError::Validation` for a bad payload.
    pub async fn update(
        &self,
        id: i32,
        input: &ProductInput,
    ) -> Result<products::Model, ProductError> {
        let existing = products::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        let changes = input.validate_changes()?;
        self.apply(existing, changes).await
    }

    async fn apply(
        &self,
        existing: products::Model,
        changes: ProductChanges,
    ) -> Result<products::Model, ProductError> {
        if let Some(currency_id) = changes.currency_id
            && !currency_exists(&self.db, currency_id).await?
        {
            return Err(unknown_currency().into());
        }

        let mut model: products::ActiveModel = existing.into();
        if let Some(name) = changes.name {
            model.name = Set(name);
        }
        if let Some(description) = changes.description {
            model.description = Set(description);
        }
        if let Some(price) = changes.price {
            model.price = Set(price);
        }
        if let Some(currency_id) = changes.currency_id {
            model.currency_id = Set(currency_id);
        }
        if let Some(tax_cost) = changes.tax_cost {
            model.tax_cost = Set(tax_cost);
        }
        if let Some(manufacturing_cost) = changes.manufacturing_cost {
            model.manufacturing_cost = Set(manufacturing_cost);
        }
        model.updated_at = Set(Utc::now().into());

        Ok(model.update(&self.db).await?)
    }

    /// Deletes a product together with all of its prices.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::NotFound` if no product has this ID.
    pub async fn delete(&self, id: i32) -> Result<(), ProductError> {
        let txn = self.db.begin().await?;

        if products::Entity::find_by_id(id).one(&txn).await?.is_none() {
            return Err(ProductError::NotFound(id));
        }

        let prices = product_prices::Entity::delete_many()
            .filter(product_prices::Column::ProductId.eq(id))
            .exec(&txn)
            .await?;
        products::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        debug!(
            product_id = id,
            prices_removed = prices.rows_affected,
            "product deleted"
        );
        Ok(())
    }
}
