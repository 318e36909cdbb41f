//! Currency repository.

use chrono::Utc;
use pricelist_core::currency::CurrencyRate;
use pricelist_shared::AppError;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::currencies;

/// Error types for currency operations.
#[derive(Debug, thiserror::Error)]
pub enum CurrencyError {
    /// Rate must be positive.
    #[error("Exchange rate must be positive, got {0}")]
    NonPositiveRate(Decimal),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<CurrencyError> for AppError {
    fn from(error: CurrencyError) -> Self {
        match error {
            CurrencyError::NonPositiveRate(rate) => Self::InvalidExchangeRate(rate.to_string()),
            CurrencyError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating a currency.
#[derive(Debug, Clone)]
pub struct CreateCurrencyInput {
    /// Display name, e.g. "US Dollar".
    pub name: String,
    /// Short code, e.g. "USD".
    pub symbol: String,
    /// Units of this currency per reference unit.
    pub exchange_rate: Decimal,
}

/// Currency repository.
#[derive(Debug, Clone)]
pub struct CurrencyRepository {
    db: DatabaseConnection,
}

impl CurrencyRepository {
    /// Creates a new currency repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all currencies in ID order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<currencies::Model>, DbErr> {
        currencies::Entity::find()
            .order_by_asc(currencies::Column::Id)
            .all(&self.db)
            .await
    }

    /// Finds a currency by its symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_symbol(&self, symbol: &str) -> Result<Option<currencies::Model>, DbErr> {
        currencies::Entity::find()
            .filter(currencies::Column::Symbol.eq(symbol))
            .one(&self.db)
            .await
    }

    /// Creates a currency.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyError::NonPositiveRate` if the rate is zero or negative.
    pub async fn create(
        &self,
        input: CreateCurrencyInput,
    ) -> Result<currencies::Model, CurrencyError> {
        if input.exchange_rate <= Decimal::ZERO {
            return Err(CurrencyError::NonPositiveRate(input.exchange_rate));
        }

        let now = Utc::now().into();
        let currency = currencies::ActiveModel {
            name: Set(input.name),
            symbol: Set(input.symbol),
            exchange_rate: Set(input.exchange_rate),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(currency.insert(&self.db).await?)
    }
}

/// Loads every currency's rate on any connection, including a transaction.
pub(crate) async fn load_rates<C: ConnectionTrait>(db: &C) -> Result<Vec<CurrencyRate>, DbErr> {
    let rows = currencies::Entity::find()
        .order_by_asc(currencies::Column::Id)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|c| CurrencyRate {
            id: c.id,
            exchange_rate: c.exchange_rate,
        })
        .collect())
}

/// Returns true if a currency with this ID exists.
pub(crate) async fn currency_exists<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, DbErr> {
    Ok(currencies::Entity::find_by_id(id).one(db).await?.is_some())
}
