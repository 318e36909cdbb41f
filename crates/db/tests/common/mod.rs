//! Shared helpers for database integration tests.

#![allow(dead_code)]

use pricelist_db::entities::currencies;
use pricelist_db::migration::{Migrator, MigratorTrait};
use pricelist_db::repositories::CreateCurrencyInput;
use pricelist_db::CurrencyRepository;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Opens a fresh in-memory database with all migrations applied.
///
/// A single pooled connection keeps the in-memory database alive and shared.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");
    db
}

/// Seeded currencies: USD, EUR and COP.
pub struct Seeded {
    pub usd: currencies::Model,
    pub eur: currencies::Model,
    pub cop: currencies::Model,
}

/// Inserts the three standard currencies.
pub async fn seed_currencies(db: &DatabaseConnection) -> Seeded {
    let repo = CurrencyRepository::new(db.clone());
    Seeded {
        usd: create_currency(&repo, "US Dollar", "USD", dec!(1.0000)).await,
        eur: create_currency(&repo, "Euro", "EUR", dec!(0.8500)).await,
        cop: create_currency(&repo, "Peso Colombiano", "COP", dec!(4000.0000)).await,
    }
}

async fn create_currency(
    repo: &CurrencyRepository,
    name: &str,
    symbol: &str,
    rate: Decimal,
) -> currencies::Model {
    repo.create(CreateCurrencyInput {
        name: name.to_string(),
        symbol: symbol.to_string(),
        exchange_rate: rate,
    })
    .await
    .expect("Failed to create currency")
}
