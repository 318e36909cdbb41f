//! Database seeder for Pricelist development and testing.
//!
//! Seeds the reference currencies, a demo user, demo products and the derived
//! per-currency prices. Currencies and the demo user are only inserted once;
//! products and prices are only seeded into an empty catalog.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use fake::Fake;
use fake::faker::lorem::en::{Sentence, Words};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing::info;

use pricelist_core::auth::hash_password;
use pricelist_core::product::NewProduct;
use pricelist_db::repositories::CreateCurrencyInput;
use pricelist_db::{
    CurrencyRepository, ProductPriceRepository, ProductRepository, UserRepository,
    entities::currencies,
};
use pricelist_shared::AppConfig;

const DEMO_USER_NAME: &str = "Demo User";
const DEMO_USER_EMAIL: &str = "demo@pricelist.dev";
const DEMO_USER_PASSWORD: &str = "password";
const DEMO_PRODUCT_COUNT: usize = 10;

/// Name, symbol and exchange rate (4 decimal places, in ten-thousandths).
const CURRENCIES: [(&str, &str, i64); 3] = [
    ("US Dollar", "USD", 1_0000),
    ("Euro", "EUR", 8500),
    ("Peso Colombiano", "COP", 4000_0000),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seeder=info,pricelist_db=info".into()),
        )
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let db = pricelist_db::connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    let currencies = seed_currencies(&db).await?;
    seed_demo_user(&db).await?;

    if seed_products(&db, &currencies).await? {
        let generated = ProductPriceRepository::new(db.clone())
            .generate_for_all()
            .await?;
        info!(prices = generated, "Seeded product prices");
    }

    info!("Seeding complete");
    Ok(())
}

/// Inserts any missing reference currency and returns every stored currency.
async fn seed_currencies(db: &DatabaseConnection) -> anyhow::Result<Vec<currencies::Model>> {
    let repo = CurrencyRepository::new(db.clone());

    for (name, symbol, rate) in CURRENCIES {
        if repo.find_by_symbol(symbol).await?.is_some() {
            info!(symbol, "Currency already exists, skipping");
            continue;
        }

        let currency = repo
            .create(CreateCurrencyInput {
                name: name.to_string(),
                symbol: symbol.to_string(),
                exchange_rate: Decimal::new(rate, 4),
            })
            .await?;
        info!(symbol, id = currency.id, "Seeded currency");
    }

    Ok(repo.list().await?)
}

async fn seed_demo_user(db: &DatabaseConnection) -> anyhow::Result<()> {
    let repo = UserRepository::new(db.clone());
    if repo.email_exists(DEMO_USER_EMAIL).await? {
        info!(email = DEMO_USER_EMAIL, "Demo user already exists, skipping");
        return Ok(());
    }

    let hash = hash_password(DEMO_USER_PASSWORD)?;
    let user = repo.create(DEMO_USER_NAME, DEMO_USER_EMAIL, &hash).await?;
    info!(user_id = user.id, email = DEMO_USER_EMAIL, "Seeded demo user");
    Ok(())
}

/// Seeds demo products into an empty catalog. Returns whether any were inserted.
async fn seed_products(
    db: &DatabaseConnection,
    currencies: &[currencies::Model],
) -> anyhow::Result<bool> {
    let repo = ProductRepository::new(db.clone());
    if !repo.list(false).await?.is_empty() {
        info!("Products already exist, skipping");
        return Ok(false);
    }

    for index in 0..DEMO_PRODUCT_COUNT {
        let currency = &currencies[index % currencies.len()];
        let words: Vec<String> = Words(1..3).fake();
        let description: String = Sentence(5..12).fake();

        let product = repo
            .insert(NewProduct {
                name: words.join(" "),
                description: Some(description),
                price: Decimal::new((1_000..=100_000).fake::<i64>(), 2),
                currency_id: currency.id,
                tax_cost: Decimal::new((100..=10_000).fake::<i64>(), 2),
                manufacturing_cost: Decimal::new((500..=50_000).fake::<i64>(), 2),
            })
            .await?;
        info!(product_id = product.id, currency = %currency.symbol, "Seeded product");
    }

    Ok(true)
}
