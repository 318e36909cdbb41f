//! Integration tests for Product repository.

mod common;

use pricelist_core::product::{ProductInput, ProductPriceInput};
use pricelist_db::entities::{product_prices, products};
use pricelist_db::repositories::ProductError;
use pricelist_db::{ProductPriceRepository, ProductRepository};
use rust_decimal_macros::dec;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{Value, json};

fn product_input(value: Value) -> ProductInput {
    serde_json::from_value(value).expect("Failed to build product input")
}

fn valid_payload(currency_id: i32) -> Value {
    json!({
        "name": "Test Create",
        "description": "Description test create.",
        "price": 1455.10,
        "currency_id": currency_id,
        "tax_cost": 15.01,
        "manufacturing_cost": 357.66
    })
}

#[tokio::test]
async fn test_product_create_and_find() {
    let db = common::setup_db().await;
    let seeded = common::seed_currencies(&db).await;
    let repo = ProductRepository::new(db.clone());

    let created = repo
        .create(&product_input(valid_payload(seeded.eur.id)))
        .await
        .expect("Failed to create product");

    assert_eq!(created.name, "Test Create");
    assert_eq!(created.price, dec!(1455.10));

    let found = repo.find(created.id).await.expect("Product should exist");
    assert_eq!(found.product.description.as_deref(), Some("Description test create."));
    assert_eq!(found.product.tax_cost, dec!(15.01));
    assert_eq!(found.product.manufacturing_cost, dec!(357.66));
    assert_eq!(found.currency.map(|c| c.symbol), Some("EUR".to_string()));
}

#[tokio::test]
async fn test_product_list_with_and_without_currency() {
    let db = common::setup_db().await;
    let seeded = common::seed_currencies(&db).await;
    let repo = ProductRepository::new(db.clone());

    for _ in 0..3 {
        repo.create(&product_input(valid_payload(seeded.usd.id)))
            .await
            .expect("Failed to create product");
    }

    let plain = repo.list(false).await.expect("Failed to list products");
    assert_eq!(plain.len(), 3);
    assert!(plain.iter().all(|p| p.currency.is_none()));

    let joined = repo.list(true).await.expect("Failed to list products");
    assert!(joined.iter().all(|p| p.currency.as_ref().is_some_and(|c| c.id == seeded.usd.id)));
    assert!(joined.windows(2).all(|w| w[0].product.id < w[1].product.id));
}

#[tokio::test]
async fn test_product_create_missing_name_persists_nothing() {
    let db = common::setup_db().await;
    let seeded = common::seed_currencies(&db).await;
    let repo = ProductRepository::new(db.clone());

    let payload = json!({
        "price": 10,
        "currency_id": seeded.usd.id,
        "tax_cost": 1,
        "manufacturing_cost": 5
    });

    let result = repo.create(&product_input(payload)).await;
    let Err(ProductError::Validation(errors)) = result else {
        panic!("expected validation error, got {result:?}");
    };
    assert!(errors.field_errors().contains_key("name"));

    let count = products::Entity::find().count(&db).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_product_create_unknown_currency() {
    let db = common::setup_db().await;
    common::seed_currencies(&db).await;
    let repo = ProductRepository::new(db.clone());

    let result = repo.create(&product_input(valid_payload(999))).await;

    let Err(ProductError::Validation(errors)) = result else {
        panic!("expected validation error, got {result:?}");
    };
    assert!(errors.field_errors().contains_key("currency_id"));
}

#[tokio::test]
async fn test_product_update_changes_only_sent_fields() {
    let db = common::setup_db().await;
    let seeded = common::seed_currencies(&db).await;
    let repo = ProductRepository::new(db.clone());

    let created = repo
        .create(&product_input(valid_payload(seeded.usd.id)))
        .await
        .unwrap();

    let updated = repo
        .update(
            created.id,
            &product_input(json!({"name": "Test Update", "price": 1200.50, "id": 77})),
        )
        .await
        .expect("Failed to update product");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Test Update");
    assert_eq!(updated.price, dec!(1200.50));
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.tax_cost, created.tax_cost);
    assert_eq!(updated.currency_id, seeded.usd.id);
}

#[tokio::test]
async fn test_product_update_not_found_has_no_side_effects() {
    let db = common::setup_db().await;
    let seeded = common::seed_currencies(&db).await;
    let repo = ProductRepository::new(db.clone());

    let created = repo
        .create(&product_input(valid_payload(seeded.usd.id)))
        .await
        .unwrap();

    let result = repo
        .update(created.id + 1, &product_input(json!({"name": "Ghost"})))
        .await;
    assert!(matches!(result, Err(ProductError::NotFound(_))));

    let unchanged = repo.find(created.id).await.unwrap();
    assert_eq!(unchanged.product, created);
}

#[tokio::test]
async fn test_product_update_not_found_wins_over_validation() {
    let db = common::setup_db().await;
    let repo = ProductRepository::new(db.clone());

    let result = repo.update(1, &product_input(json!({"name": null}))).await;

    assert!(matches!(result, Err(ProductError::NotFound(1))));
}

#[tokio::test]
async fn test_product_delete_removes_prices() {
    let db = common::setup_db().await;
    let seeded = common::seed_currencies(&db).await;
    let repo = ProductRepository::new(db.clone());
    let prices = ProductPriceRepository::new(db.clone());

    let created = repo
        .create(&product_input(valid_payload(seeded.usd.id)))
        .await
        .unwrap();
    prices.generate_for_product(created.id).await.unwrap();
    let manual: ProductPriceInput =
        serde_json::from_value(json!({"currency_id": seeded.cop.id, "price": 2000})).unwrap();
    prices.add_price(created.id, &manual).await.unwrap();

    repo.delete(created.id).await.expect("Failed to delete product");

    assert!(matches!(repo.find(created.id).await, Err(ProductError::NotFound(_))));
    let remaining = product_prices::Entity::find().count(&db).await.unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn test_product_delete_not_found() {
    let db = common::setup_db().await;
    let repo = ProductRepository::new(db.clone());

    let result = repo.delete(42).await;

    assert!(matches!(result, Err(ProductError::NotFound(42))));
}
