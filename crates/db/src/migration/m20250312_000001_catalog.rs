//! Catalog schema: currencies, products and their per-currency prices.
//!
//! Built with the schema builder so the same migration runs on `PostgreSQL`
//! and on the `SQLite` databases used by the test suites.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Currencies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Currencies::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Currencies::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Currencies::Symbol).string_len(10).not_null())
                    .col(
                        ColumnDef::new(Currencies::ExchangeRate)
                            .decimal_len(12, 4)
                            .not_null()
                            .check(Expr::col(Currencies::ExchangeRate).gt(0)),
                    )
                    .col(timestamp_column(Currencies::CreatedAt))
                    .col(timestamp_column(Currencies::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Products::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Products::Description).text().null())
                    .col(ColumnDef::new(Products::Price).decimal_len(12, 2).not_null())
                    .col(ColumnDef::new(Products::CurrencyId).integer().not_null())
                    .col(ColumnDef::new(Products::TaxCost).decimal_len(12, 2).not_null())
                    .col(
                        ColumnDef::new(Products::ManufacturingCost)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(timestamp_column(Products::CreatedAt))
                    .col(timestamp_column(Products::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_currency")
                            .from(Products::Table, Products::CurrencyId)
                            .to(Currencies::Table, Currencies::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductPrices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductPrices::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProductPrices::ProductId).integer().not_null())
                    .col(ColumnDef::new(ProductPrices::CurrencyId).integer().not_null())
                    .col(
                        ColumnDef::new(ProductPrices::Price)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(timestamp_column(ProductPrices::CreatedAt))
                    .col(timestamp_column(ProductPrices::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_prices_product")
                            .from(ProductPrices::Table, ProductPrices::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_prices_currency")
                            .from(ProductPrices::Table, ProductPrices::CurrencyId)
                            .to(Currencies::Table, Currencies::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Prices are always read per product.
        manager
            .create_index(
                Index::create()
                    .name("idx_product_prices_product")
                    .table(ProductPrices::Table)
                    .col(ProductPrices::ProductId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductPrices::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Currencies::Table).if_exists().to_owned())
            .await
    }
}

fn timestamp_column<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[derive(DeriveIden)]
enum Currencies {
    Table,
    Id,
    Name,
    Symbol,
    ExchangeRate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Description,
    Price,
    CurrencyId,
    TaxCost,
    ManufacturingCost,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProductPrices {
    Table,
    Id,
    ProductId,
    CurrencyId,
    Price,
    CreatedAt,
    UpdatedAt,
}
