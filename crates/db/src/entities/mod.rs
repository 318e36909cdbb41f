//! `SeaORM` entity definitions.

pub mod currencies;
pub mod product_prices;
pub mod products;
pub mod users;
