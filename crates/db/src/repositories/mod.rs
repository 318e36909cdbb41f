//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod currency;
pub mod product;
pub mod product_price;
pub mod user;

pub use currency::{CreateCurrencyInput, CurrencyError, CurrencyRepository};
pub use product::{ProductError, ProductRepository, ProductWithCurrency};
pub use product_price::{ProductPriceError, ProductPriceRepository, ProductPriceWithCurrency};
pub use user::{UserError, UserRepository};
