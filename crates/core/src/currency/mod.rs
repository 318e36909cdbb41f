//! Multi-currency price conversion.
//!
//! Every currency carries an exchange rate relative to one reference currency
//! (whose own rate is `1.0000`). Converting between two currencies divides out
//! the base rate and applies the target rate.

pub mod conversion;
pub mod plan;

#[cfg(test)]
mod props;

pub use conversion::{ConversionError, PRICE_DECIMAL_PLACES, convert};
pub use plan::{ConvertedPrice, CurrencyRate, PricedProduct, plan_conversions};
