//! Batch price generation for a product across all known currencies.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::conversion::{ConversionError, convert};

/// A currency as seen by the conversion engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyRate {
    /// Currency ID.
    pub id: i32,
    /// Rate relative to the reference currency.
    pub exchange_rate: Decimal,
}

/// The pricing facts of a product needed for conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedProduct {
    /// Price in the product's base currency.
    pub price: Decimal,
    /// ID of the base currency.
    pub currency_id: i32,
}

/// A product price expressed in one target currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertedPrice {
    /// Target currency ID.
    pub currency_id: i32,
    /// Price in the target currency, rounded to 2 decimal places.
    pub price: Decimal,
}

/// Computes the product's price in every currency except its own base currency.
///
/// Output order follows the order of `currencies`.
///
/// # Errors
///
/// Returns `ConversionError::BaseCurrencyMissing` if the base currency is not in
/// `currencies`, or any error from [`convert`].
pub fn plan_conversions(
    product: &PricedProduct,
    currencies: &[CurrencyRate],
) -> Result<Vec<ConvertedPrice>, ConversionError> {
    let base = currencies
        .iter()
        .find(|c| c.id == product.currency_id)
        .ok_or(ConversionError::BaseCurrencyMissing(product.currency_id))?;

    currencies
        .iter()
        .filter(|c| c.id != base.id)
        .map(|target| {
            Ok(ConvertedPrice {
                currency_id: target.id,
                price: convert(product.price, base.exchange_rate, target.exchange_rate)?,
            })
        })
        .collect()
}
