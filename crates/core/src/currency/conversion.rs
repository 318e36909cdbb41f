//! Currency conversion logic.
//!
//! Rounding: prices are rounded to 2 decimal places with the midpoint rounded
//! away from zero (`0.125 -> 0.13`), matching how historical price rows were
//! generated.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Decimal places kept on every converted price.
pub const PRICE_DECIMAL_PLACES: u32 = 2;

/// Errors raised by the conversion engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// An exchange rate was zero or negative.
    #[error("exchange rate must be positive, got {0}")]
    InvalidExchangeRate(Decimal),

    /// The product's base currency is not among the known currencies.
    #[error("base currency {0} not found among known currencies")]
    BaseCurrencyMissing(i32),

    /// The converted value does not fit in a decimal.
    #[error("converted price overflowed")]
    Overflow,
}

/// Converts `base_price` from a currency with `base_rate` into a currency with
/// `target_rate`.
///
/// Computes `base_price * (target_rate / base_rate)` and rounds the result to
/// [`PRICE_DECIMAL_PLACES`].
///
/// # Errors
///
/// Returns `ConversionError::InvalidExchangeRate` if either rate is not
/// positive, and `ConversionError::Overflow` if the result does not fit.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use pricelist_core::currency::convert;
///
/// let cop = convert(dec!(100), dec!(1.0000), dec!(4000.0000)).unwrap();
/// assert_eq!(cop, dec!(400000.00));
/// ```
pub fn convert(
    base_price: Decimal,
    base_rate: Decimal,
    target_rate: Decimal,
) -> Result<Decimal, ConversionError> {
    if base_rate <= Decimal::ZERO {
        return Err(ConversionError::InvalidExchangeRate(base_rate));
    }
    if target_rate <= Decimal::ZERO {
        return Err(ConversionError::InvalidExchangeRate(target_rate));
    }

    let factor = target_rate
        .checked_div(base_rate)
        .ok_or(ConversionError::Overflow)?;
    let converted = base_price
        .checked_mul(factor)
        .ok_or(ConversionError::Overflow)?;

    Ok(converted.round_dp_with_strategy(PRICE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero))
}
