//! Property-based tests for price conversion.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::conversion::convert;
use super::plan::{CurrencyRate, PricedProduct, plan_conversions};

/// Strategy to generate non-negative prices (0.00 to 1,000,000.00).
fn price() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to generate a list of currencies with distinct IDs.
fn currencies() -> impl Strategy<Value = Vec<CurrencyRate>> {
    prop::collection::vec(positive_rate(), 1..12).prop_map(|rates| {
        rates
            .into_iter()
            .zip(1..)
            .map(|(exchange_rate, id)| CurrencyRate { id, exchange_rate })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Converted prices are never negative.
    #[test]
    fn prop_convert_non_negative(
        amount in price(),
        base in positive_rate(),
        target in positive_rate(),
    ) {
        let result = convert(amount, base, target).unwrap();
        prop_assert!(result >= Decimal::ZERO, "{} should be non-negative", result);
    }

    /// Converted prices carry at most 2 decimal places.
    #[test]
    fn prop_convert_rounds_to_2_decimals(
        amount in price(),
        base in positive_rate(),
        target in positive_rate(),
    ) {
        let result = convert(amount, base, target).unwrap();
        let scaled = result * Decimal::ONE_HUNDRED;
        prop_assert_eq!(scaled, scaled.trunc(), "{} has more than 2 decimals", result);
    }

    /// Equal rates leave a 2-decimal price unchanged.
    #[test]
    fn prop_equal_rates_identity(
        amount in price(),
        rate in positive_rate(),
    ) {
        prop_assert_eq!(convert(amount, rate, rate).unwrap(), amount);
    }

    /// A product priced in one of N currencies gets exactly N-1 conversions.
    #[test]
    fn prop_plan_covers_all_but_base(
        amount in price(),
        currencies in currencies(),
        pick in any::<prop::sample::Index>(),
    ) {
        let base = currencies[pick.index(currencies.len())];
        let product = PricedProduct { price: amount, currency_id: base.id };

        let plan = plan_conversions(&product, &currencies).unwrap();

        prop_assert_eq!(plan.len(), currencies.len() - 1);
        prop_assert!(plan.iter().all(|p| p.currency_id != base.id));
    }
}
