use rust_decimal::{Decimal, RoundingStrategy};

/// Result of a price computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuote {
    /// Absolute difference between observed and comfortable temperature
    pub deviation: Decimal,
    /// Adjusted price rounded to 2 decimal places
    pub adjusted_price: Decimal,
}

/// Pure calculator for the weather-driven price adjustment.
///
/// The comfortable temperature and adjustment factor are injected at
/// construction (per-deployment configuration, not per request), keeping
/// the calculator deterministic and trivially testable.
#[derive(Debug, Clone)]
pub struct PriceCalculator {
    comfortable_temperature: Decimal,
    adjustment_factor: Decimal,
}

impl PriceCalculator {
    /// Create a new PriceCalculator
    ///
    /// # Arguments
    /// * `comfortable_temperature` - reference temperature with no surcharge
    /// * `adjustment_factor` - price increase per degree of deviation
    pub fn new(comfortable_temperature: Decimal, adjustment_factor: Decimal) -> Self {
        Self {
            comfortable_temperature,
            adjustment_factor,
        }
    }

    pub fn comfortable_temperature(&self) -> Decimal {
        self.comfortable_temperature
    }

    pub fn adjustment_factor(&self) -> Decimal {
        self.adjustment_factor
    }

    /// Compute the price adjustment for an observed temperature.
    ///
    /// `adjusted_price = round2(base_price * (1 + deviation * factor))`
    /// with half-up rounding. Identical inputs always produce identical
    /// output, so a past booking's breakdown can be re-displayed without
    /// drift.
    pub fn compute(&self, base_price: Decimal, temperature: Decimal) -> PriceQuote {
        let deviation = (temperature - self.comfortable_temperature).abs();
        let adjusted_price = (base_price
            * (Decimal::ONE + deviation * self.adjustment_factor))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        PriceQuote {
            deviation,
            adjusted_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn default_calculator() -> PriceCalculator {
        PriceCalculator::new(dec!(21), dec!(0.05))
    }

    #[test]
    fn test_comfortable_temperature_yields_base_price() {
        let quote = default_calculator().compute(dec!(100), dec!(21));
        assert_eq!(quote.deviation, dec!(0));
        assert_eq!(quote.adjusted_price, dec!(100.00));
    }

    #[test]
    fn test_cold_day_surcharge() {
        let quote = default_calculator().compute(dec!(100), dec!(18));
        assert_eq!(quote.deviation, dec!(3));
        assert_eq!(quote.adjusted_price, dec!(115.00));
    }

    #[test]
    fn test_reference_pricing_table() {
        let quote = default_calculator().compute(dec!(250), dec!(15));
        assert_eq!(quote.deviation, dec!(6));
        assert_eq!(quote.adjusted_price, dec!(325.00));
    }

    #[test]
    fn test_hot_day_matches_reference_scenario() {
        // 27°C against a comfortable 21 gives the same 6-degree deviation
        let quote = default_calculator().compute(dec!(250), dec!(27));
        assert_eq!(quote.deviation, dec!(6));
        assert_eq!(quote.adjusted_price, dec!(325.00));
    }

    #[test]
    fn test_fractional_result_rounds_half_up() {
        // 99.99 * (1 + 1 * 0.05) = 104.9895 -> 104.99
        let quote = default_calculator().compute(dec!(99.99), dec!(22));
        assert_eq!(quote.adjusted_price, dec!(104.99));

        // 10.05 * (1 + 1 * 0.05) = 10.5525 -> 10.55
        let quote = default_calculator().compute(dec!(10.05), dec!(20));
        assert_eq!(quote.adjusted_price, dec!(10.55));
    }

    #[test]
    fn test_zero_factor_never_adjusts() {
        let calculator = PriceCalculator::new(dec!(21), dec!(0));
        let quote = calculator.compute(dec!(100), dec!(5));
        assert_eq!(quote.adjusted_price, dec!(100.00));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn calculator() -> PriceCalculator {
        PriceCalculator::new(Decimal::from(21), Decimal::new(5, 2))
    }

    proptest! {
        /// Deviation is never negative, whatever side of the reference
        /// temperature the observation falls on
        #[test]
        fn prop_deviation_is_non_negative(
            base_cents in 0u32..=1_000_000u32,
            temp_tenths in -500i32..=600i32
        ) {
            let base = Decimal::from(base_cents) / Decimal::from(100);
            let temp = Decimal::from(temp_tenths) / Decimal::from(10);
            let quote = calculator().compute(base, temp);
            prop_assert!(quote.deviation >= Decimal::ZERO);
        }

        /// With a non-negative factor the adjusted price never undercuts
        /// the base price
        #[test]
        fn prop_adjusted_price_never_below_base(
            base_cents in 0u32..=1_000_000u32,
            temp_tenths in -500i32..=600i32
        ) {
            let base = Decimal::from(base_cents) / Decimal::from(100);
            let temp = Decimal::from(temp_tenths) / Decimal::from(10);
            let quote = calculator().compute(base, temp);
            // round2 can shave at most half a cent below the exact product,
            // which itself is >= base; compare against the rounded base
            prop_assert!(quote.adjusted_price >= base.round_dp(2) - Decimal::new(1, 2));
        }

        /// Identical inputs always yield identical output
        #[test]
        fn prop_computation_is_deterministic(
            base_cents in 0u32..=1_000_000u32,
            temp_tenths in -500i32..=600i32
        ) {
            let base = Decimal::from(base_cents) / Decimal::from(100);
            let temp = Decimal::from(temp_tenths) / Decimal::from(10);
            let first = calculator().compute(base, temp);
            let second = calculator().compute(base, temp);
            prop_assert_eq!(first, second);
        }

        /// Equal deviations above and below the reference temperature
        /// price identically
        #[test]
        fn prop_deviation_is_symmetric(
            base_cents in 0u32..=1_000_000u32,
            delta_tenths in 0i32..=300i32
        ) {
            let base = Decimal::from(base_cents) / Decimal::from(100);
            let delta = Decimal::from(delta_tenths) / Decimal::from(10);
            let reference = Decimal::from(21);

            let above = calculator().compute(base, reference + delta);
            let below = calculator().compute(base, reference - delta);

            prop_assert_eq!(above, below);
        }

        /// Result always has at most 2 decimal places
        #[test]
        fn prop_adjusted_price_has_two_decimals(
            base_cents in 0u32..=1_000_000u32,
            temp_tenths in -500i32..=600i32
        ) {
            let base = Decimal::from(base_cents) / Decimal::from(100);
            let temp = Decimal::from(temp_tenths) / Decimal::from(10);
            let quote = calculator().compute(base, temp);
            prop_assert_eq!(quote.adjusted_price, quote.adjusted_price.round_dp(2));
        }
    }
}
