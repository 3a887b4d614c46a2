//! Selling price markup

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{Error, Result};

/// Markup applied when none is configured
pub const DEFAULT_MARKUP_PERCENT: Decimal = Decimal::TEN;

/// A validated, non-negative markup percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markup {
    percent: Decimal,
}

impl Markup {
    /// Creates a markup, rejecting negative percentages.
    pub fn new(percent: Decimal) -> Result<Self> {
        if percent.is_sign_negative() && !percent.is_zero() {
            return Err(Error::Config(format!(
                "Markup must not be negative, got {percent}%"
            )));
        }
        Ok(Self { percent })
    }

    pub fn percent(&self) -> Decimal {
        self.percent
    }

    /// Applies the markup to a base price, rounded to cents.
    ///
    /// A zero markup still rounds, so four-decimal API averages come out as
    /// listable prices. Fails when the marked-up price does not fit a
    /// `Decimal`.
    pub fn apply(&self, base: Decimal) -> Result<Decimal> {
        let factor = Decimal::ONE + self.percent / Decimal::ONE_HUNDRED;
        base.checked_mul(factor).map(round_cents).ok_or_else(|| {
            Error::Config(format!(
                "Markup of {}% on a price of {base} is out of range",
                self.percent
            ))
        })
    }
}

impl Default for Markup {
    fn default() -> Self {
        Self {
            percent: DEFAULT_MARKUP_PERCENT,
        }
    }
}

/// Rounds to two decimal places, midpoint away from zero.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a price with exactly two decimals, e.g. `11.00`.
pub fn format_price(value: Decimal) -> String {
    let mut rounded = round_cents(value);
    rounded.rescale(2);
    rounded.to_string()
}

/// Convenience wrapper: `base * (1 + percent / 100)` rounded to 2 places.
pub fn apply_markup(base: Decimal, percent: Decimal) -> Result<Decimal> {
    Markup::new(percent)?.apply(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn default_is_ten_percent() {
        assert_eq!(Markup::default().apply(dec("10.00")).unwrap(), dec("11.00"));
    }

    #[test]
    fn zero_percent_returns_base_unchanged() {
        let base = dec("10.00");
        assert_eq!(apply_markup(base, Decimal::ZERO).unwrap(), base);
    }

    #[test]
    fn zero_percent_still_rounds_api_precision() {
        assert_eq!(apply_markup(dec("3.1234"), Decimal::ZERO).unwrap(), dec("3.12"));
    }

    #[test]
    fn rounds_to_cents() {
        // 3.1234 * 1.15 = 3.59191
        assert_eq!(apply_markup(dec("3.1234"), dec("15")).unwrap(), dec("3.59"));
    }

    #[test]
    fn rounds_midpoint_away_from_zero() {
        // 0.05 * 1.5 = 0.075
        assert_eq!(apply_markup(dec("0.05"), dec("50")).unwrap(), dec("0.08"));
    }

    #[test]
    fn fractional_percent() {
        // 5.00 * 1.125 = 5.625
        assert_eq!(apply_markup(dec("5.00"), dec("12.5")).unwrap(), dec("5.63"));
    }

    #[test]
    fn fallback_example_price() {
        assert_eq!(apply_markup(dec("5.00"), dec("10")).unwrap(), dec("5.50"));
    }

    #[test]
    fn negative_percent_is_config_error() {
        match Markup::new(dec("-5")) {
            Err(Error::Config(msg)) => assert!(msg.contains("-5")),
            other => panic!("Expected Error::Config, got: {other:?}"),
        }
    }

    #[test]
    fn format_price_pads_to_two_decimals() {
        assert_eq!(format_price(dec("11")), "11.00");
        assert_eq!(format_price(dec("5.5")), "5.50");
        assert_eq!(format_price(dec("3.1250")), "3.13");
    }

    #[test]
    fn overflowing_markup_is_config_error() {
        let result = apply_markup(dec("1000000"), dec("79228162514264337593543950"));
        match result {
            Err(Error::Config(msg)) => assert!(msg.contains("out of range")),
            other => panic!("Expected Error::Config, got: {other:?}"),
        }
    }

    #[test]
    fn negative_zero_is_accepted() {
        assert!(Markup::new(dec("-0")).is_ok());
    }
}
