//! Fixed-point arithmetic settings.
//!
//! Running sums are kept at a configurable number of significant digits
//! (half-even, like a decimal context); cents rounding only happens when a
//! figure is reported.

use rust_decimal::{Decimal, RoundingStrategy};

pub const DEFAULT_SIGNIFICANT_DIGITS: u32 = 12;

/// rust_decimal cannot represent more than 28 significant digits.
const MAX_SIGNIFICANT_DIGITS: u32 = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precision {
    pub significant_digits: u32,
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            significant_digits: DEFAULT_SIGNIFICANT_DIGITS,
        }
    }
}

impl Precision {
    pub fn new(significant_digits: u32) -> Self {
        Self {
            significant_digits: significant_digits.clamp(1, MAX_SIGNIFICANT_DIGITS),
        }
    }

    /// Round to the configured number of significant digits.
    pub fn round(&self, value: Decimal) -> Decimal {
        value
            .round_sf_with_strategy(self.significant_digits, RoundingStrategy::MidpointNearestEven)
            .unwrap_or(value)
    }

    pub fn add(&self, a: Decimal, b: Decimal) -> Decimal {
        self.round(a.saturating_add(b))
    }

    pub fn mul(&self, a: Decimal, b: Decimal) -> Decimal {
        self.round(a.saturating_mul(b))
    }

    pub fn sum<I>(&self, values: I) -> Decimal
    where
        I: IntoIterator<Item = Decimal>,
    {
        values
            .into_iter()
            .fold(Decimal::ZERO, |acc, v| self.add(acc, v))
    }
}

/// Quantize to exactly 2 decimal places, half-even.
pub fn round_cents(value: Decimal) -> Decimal {
    let mut cents = value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    cents.rescale(2);
    cents
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_sum_keeps_cents_exact() {
        let p = Precision::default();
        let total = p.sum([d("0.10"), d("0.20"), d("1024.50")]);
        assert_eq!(total, d("1024.80"));
    }

    #[test]
    fn test_round_to_significant_digits() {
        let p = Precision::new(4);
        assert_eq!(p.round(d("123.456")), d("123.5"));
        assert_eq!(p.add(d("999.9"), d("0.06")), d("1000"));
    }

    #[test]
    fn test_new_clamps_digits() {
        assert_eq!(Precision::new(0).significant_digits, 1);
        assert_eq!(Precision::new(64).significant_digits, 28);
    }

    #[test]
    fn test_round_cents_half_even() {
        assert_eq!(round_cents(d("0.125")), d("0.12"));
        assert_eq!(round_cents(d("0.135")), d("0.14"));
        assert_eq!(round_cents(d("45")).to_string(), "45.00");
    }

    #[test]
    fn test_discount_product() {
        let p = Precision::default();
        assert_eq!(round_cents(p.mul(d("50.00"), d("0.9"))), d("45.00"));
        assert_eq!(round_cents(p.mul(d("1152.50"), d("0.90"))), d("1037.25"));
    }
}
