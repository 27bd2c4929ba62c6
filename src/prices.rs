//! Prices

use std::{fmt, ops::Deref};

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Deserializer, Serialize, de};
use thiserror::Error;

/// Amounts that cannot be read as a [`Price`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price {0} is negative")]
    Negative(Decimal),

    /// The amount does not fit in a `u64`.
    #[error("price {0} is too large")]
    TooLarge(Decimal),
}

/// A non-negative amount in the minor unit of the storefront currency.
///
/// Serializes as a bare integer. Deserializes from any JSON number or
/// numeric string, so numeric columns such as `4500.00` are accepted.
/// Fractions of a minor unit are rounded half away from zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Price {
    value: u64,
}

impl Price {
    /// Zero.
    pub const ZERO: Price = Price { value: 0 };

    /// Creates a new Price
    pub const fn new(value: u64) -> Self {
        Price { value }
    }

    /// Price of `quantity` units, saturating at `u64::MAX`.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Price::new(self.value.saturating_mul(u64::from(quantity)))
    }

    /// Sum of two prices, saturating at `u64::MAX`.
    #[must_use]
    pub fn plus(self, other: Price) -> Self {
        Price::new(self.value.saturating_add(other.value))
    }

    /// Apply a percentage discount (0 to 100), rounding half away from zero.
    ///
    /// Percentages outside that range are clamped.
    #[must_use]
    pub fn discounted(self, percent: Decimal) -> Self {
        let percent = percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);

        let Some(value) = Decimal::from_u64(self.value) else {
            return self;
        };

        let remaining = Decimal::ONE_HUNDRED - percent;

        let discounted = value
            .checked_mul(remaining)
            .and_then(|applied| applied.checked_div(Decimal::ONE_HUNDRED))
            .map(|applied| applied.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|applied| applied.to_u64());

        discounted.map_or(self, Price::new)
    }

    /// View the amount as money in the given currency.
    pub fn to_money(self, currency: &'static Currency) -> Money<'static, Currency> {
        let minor = i64::try_from(self.value).unwrap_or(i64::MAX);

        Money::from_minor(minor, currency)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }

        amount
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
            .map(Price::new)
            .ok_or(PriceError::TooLarge(amount))
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = <Decimal as Deserialize<'de>>::deserialize(deserializer)?;

        Price::try_from(amount).map_err(de::Error::custom)
    }
}

impl Deref for Price {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Price::new(value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn new_price() {
        let price = Price::new(1000);

        assert_eq!(price.value, 1000);
    }

    #[test]
    fn price_derefs_to_u64() {
        let price = Price { value: 100 };

        assert_eq!(*price, 100);
    }

    #[test]
    fn times_saturates_instead_of_overflowing() {
        assert_eq!(Price::new(5_000).times(2), Price::new(10_000));
        assert_eq!(Price::new(u64::MAX).times(2), Price::new(u64::MAX));
    }

    #[test]
    fn discounted_applies_percentage() {
        assert_eq!(Price::new(10_000).discounted(Decimal::from(15)), Price::new(8_500));
        assert_eq!(Price::new(999).discounted(Decimal::from(50)), Price::new(500));
    }

    #[test]
    fn discounted_clamps_out_of_range_percentages() {
        assert_eq!(Price::new(10_000).discounted(Decimal::from(150)), Price::ZERO);
        assert_eq!(Price::new(10_000).discounted(Decimal::from(-5)), Price::new(10_000));
    }

    #[test]
    fn deserializes_integers_and_numeric_columns() -> TestResult {
        assert_eq!(serde_json::from_str::<Price>("4500")?, Price::new(4_500));
        assert_eq!(serde_json::from_str::<Price>("4500.00")?, Price::new(4_500));
        assert_eq!(serde_json::from_str::<Price>(r#""4500.00""#)?, Price::new(4_500));

        Ok(())
    }

    #[test]
    fn fractional_amounts_round_half_away_from_zero() -> TestResult {
        assert_eq!(serde_json::from_str::<Price>("4500.5")?, Price::new(4_501));
        assert_eq!(serde_json::from_str::<Price>("4500.49")?, Price::new(4_500));

        Ok(())
    }

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(serde_json::from_str::<Price>("-1").is_err());
        assert!(serde_json::from_str::<Price>("-0.5").is_err());
        assert_eq!(
            Price::try_from(Decimal::from(-3)),
            Err(PriceError::Negative(Decimal::from(-3)))
        );
    }

    #[test]
    fn serializes_as_a_bare_integer() -> TestResult {
        assert_eq!(serde_json::to_string(&Price::new(4_500))?, "4500");

        Ok(())
    }

    #[test]
    fn to_money_uses_minor_units() {
        assert_eq!(
            Price::new(12_345).to_money(iso::COP),
            Money::from_minor(12_345, iso::COP)
        );
    }
}
