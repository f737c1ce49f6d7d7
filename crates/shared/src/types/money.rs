//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of decimal places shown when a [`Money`] is displayed.
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// Errors raised while constructing money values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Currency code is empty or not a 3-letter code.
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrency(String),

    /// Amount is not a finite decimal number.
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),
}

impl MoneyError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCurrency(_) => "INVALID_CURRENCY",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
        }
    }
}

/// ISO 4217 style currency code (three ASCII letters, upper case).
///
/// Codes are only checked for shape here. Whether a code is actually
/// supported is decided by the exchange rate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency([u8; 3]);

impl Currency {
    /// US Dollar, the base currency of every conversion.
    pub const USD: Self = Self(*b"USD");
    /// Swiss Franc
    pub const CHF: Self = Self(*b"CHF");

    /// Parses and normalises a currency code (`"chf"` becomes `"CHF"`).
    pub fn new(code: &str) -> Result<Self, MoneyError> {
        let trimmed = code.trim();
        let bytes = trimmed.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(MoneyError::InvalidCurrency(code.to_string()));
        }
        Ok(Self([
            bytes[0].to_ascii_uppercase(),
            bytes[1].to_ascii_uppercase(),
            bytes[2].to_ascii_uppercase(),
        ]))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = MoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.as_str().to_string()
    }
}

/// Represents a monetary amount with currency.
///
/// Immutable once built: every operation returns a fresh value. Two values
/// are equal only when both the amount (compared as decimals, so `10` equals
/// `10.00`) and the currency match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates a Money instance from a raw currency code.
    pub fn try_new(amount: Decimal, code: &str) -> Result<Self, MoneyError> {
        Ok(Self::new(amount, Currency::new(code)?))
    }

    /// Parses an amount literal such as `"9.50"` or `"1e3"`.
    ///
    /// Anything that is not a finite decimal (`"NaN"`, `"inf"`, `""`) is
    /// rejected here rather than at first use.
    pub fn parse(amount: &str, code: &str) -> Result<Self, MoneyError> {
        let currency = Currency::new(code)?;
        let trimmed = amount.trim();
        let amount = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| MoneyError::InvalidAmount(amount.to_string()))?;
        Ok(Self::new(amount, currency))
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// The stored amount, never rounded.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// The currency of this amount.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Multiplies the amount by `factor`, keeping the currency.
    ///
    /// No rounding is applied; see the `Display` impl for that.
    ///
    /// # Panics
    ///
    /// Panics if the product overflows `Decimal`. Use
    /// [`Money::checked_scale`] when the factor is untrusted.
    #[must_use]
    pub fn scale(&self, factor: impl Into<Decimal>) -> Self {
        Self::new(self.amount * factor.into(), self.currency)
    }

    /// Like [`Money::scale`] but returns `None` on overflow.
    #[must_use]
    pub fn checked_scale(&self, factor: impl Into<Decimal>) -> Option<Self> {
        self.amount
            .checked_mul(factor.into())
            .map(|amount| Self::new(amount, self.currency))
    }
}

impl fmt::Display for Money {
    /// Renders `"<amount rounded to 2 places> <CODE>"`, e.g. `"10.00 USD"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut shown = self
            .amount
            .round_dp_with_strategy(DISPLAY_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven);
        shown.rescale(DISPLAY_DECIMAL_PLACES);
        if shown.is_zero() {
            shown.set_sign_positive(true);
        }
        write!(f, "{shown} {}", self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn chf(amount: Decimal) -> Money {
        Money::new(amount, Currency::CHF)
    }

    #[test]
    fn test_money_new() {
        let amount = dec!(100.00);
        let money = Money::new(amount, Currency::USD);
        assert_eq!(money.amount(), amount);
        assert_eq!(money.currency(), Currency::USD);
    }

    #[test]
    fn test_money_zero() {
        let money = Money::zero(Currency::CHF);
        assert!(money.is_zero());
        assert_eq!(money.amount(), Decimal::ZERO);
        assert_eq!(money.currency(), Currency::CHF);
    }

    #[test]
    fn test_money_is_negative() {
        assert!(!Money::new(dec!(10), Currency::USD).is_negative());
        assert!(Money::new(dec!(-10), Currency::USD).is_negative());
        assert!(!Money::new(dec!(0), Currency::USD).is_negative());
    }

    #[test]
    fn test_scale_keeps_currency() {
        let five = chf(dec!(5));
        assert_eq!(five.scale(2), chf(dec!(10)));
        assert_eq!(five.scale(3), chf(dec!(15)));
        assert_eq!(five.scale(dec!(0.5)).currency(), Currency::CHF);
    }

    #[test]
    fn test_scale_does_not_round() {
        let money = Money::new(dec!(1), Currency::USD).scale(dec!(0.333));
        assert_eq!(money.amount(), dec!(0.333));
    }

    #[test]
    fn test_checked_scale_overflow() {
        let huge = Money::new(Decimal::MAX, Currency::USD);
        assert!(huge.checked_scale(2).is_none());
        assert_eq!(
            chf(dec!(5)).checked_scale(2),
            Some(chf(dec!(10)))
        );
    }

    #[test]
    fn test_equality() {
        let five = chf(dec!(5));
        assert_eq!(five, five);
        assert_eq!(five, chf(dec!(5.00)));
        assert_ne!(chf(dec!(10)), chf(dec!(11)));
        assert_ne!(five, Money::new(dec!(5), Currency::USD));
    }

    #[rstest]
    #[case(dec!(1), "1.00 USD")]
    #[case(dec!(10), "10.00 USD")]
    #[case(dec!(9.5), "9.50 USD")]
    #[case(dec!(0.125), "0.12 USD")]
    #[case(dec!(0.135), "0.14 USD")]
    #[case(dec!(-3.999), "-4.00 USD")]
    #[case(dec!(-0.001), "0.00 USD")]
    fn test_display(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(Money::new(amount, Currency::USD).to_string(), expected);
    }

    #[test]
    fn test_display_leaves_amount_untouched() {
        let money = Money::new(dec!(1.005), Currency::USD);
        let _ = money.to_string();
        assert_eq!(money.amount(), dec!(1.005));
    }

    #[rstest]
    #[case("USD", Currency::USD)]
    #[case("usd", Currency::USD)]
    #[case(" chf ", Currency::CHF)]
    fn test_currency_from_str(#[case] code: &str, #[case] expected: Currency) {
        assert_eq!(Currency::from_str(code).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("US")]
    #[case("USDX")]
    #[case("U5D")]
    fn test_currency_rejects_bad_codes(#[case] code: &str) {
        assert_eq!(
            Currency::new(code),
            Err(MoneyError::InvalidCurrency(code.to_string()))
        );
    }

    #[test]
    fn test_currency_display() {
        assert_eq!(Currency::USD.to_string(), "USD");
        assert_eq!(Currency::new("eur").unwrap().as_str(), "EUR");
    }

    #[test]
    fn test_money_parse() {
        let money = Money::parse("9.50", "usd").unwrap();
        assert_eq!(money, Money::new(dec!(9.5), Currency::USD));
        assert_eq!(Money::parse("1e3", "CHF").unwrap(), chf(dec!(1000)));
    }

    #[rstest]
    #[case("NaN")]
    #[case("inf")]
    #[case("")]
    #[case("ten")]
    fn test_money_parse_rejects_non_finite(#[case] amount: &str) {
        assert_eq!(
            Money::parse(amount, "USD"),
            Err(MoneyError::InvalidAmount(amount.to_string()))
        );
    }

    #[test]
    fn test_money_parse_checks_currency_first() {
        assert!(matches!(
            Money::parse("1", ""),
            Err(MoneyError::InvalidCurrency(_))
        ));
    }

    #[test]
    fn test_money_serde() {
        let money = Money::new(dec!(12.34), Currency::CHF);
        let json = serde_json::to_value(money).unwrap();
        assert_eq!(json["currency"], "CHF");
        assert_eq!(json["amount"], "12.34");

        let bad = serde_json::json!({ "amount": "1", "currency": "dollars" });
        assert!(serde_json::from_value::<Money>(bad).is_err());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            MoneyError::InvalidCurrency(String::new()).error_code(),
            "INVALID_CURRENCY"
        );
        assert_eq!(
            MoneyError::InvalidAmount(String::new()).error_code(),
            "INVALID_AMOUNT"
        );
    }
}
