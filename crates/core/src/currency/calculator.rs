//! Money arithmetic across currencies.
//!
//! Two amounts are only ever combined after converting both to USD, so the
//! result of [`Calculator::add`] is always a USD amount.

use money_shared::{Currency, Money};
use rust_decimal::Decimal;
use tracing::debug;

use super::error::CurrencyError;
use super::exchange::ExchangeRate;

/// Stateless calculator bound to a read-only rate table.
#[derive(Debug, Clone, Copy)]
pub struct Calculator<'r> {
    rates: &'r ExchangeRate,
}

impl<'r> Calculator<'r> {
    /// Creates a calculator that converts with `rates`.
    #[must_use]
    pub const fn new(rates: &'r ExchangeRate) -> Self {
        Self { rates }
    }

    /// The table this calculator converts with.
    #[must_use]
    pub const fn rates(&self) -> &'r ExchangeRate {
        self.rates
    }

    /// Adds two amounts, returning the sum in USD.
    ///
    /// `a.amount * rate(a) + b.amount * rate(b)`. Same-currency pairs take the
    /// same path. A failed lookup is returned as-is and nothing is computed.
    pub fn add(&self, a: &Money, b: &Money) -> Result<Money, CurrencyError> {
        let a_usd = self.rates.to_usd(a)?;
        let b_usd = self.rates.to_usd(b)?;
        let total = a_usd.checked_add(b_usd).ok_or(CurrencyError::Overflow)?;
        debug!(%a, %b, %total, "Added money in USD");
        Ok(Money::new(total, Currency::USD))
    }

    /// Adds any number of amounts in USD. An empty input sums to `0 USD`.
    pub fn sum<'m, I>(&self, items: I) -> Result<Money, CurrencyError>
    where
        I: IntoIterator<Item = &'m Money>,
    {
        items
            .into_iter()
            .try_fold(Money::zero(Currency::USD), |acc, item| self.add(&acc, item))
    }

    /// Multiplies `money` by `factor`, keeping its currency.
    ///
    /// Unlike [`Money::scale`] this never panics: an overflowing product is
    /// reported as [`CurrencyError::Overflow`].
    pub fn scale(
        &self,
        money: &Money,
        factor: impl Into<Decimal>,
    ) -> Result<Money, CurrencyError> {
        money.checked_scale(factor).ok_or(CurrencyError::Overflow)
    }
}

impl Default for Calculator<'static> {
    /// Uses the process-wide table.
    fn default() -> Self {
        Self::new(ExchangeRate::global())
    }
}
