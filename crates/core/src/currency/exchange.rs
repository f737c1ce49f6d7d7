//! Exchange rate table.
//!
//! Every rate is the number of US dollars one unit of the currency is worth,
//! so converting to USD is a single multiplication. The table is built once
//! and only read afterwards.

use std::collections::BTreeMap;

use money_shared::{Currency, Money};
use once_cell::sync::OnceCell;
use rust_decimal::Decimal;
use tracing::info;

use super::error::CurrencyError;

/// USD = 1, CHF = 0.5
const BUILTIN_RATES: [(Currency, Decimal); 2] = [
    (Currency::USD, Decimal::ONE),
    (Currency::CHF, Decimal::from_parts(5, 0, 0, false, 1)),
];

static GLOBAL: OnceCell<ExchangeRate> = OnceCell::new();

/// Read-only mapping from currency to its value in USD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRate {
    rates: BTreeMap<Currency, Decimal>,
}

impl ExchangeRate {
    /// The built-in table: `USD = 1`, `CHF = 0.5`.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            rates: BUILTIN_RATES.into_iter().collect(),
        }
    }

    /// Builds a table from scratch. `USD = 1` is always present.
    pub fn from_rates<I, S>(rates: I) -> Result<Self, CurrencyError>
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: AsRef<str>,
    {
        let base = Self {
            rates: BTreeMap::from([(Currency::USD, Decimal::ONE)]),
        };
        base.with_rates(rates)
    }

    /// Returns a copy of this table with `rates` added or replaced.
    ///
    /// Every rate must be strictly positive, and a `USD` entry may only
    /// restate the base rate of 1.
    pub fn with_rates<I, S>(mut self, rates: I) -> Result<Self, CurrencyError>
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: AsRef<str>,
    {
        let mut added = 0usize;
        for (code, rate) in rates {
            let currency = Currency::new(code.as_ref())?;
            let is_bad_base = currency == Currency::USD && rate != Decimal::ONE;
            if rate <= Decimal::ZERO || is_bad_base {
                return Err(CurrencyError::InvalidRate {
                    currency: currency.to_string(),
                    rate,
                });
            }
            self.rates.insert(currency, rate);
            added += 1;
        }
        if added > 0 {
            info!(added, total = self.rates.len(), "Exchange rate table extended");
        }
        Ok(self)
    }

    /// Returns the process-wide table, falling back to [`ExchangeRate::builtin`]
    /// when none was installed.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::builtin)
    }

    /// Installs `table` as the process-wide table.
    ///
    /// Only the first call (or a call before the first [`ExchangeRate::global`])
    /// succeeds; the rejected table is handed back.
    pub fn install_global(table: Self) -> Result<(), Self> {
        GLOBAL.set(table)
    }

    /// Returns how many USD one unit of `currency` is worth.
    pub fn rate(&self, currency: Currency) -> Result<Decimal, CurrencyError> {
        self.rates
            .get(&currency)
            .copied()
            .ok_or_else(|| CurrencyError::UnknownCurrency(currency.to_string()))
    }

    /// Same as [`ExchangeRate::rate`] for a raw currency code.
    pub fn rate_for_code(&self, code: &str) -> Result<Decimal, CurrencyError> {
        self.rate(Currency::new(code)?)
    }

    /// Converts the amount of `money` into USD. The result is not rounded.
    pub fn to_usd(&self, money: &Money) -> Result<Decimal, CurrencyError> {
        let rate = self.rate(money.currency())?;
        money
            .amount()
            .checked_mul(rate)
            .ok_or(CurrencyError::Overflow)
    }

    /// Supported currencies in code order.
    pub fn currencies(&self) -> impl Iterator<Item = Currency> + '_ {
        self.rates.keys().copied()
    }

    /// Currency/rate pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (Currency, Decimal)> + '_ {
        self.rates.iter().map(|(currency, rate)| (*currency, *rate))
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self::builtin()
    }
}
