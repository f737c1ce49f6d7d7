//! Multi-currency handling: the exchange rate table and the calculator.

pub mod calculator;
pub mod error;
pub mod exchange;

#[cfg(test)]
mod props;

pub use calculator::Calculator;
pub use error::CurrencyError;
pub use exchange::ExchangeRate;
