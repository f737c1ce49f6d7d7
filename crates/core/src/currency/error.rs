//! Currency error types.

use money_shared::{AppError, MoneyError};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during rate lookup and conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    /// The currency has no entry in the rate table.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// A configured rate is not a positive number.
    #[error("Invalid exchange rate for {currency}: {rate}")]
    InvalidRate {
        /// Currency code the rate was given for.
        currency: String,
        /// The rejected rate.
        rate: Decimal,
    },

    /// A currency code in the rate table is malformed.
    #[error(transparent)]
    InvalidCurrency(#[from] MoneyError),

    /// Decimal arithmetic overflowed during conversion.
    #[error("Arithmetic overflow during currency conversion")]
    Overflow,
}

impl CurrencyError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCurrency(_) => "UNKNOWN_CURRENCY",
            Self::InvalidRate { .. } => "INVALID_EXCHANGE_RATE",
            Self::InvalidCurrency(inner) => inner.error_code(),
            Self::Overflow => "OVERFLOW",
        }
    }
}

impl From<CurrencyError> for AppError {
    fn from(err: CurrencyError) -> Self {
        match err {
            CurrencyError::UnknownCurrency(_) => Self::NotFound(err.to_string()),
            CurrencyError::InvalidRate { .. } | CurrencyError::InvalidCurrency(_) => {
                Self::Validation(err.to_string())
            }
            CurrencyError::Overflow => Self::Internal(err.to_string()),
        }
    }
}
