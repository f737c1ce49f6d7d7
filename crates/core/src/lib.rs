//! Core money arithmetic for the money kata.
//!
//! This crate contains pure logic with ZERO network dependencies.
//!
//! # Modules
//!
//! - `currency` - Exchange rate table and currency-converting calculator

pub mod currency;

pub use currency::{Calculator, CurrencyError, ExchangeRate};
