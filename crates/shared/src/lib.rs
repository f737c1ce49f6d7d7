//! Shared money types, errors, and configuration for the money kata.
//!
//! This crate provides common types used across all other crates:
//! - Money and currency types with decimal precision
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, TrackerConfig};
pub use error::{AppError, AppResult};
pub use types::{Currency, Money, MoneyError};
