//! Application configuration management.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Extra or overriding exchange rates (currency code -> units of USD
    /// per unit of currency). Merged over the built-in table at start-up.
    #[serde(default)]
    pub rates: HashMap<String, Decimal>,
    /// Bug tracker client configuration.
    #[serde(default)]
    pub tracker: TrackerConfig,
}

/// Bug tracker client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    /// Base URL of the tracker, without trailing slash.
    #[serde(default = "default_server")]
    pub server: String,
    /// Account whose new bugs are fetched.
    #[serde(default)]
    pub account: String,
    /// Maximum number of bugs per fetch.
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_server() -> String {
    "https://bugzilla.mozilla.org".to_string()
}

fn default_limit() -> u32 {
    10
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            account: String::new(),
            limit: default_limit(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `MONEY_*` environment variables (`MONEY_RATES__EUR=1.1`,
    /// `MONEY_TRACKER__SERVER=...`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("MONEY")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }
}
