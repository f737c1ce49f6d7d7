//! Money kata command line.
//!
//! Adds and scales amounts with the configured exchange rates and lists new
//! bugs from the configured tracker.

use std::process::ExitCode;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use money_core::{Calculator, ExchangeRate};
use money_shared::{AppConfig, AppError, Money};
use money_tracker::{BugSource, BugzillaClient};

/// Currency-aware money arithmetic.
#[derive(Debug, Parser)]
#[command(name = "money", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add two amounts; the result is in USD.
    Add {
        /// First amount, e.g. 9.50
        #[arg(allow_negative_numbers = true)]
        amount: String,
        /// First currency code
        currency: String,
        /// Second amount
        #[arg(allow_negative_numbers = true)]
        other_amount: String,
        /// Second currency code
        other_currency: String,
    },
    /// Multiply an amount by a factor.
    Scale {
        /// Amount to scale
        #[arg(allow_negative_numbers = true)]
        amount: String,
        /// Currency code
        currency: String,
        /// Factor, integer or decimal
        #[arg(allow_negative_numbers = true)]
        factor: String,
    },
    /// Show the USD value of one unit of a currency.
    Rate {
        /// Currency code
        currency: String,
    },
    /// List the whole rate table.
    Rates,
    /// List new bugs from the configured tracker.
    Bugs,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so results on stdout stay clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "money=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            let code = err.downcast_ref::<AppError>().map_or(1, AppError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load().map_err(AppError::from)?;

    let table = ExchangeRate::builtin()
        .with_rates(config.rates.iter().map(|(code, rate)| (code.as_str(), *rate)))
        .map_err(AppError::from)?;
    ExchangeRate::install_global(table)
        .map_err(|_| AppError::Internal("exchange rate table already installed".into()))?;
    let calculator = Calculator::default();

    match cli.command {
        Command::Add {
            amount,
            currency,
            other_amount,
            other_currency,
        } => {
            let a = Money::parse(&amount, &currency).map_err(AppError::from)?;
            let b = Money::parse(&other_amount, &other_currency).map_err(AppError::from)?;
            let total = calculator.add(&a, &b).map_err(AppError::from)?;
            println!("{total}");
        }
        Command::Scale {
            amount,
            currency,
            factor,
        } => {
            let money = Money::parse(&amount, &currency).map_err(AppError::from)?;
            let factor = parse_factor(&factor)?;
            let scaled = calculator.scale(&money, factor).map_err(AppError::from)?;
            println!("{scaled}");
        }
        Command::Rate { currency } => {
            let rate = calculator
                .rates()
                .rate_for_code(&currency)
                .map_err(AppError::from)?;
            println!("1 {} = {rate} USD", currency.trim().to_ascii_uppercase());
        }
        Command::Rates => {
            for (currency, rate) in calculator.rates().iter() {
                println!("{currency}\t{rate}");
            }
        }
        Command::Bugs => {
            let client = BugzillaClient::new(&config.tracker).map_err(AppError::from)?;
            print_bugs(&client).await?;
        }
    }

    Ok(())
}

fn parse_factor(raw: &str) -> Result<Decimal, AppError> {
    Decimal::from_str(raw.trim())
        .or_else(|_| Decimal::from_scientific(raw.trim()))
        .map_err(|_| AppError::Validation(format!("Invalid factor: {raw:?}")))
}

async fn print_bugs(source: &impl BugSource) -> Result<(), AppError> {
    let bugs = source.fetch_new_items().await?;
    info!(count = bugs.len(), "New bugs");
    for bug in bugs {
        let summary = bug.summary.as_deref().unwrap_or("");
        println!("{}\t{}\t{summary}", bug.id, bug.link);
    }
    Ok(())
}
