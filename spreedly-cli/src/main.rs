//! Spreedly Core command-line client.
//!
//! # Usage
//!
//! ```bash
//! # Charge $94.05 to a stored card
//! spreedly purchase --payment-method-token H38ii6HR7p4rBGp6pGy6LzClR1r --amount 94.05
//!
//! # Fetch a stored card with a custom config path
//! SPREEDLY_CONFIG=/path/to/spreedly.toml spreedly retrieve H38ii6HR7p4rBGp6pGy6LzClR1r
//!
//! # Configure logging level
//! RUST_LOG=debug spreedly retain H38ii6HR7p4rBGp6pGy6LzClR1r
//! ```
//!
//! # Environment Variables
//!
//! - `SPREEDLY_CONFIG` — Path to TOML configuration file (default: `spreedly.toml`)
//! - `SPREEDLY_LOGIN` / `SPREEDLY_SECRET` — API credentials
//! - `SPREEDLY_GATEWAY_TOKEN` — Gateway used by `purchase`
//! - `SPREEDLY_BASE_URL` — Override the API root
//! - `SPREEDLY_TIMEOUT_SECS` — Per-request timeout
//! - `RUST_LOG` — Log level filter (default: `info`)
//!
//! A `.env` file in the working directory is loaded first.
//!
//! The transaction result is printed to stdout as JSON. A declined
//! transaction still exits with status 0; check `succeeded`.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use spreedly_cli::cli::Cli;
use spreedly_cli::config::CliConfig;
use spreedly_cli::error::CliError;
use spreedly_cli::run_command;
use spreedly_http::SpreedlyClient;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("spreedly failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = CliConfig::load_from(&cli.config)?
        .merge(CliConfig::from(cli.overrides))
        .into_client_config()?;
    tracing::debug!(base_url = %config.base_url, "Loaded configuration");

    let client = SpreedlyClient::new(config)?;
    let result = run_command(&client, cli.command).await?;

    if !result.succeeded {
        tracing::warn!(message = %result.message, "Gateway reported failure");
    }
    print_json(&serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_json(json: &str) {
    println!("{json}");
}
