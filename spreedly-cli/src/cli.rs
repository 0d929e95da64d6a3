//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use crate::config::CliConfig;

/// Call the Spreedly Core payment gateway API and print the result as JSON.
#[derive(Debug, Parser)]
#[command(name = "spreedly", version, about)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, env = "SPREEDLY_CONFIG", default_value = "spreedly.toml", global = true)]
    pub config: PathBuf,

    /// Settings that override the configuration file.
    #[command(flatten)]
    pub overrides: Overrides,

    /// Operation to perform.
    #[command(subcommand)]
    pub command: Command,
}

/// Connection settings accepted as flags or environment variables.
#[derive(Debug, Clone, Default, Args)]
pub struct Overrides {
    /// API root URL.
    #[arg(long, env = "SPREEDLY_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// API login.
    #[arg(long, env = "SPREEDLY_LOGIN", global = true)]
    pub login: Option<String>,

    /// API secret.
    #[arg(long, env = "SPREEDLY_SECRET", global = true, hide_env_values = true)]
    pub secret: Option<String>,

    /// Gateway token used by `purchase`.
    #[arg(long, env = "SPREEDLY_GATEWAY_TOKEN", global = true)]
    pub gateway_token: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "SPREEDLY_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,
}

impl From<Overrides> for CliConfig {
    fn from(overrides: Overrides) -> Self {
        Self {
            base_url: overrides.base_url,
            login: overrides.login,
            secret: overrides.secret,
            gateway_token: overrides.gateway_token,
            timeout_secs: overrides.timeout_secs,
        }
    }
}

/// Gateway operations.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Charge a stored payment method.
    Purchase {
        /// Payment method token.
        #[arg(long)]
        payment_method_token: String,
        /// Amount in dollars, e.g. `94.05`.
        #[arg(long)]
        amount: Decimal,
        /// Order identifier.
        #[arg(long, default_value = "")]
        order_id: String,
        /// Customer IP address.
        #[arg(long, default_value = "")]
        ip: String,
    },
    /// Refund money against an earlier transaction.
    Credit {
        /// Transaction token.
        #[arg(long)]
        transaction_token: String,
        /// Amount in dollars, e.g. `10.00`.
        #[arg(long)]
        amount: Decimal,
        /// Customer IP address (accepted but not sent).
        #[arg(long, default_value = "")]
        ip: String,
    },
    /// Keep a stored payment method for reuse.
    Retain {
        /// Payment method token.
        token: String,
    },
    /// Permanently discard a stored payment method.
    Redact {
        /// Payment method token.
        token: String,
    },
    /// Fetch a stored payment method.
    Retrieve {
        /// Payment method token.
        token: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_purchase() {
        let cli = Cli::try_parse_from([
            "spreedly",
            "--config",
            "custom.toml",
            "purchase",
            "--payment-method-token",
            "abc",
            "--amount",
            "94.05",
            "--order-id",
            "O1",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        match cli.command {
            Command::Purchase {
                payment_method_token,
                amount,
                order_id,
                ip,
            } => {
                assert_eq!(payment_method_token, "abc");
                assert_eq!(amount, dec!(94.05));
                assert_eq!(order_id, "O1");
                assert_eq!(ip, "");
            }
            other => panic!("expected purchase, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_retrieve_with_overrides() {
        let cli = Cli::try_parse_from([
            "spreedly",
            "retrieve",
            "pm1",
            "--login",
            "l",
            "--timeout-secs",
            "3",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Retrieve { ref token } if token == "pm1"));
        let config = CliConfig::from(cli.overrides);
        assert_eq!(config.login.as_deref(), Some("l"));
        assert_eq!(config.timeout_secs, Some(3));
    }

    #[test]
    fn test_invalid_amount_is_rejected() {
        let result = Cli::try_parse_from([
            "spreedly",
            "credit",
            "--transaction-token",
            "t",
            "--amount",
            "ten",
        ]);
        assert!(result.is_err());
    }
}
