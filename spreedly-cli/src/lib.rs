//! Command-line client for the Spreedly Core payment gateway API.
//!
//! # Modules
//!
//! - [`cli`] — Clap argument definitions
//! - [`config`] — TOML configuration with environment variable expansion
//! - [`error`] — Configuration and run errors

pub mod cli;
pub mod config;
pub mod error;

use spreedly::TransactionResult;
use spreedly_http::{ClientError, SpreedlyClient};

use crate::cli::Command;

/// Runs one gateway operation.
///
/// # Errors
///
/// Returns [`ClientError`] if the call produced no result. Declines are `Ok`.
pub async fn run_command(
    client: &SpreedlyClient,
    command: Command,
) -> Result<TransactionResult, ClientError> {
    match command {
        Command::Purchase {
            payment_method_token,
            amount,
            order_id,
            ip,
        } => {
            client
                .purchase(&payment_method_token, amount, &order_id, &ip)
                .await
        }
        Command::Credit {
            transaction_token,
            amount,
            ip,
        } => client.credit(&transaction_token, amount, &ip).await,
        Command::Retain { token } => client.retain_payment_method(&token).await,
        Command::Redact { token } => client.redact_payment_method(&token).await,
        Command::Retrieve { token } => client.retrieve_payment_method(&token).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use spreedly::Credentials;
    use spreedly_http::ClientConfig;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> SpreedlyClient {
        let config = ClientConfig::new(Credentials::new("login", "secret"))
            .with_base_url(server.uri())
            .with_gateway_token("gw");
        SpreedlyClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_purchase_command() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/gateways/gw/purchase.xml"))
            .and(body_string_contains("<amount>1999</amount>"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<transaction><succeeded>true</succeeded><message>Succeeded!</message></transaction>",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let command = Command::Purchase {
            payment_method_token: "abc".into(),
            amount: dec!(19.99),
            order_id: String::new(),
            ip: String::new(),
        };
        let result = run_command(&client_for(&server), command).await.unwrap();
        assert!(result.succeeded);
        assert_eq!(result.message, "Succeeded!");
    }

    #[tokio::test]
    async fn test_redact_command() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/payment_methods/pm1/redact.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<transaction><succeeded>true</succeeded><transaction_type>RedactPaymentMethod</transaction_type></transaction>",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let result = run_command(&client_for(&server), Command::Redact { token: "pm1".into() })
            .await
            .unwrap();
        assert_eq!(result.transaction_type, "RedactPaymentMethod");
    }
}
