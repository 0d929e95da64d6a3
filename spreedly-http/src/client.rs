//! A client for the Spreedly Core transaction API over HTTPS.
//!
//! [`SpreedlyClient`] exposes one method per gateway operation. Each call
//! performs exactly one authenticated HTTP exchange and returns a
//! [`TransactionResult`]. There are no retries, no caching, and no shared
//! mutable state; retry policy belongs to the caller.
//!
//! ## Status handling
//!
//! The gateway reports declines with non-success statuses (typically 422)
//! and a normal XML body, so the body is parsed whatever the status. Only
//! a non-success response whose body is empty or not XML becomes
//! [`ClientError::HttpStatus`]. This holds for `GET` as well: a plain-text
//! 404 or 500 is never read as an empty payment method.
//!
//! ## Features
//!
//! - Integrates with `tracing` if the `telemetry` feature is enabled

use std::fmt::Display;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use rust_decimal::Decimal;
use spreedly::request::XML_CONTENT_TYPE;
use spreedly::{Credentials, GatewayRequest, HttpMethod, TransactionResult, parse_response};
use url::Url;

#[cfg(feature = "telemetry")]
use tracing::{Span, instrument};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Client for the Spreedly Core transaction API.
#[derive(Clone, Debug)]
pub struct SpreedlyClient {
    /// API root, always ending in `/`
    base_url: Url,
    /// Basic-auth credentials sent with each request
    credentials: Credentials,
    /// Gateway configuration used by purchases
    gateway_token: Option<String>,
    /// Shared Reqwest HTTP client
    client: Client,
    /// Optional request timeout
    timeout: Option<Duration>,
}

impl SpreedlyClient {
    /// Constructs a client from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UrlParse`] if the base URL is invalid, or
    /// [`ClientError::Build`] if no HTTP client was supplied and one cannot
    /// be created.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        // Normalize: strip trailing slashes and add a single trailing slash
        let mut normalized = config.base_url.trim_end_matches('/').to_owned();
        normalized.push('/');
        let base_url = Url::parse(&normalized).map_err(|source| ClientError::UrlParse {
            context: "Failed to parse base url",
            source,
        })?;

        let client = match config.http_client {
            Some(client) => client,
            None => Client::builder().build().map_err(ClientError::Build)?,
        };

        Ok(Self {
            base_url,
            credentials: config.credentials,
            gateway_token: config.gateway_token,
            client,
            timeout: config.timeout,
        })
    }

    /// Returns the API root used by this client.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the configured gateway token, if any.
    #[must_use]
    pub fn gateway_token(&self) -> Option<&str> {
        self.gateway_token.as_deref()
    }

    /// Returns the configured timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Charges `amount` dollars to a stored payment method through the
    /// configured gateway.
    ///
    /// `amount` must be in major units; it is sent in cents. Pass empty
    /// strings for `order_id` and `ip_address` when they are not known.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingGatewayToken`] if no gateway token is
    /// configured, and [`ClientError`] on transport or parse failure. A
    /// declined charge is `Ok` with `succeeded == false`.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "spreedly.client.purchase", skip_all, err)
    )]
    pub async fn purchase(
        &self,
        payment_method_token: &str,
        amount: Decimal,
        order_id: &str,
        ip_address: &str,
    ) -> Result<TransactionResult, ClientError> {
        let gateway_token = self
            .gateway_token
            .as_deref()
            .ok_or(ClientError::MissingGatewayToken)?;
        let request = GatewayRequest::purchase(
            gateway_token,
            payment_method_token,
            amount,
            order_id,
            ip_address,
        )?;
        self.execute(&request).await
    }

    /// Credits `amount` dollars against an earlier transaction.
    ///
    /// `ip_address` is accepted but not sent; the credit envelope carries
    /// the amount only.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or parse failure.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "spreedly.client.credit", skip_all, err)
    )]
    pub async fn credit(
        &self,
        transaction_token: &str,
        amount: Decimal,
        ip_address: &str,
    ) -> Result<TransactionResult, ClientError> {
        let request = GatewayRequest::credit(transaction_token, amount, ip_address)?;
        self.execute(&request).await
    }

    /// Marks a stored payment method as kept for reuse.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or parse failure.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "spreedly.client.retain", skip_all, err)
    )]
    pub async fn retain_payment_method(
        &self,
        payment_method_token: &str,
    ) -> Result<TransactionResult, ClientError> {
        self.execute(&GatewayRequest::retain(payment_method_token)?)
            .await
    }

    /// Permanently discards a stored payment method.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or parse failure.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "spreedly.client.redact", skip_all, err)
    )]
    pub async fn redact_payment_method(
        &self,
        payment_method_token: &str,
    ) -> Result<TransactionResult, ClientError> {
        self.execute(&GatewayRequest::redact(payment_method_token)?)
            .await
    }

    /// Fetches a stored payment method.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or parse failure.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "spreedly.client.retrieve", skip_all, err)
    )]
    pub async fn retrieve_payment_method(
        &self,
        payment_method_token: &str,
    ) -> Result<TransactionResult, ClientError> {
        self.execute(&GatewayRequest::retrieve(payment_method_token)?)
            .await
    }

    /// Sends a built request and parses the reply.
    ///
    /// Applies basic auth, the XML content type, and the timeout. `PUT`
    /// requests carry an explicit empty body.
    async fn execute(&self, request: &GatewayRequest) -> Result<TransactionResult, ClientError> {
        let context = request.operation().as_str();
        let method = request.method();
        let url = request.url(&self.base_url)?;

        #[cfg(feature = "telemetry")]
        tracing::debug!(operation = context, %method, path = url.path(), "sending gateway request");

        let mut req = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Put => self.client.put(url).body(""),
            HttpMethod::Post => self
                .client
                .post(url)
                .body(request.body().unwrap_or_default().to_owned()),
        };
        req = req
            .basic_auth(self.credentials.login(), Some(self.credentials.secret()))
            .header(CONTENT_TYPE, XML_CONTENT_TYPE);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let http_response = req
            .send()
            .await
            .map_err(|source| ClientError::Http { context, source })?;
        let status = http_response.status();
        let body = http_response
            .text()
            .await
            .map_err(|source| ClientError::ResponseBodyRead { context, source })?;

        let result = match parse_response(&body, method, request.operation().into()) {
            Ok(result) => Ok(result),
            Err(source) if status.is_success() => Err(ClientError::Parse { context, source }),
            Err(_) => Err(ClientError::HttpStatus {
                context,
                status,
                body,
            }),
        };

        record_result_on_span(&result);

        result
    }
}

/// Records the outcome of a request on a tracing span, including status and errors.
#[cfg(feature = "telemetry")]
fn record_result_on_span<E: Display>(result: &Result<TransactionResult, E>) {
    let span = Span::current();
    match result {
        Ok(outcome) => {
            span.record("otel.status_code", "OK");
            tracing::info!(
                succeeded = outcome.succeeded,
                transaction_type = %outcome.transaction_type,
                "gateway call completed"
            );
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::event!(tracing::Level::ERROR, error = %err, "Request to gateway failed");
        }
    }
}

/// Records the outcome of a request on a tracing span, including status and errors.
/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
fn record_result_on_span<E: Display>(_result: &Result<TransactionResult, E>) {}
