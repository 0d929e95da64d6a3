//! Client configuration.

use std::time::Duration;

use spreedly::Credentials;
use spreedly::request::DEFAULT_BASE_URL;

/// Configuration for [`SpreedlyClient`](crate::SpreedlyClient).
///
/// Constructed once and handed to the client; nothing here is read from
/// the environment.
#[derive(Clone)]
pub struct ClientConfig {
    /// API root (default: `https://spreedlycore.com/v1/`).
    pub base_url: String,

    /// Login and secret for HTTP basic auth.
    pub credentials: Credentials,

    /// Gateway configuration used by purchases. Other operations do not need it.
    pub gateway_token: Option<String>,

    /// Per-request timeout. `None` waits for the transport indefinitely.
    pub timeout: Option<Duration>,

    /// Optional pre-configured reqwest client.
    pub http_client: Option<reqwest::Client>,
}

impl ClientConfig {
    /// Creates a config for the default API root.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            credentials,
            gateway_token: None,
            timeout: None,
            http_client: None,
        }
    }

    /// Sets the API root.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the gateway token used by purchases.
    #[must_use]
    pub fn with_gateway_token(mut self, token: impl Into<String>) -> Self {
        self.gateway_token = Some(token.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets a pre-configured reqwest client.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("gateway_token", &self.gateway_token)
            .field("timeout", &self.timeout)
            .field("has_http_client", &self.http_client.is_some())
            .finish()
    }
}
