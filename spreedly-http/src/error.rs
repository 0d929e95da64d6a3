//! Error types for the HTTP client.
//!
//! A declined transaction is not an error: it comes back as
//! `Ok(TransactionResult { succeeded: false, .. })`. These variants cover
//! calls that produced no usable result at all.

use http::StatusCode;
use spreedly::{ParseError, RequestError};

/// Errors that can occur while calling the gateway.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The configured base URL could not be parsed.
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        /// Human-readable context.
        context: &'static str,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// The reqwest client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// The request could not be built.
    #[error("invalid request: {0}")]
    Request(#[from] RequestError),

    /// A purchase was attempted without a configured gateway token.
    #[error("purchase requires a gateway token in the client configuration")]
    MissingGatewayToken,

    /// Network, TLS, connection, or timeout failure.
    #[error("HTTP error: {context}: {source}")]
    Http {
        /// Operation that failed.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be read.
    #[error("Failed to read response body as text: {context}: {source}")]
    ResponseBodyRead {
        /// Operation that failed.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// A successful response did not contain well-formed XML.
    #[error("Failed to parse XML response: {context}: {source}")]
    Parse {
        /// Operation that failed.
        context: &'static str,
        /// The underlying parse error.
        #[source]
        source: ParseError,
    },

    /// A non-success status came back without a parseable XML body.
    #[error("Unexpected HTTP status {status}: {context}: {body}")]
    HttpStatus {
        /// Operation that failed.
        context: &'static str,
        /// The HTTP status code.
        status: StatusCode,
        /// The response body.
        body: String,
    },
}

impl ClientError {
    /// Returns `true` if the failure happened before any response arrived.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::ResponseBodyRead { .. })
    }

    /// Returns `true` if the request timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Http { source, .. } | Self::ResponseBodyRead { source, .. } => source.is_timeout(),
            _ => false,
        }
    }
}
