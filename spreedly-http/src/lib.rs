#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! HTTPS transport for the Spreedly Core payment gateway API.
//!
//! [`SpreedlyClient`] builds each request with [`spreedly::request`],
//! performs one authenticated HTTP exchange with `reqwest`, and parses the
//! XML reply with [`spreedly::response`].
//!
//! # Modules
//!
//! - [`client`] — The [`SpreedlyClient`] and its operations
//! - [`config`] — [`ClientConfig`] with base URL, credentials, and timeout
//! - [`error`] — Transport, parse, and status error types
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing spans around every gateway call
//!
//! # Example
//!
//! ```no_run
//! use rust_decimal::Decimal;
//! use spreedly::Credentials;
//! use spreedly_http::{ClientConfig, SpreedlyClient};
//!
//! # async fn run() -> Result<(), spreedly_http::ClientError> {
//! let config = ClientConfig::new(Credentials::new("login", "secret"))
//!     .with_gateway_token("HBwH9D7x7ZZAFCkwDuP8hAxLDA4");
//! let client = SpreedlyClient::new(config)?;
//!
//! let result = client
//!     .purchase("H38ii6HR7p4rBGp6pGy6LzClR1r", Decimal::new(9405, 2), "order-1", "")
//!     .await?;
//! if !result.succeeded {
//!     eprintln!("declined: {}", result.message);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::SpreedlyClient;
pub use config::ClientConfig;
pub use error::ClientError;
