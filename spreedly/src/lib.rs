#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the Spreedly Core payment gateway API.
//!
//! This crate is transport-free: it knows how to describe a gateway call
//! (URL, HTTP method, XML body) and how to turn the XML the gateway sends
//! back into a [`TransactionResult`]. Performing the HTTPS exchange is left
//! to `spreedly-http` or any other transport.
//!
//! # Modules
//!
//! - [`amount`] - Major-unit to minor-unit (cents) conversion
//! - [`credentials`] - API login and secret used for basic authentication
//! - [`error`] - Parse, amount, and request-building errors
//! - [`request`] - Request builder for every gateway operation
//! - [`response`] - Response parser producing [`TransactionResult`]
//! - [`types`] - Result data model
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation for debugging and monitoring
//!
//! # Example
//!
//! ```rust
//! use spreedly::request::{GatewayRequest, HttpMethod};
//! use spreedly::response::{ResultFields, parse_response};
//!
//! let request = GatewayRequest::retain("H38ii6HR7p4rBGp6pGy6LzClR1r").unwrap();
//! assert_eq!(request.method(), HttpMethod::Put);
//!
//! let xml = "<transaction><succeeded>true</succeeded></transaction>";
//! let result = parse_response(xml, request.method(), ResultFields::HeaderAndPaymentMethod).unwrap();
//! assert!(result.succeeded);
//! ```

pub mod amount;
pub mod credentials;
pub mod error;
pub mod request;
pub mod response;
pub mod types;

pub use amount::{MinorUnits, to_minor_units};
pub use credentials::Credentials;
pub use error::{AmountError, ParseError, RequestError};
pub use request::{GatewayRequest, HttpMethod, Operation};
pub use response::{ResultFields, parse_response};
pub use types::{FieldError, PaymentMethodDetail, ResponseDetail, TransactionResult};
