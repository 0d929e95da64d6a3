//! Error types for request building and response parsing.
//!
//! Only hard failures live here. A gateway decline is an ordinary
//! [`TransactionResult`](crate::TransactionResult) with `succeeded == false`.

/// The gateway response could not be read as XML.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The body is empty or whitespace only.
    #[error("response body is empty")]
    Empty,

    /// The body is not well-formed XML, or is text with no root element.
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::DeError),
}

/// A major-unit amount could not be expressed in minor units.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// The amount in cents does not fit in a signed 64-bit integer.
    #[error("amount {0} is out of range for minor units")]
    OutOfRange(String),
}

/// A [`GatewayRequest`](crate::GatewayRequest) could not be built or addressed.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The amount could not be converted to minor units.
    #[error("invalid amount: {0}")]
    Amount(#[from] AmountError),

    /// A resource token is empty or a `.`/`..` path segment.
    #[error("token {0:?} cannot be used as a path segment")]
    InvalidToken(String),

    /// A request envelope could not be written as XML.
    #[error("failed to encode request body: {0}")]
    Encode(String),

    /// The configured base URL cannot carry path segments (e.g. `mailto:`).
    #[error("base URL cannot be used as an API root: {0}")]
    UnusableBaseUrl(String),
}
