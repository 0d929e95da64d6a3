//! Request builder for the Spreedly Core API.
//!
//! A [`GatewayRequest`] describes one call: the operation, HTTP method,
//! path below the API root, and (for `POST`) the XML body. It performs no
//! I/O. Resolve it against a base URL with [`GatewayRequest::url`].
//!
//! Tokens go into the path as single percent-encoded segments. Empty, `.`
//! and `..` tokens are rejected, since they would address another resource.
//!
//! | Operation | Method | Path | Body |
//! |---|---|---|---|
//! | purchase | `POST` | `gateways/{gateway}/purchase.xml` | transaction envelope |
//! | credit | `POST` | `transactions/{transaction}/credit.xml` | amount only |
//! | retain | `PUT` | `payment_methods/{token}/retain.xml` | empty |
//! | redact | `PUT` | `payment_methods/{token}/redact.xml` | empty |
//! | retrieve | `GET` | `payment_methods/{token}.xml` | none |

use std::fmt::{Display, Formatter};

use quick_xml::se::{QuoteLevel, Serializer};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::amount::{MinorUnits, to_minor_units};
use crate::error::RequestError;

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://spreedlycore.com/v1/";

/// Content type sent with every request.
pub const XML_CONTENT_TYPE: &str = "application/xml";

/// The only currency the purchase envelope carries.
pub const CURRENCY_CODE: &str = "USD";

/// HTTP method used by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `PUT`
    Put,
    /// `POST`
    Post,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A gateway operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Charge a stored payment method through a gateway.
    Purchase,
    /// Refund money against an earlier transaction.
    Credit,
    /// Keep a payment method stored for reuse.
    Retain,
    /// Permanently discard a stored payment method.
    Redact,
    /// Fetch a stored payment method.
    Retrieve,
}

impl Operation {
    /// Returns the operation name, used in logs and span names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Credit => "credit",
            Self::Retain => "retain",
            Self::Redact => "redact",
            Self::Retrieve => "retrieve",
        }
    }

    /// Returns the HTTP method the operation uses.
    #[must_use]
    pub const fn method(self) -> HttpMethod {
        match self {
            Self::Purchase | Self::Credit => HttpMethod::Post,
            Self::Retain | Self::Redact => HttpMethod::Put,
            Self::Retrieve => HttpMethod::Get,
        }
    }

    /// Returns whether the result carries processor response details.
    #[must_use]
    pub const fn has_response_detail(self) -> bool {
        matches!(self, Self::Purchase | Self::Credit)
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully described gateway call, ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayRequest {
    operation: Operation,
    path_segments: Vec<String>,
    body: Option<String>,
}

/// `<transaction>` envelope sent by a purchase.
#[derive(Debug, Serialize)]
struct PurchaseEnvelope<'a> {
    transaction_type: &'static str,
    payment_method_token: &'a str,
    amount: MinorUnits,
    currency_code: &'static str,
    order_id: &'a str,
    ip: &'a str,
}

/// `<transaction>` envelope sent by a credit.
#[derive(Debug, Serialize)]
struct CreditEnvelope {
    amount: MinorUnits,
}

impl GatewayRequest {
    /// Builds a purchase against `gateway_token` using a stored payment method.
    ///
    /// `amount` is in major units (dollars) and is sent in cents.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Amount`] if the amount does not fit in cents,
    /// and [`RequestError::InvalidToken`] for an unusable gateway token.
    pub fn purchase(
        gateway_token: &str,
        payment_method_token: &str,
        amount: Decimal,
        order_id: &str,
        ip_address: &str,
    ) -> Result<Self, RequestError> {
        let envelope = PurchaseEnvelope {
            transaction_type: "purchase",
            payment_method_token,
            amount: to_minor_units(amount)?,
            currency_code: CURRENCY_CODE,
            order_id,
            ip: ip_address,
        };

        Ok(Self {
            operation: Operation::Purchase,
            path_segments: vec![
                "gateways".to_owned(),
                path_token(gateway_token)?,
                "purchase.xml".to_owned(),
            ],
            body: Some(to_transaction_xml(&envelope)?),
        })
    }

    /// Builds a credit against an earlier transaction.
    ///
    /// `amount` is in major units (dollars) and is sent in cents. The
    /// envelope carries the amount only: `ip_address` is accepted for
    /// signature parity with [`purchase`](Self::purchase) but the credit
    /// endpoint has never been sent it.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Amount`] if the amount does not fit in cents,
    /// and [`RequestError::InvalidToken`] for an unusable transaction token.
    pub fn credit(
        transaction_token: &str,
        amount: Decimal,
        ip_address: &str,
    ) -> Result<Self, RequestError> {
        let envelope = CreditEnvelope {
            amount: to_minor_units(amount)?,
        };
        note_unsent_ip(ip_address);

        Ok(Self {
            operation: Operation::Credit,
            path_segments: vec![
                "transactions".to_owned(),
                path_token(transaction_token)?,
                "credit.xml".to_owned(),
            ],
            body: Some(to_transaction_xml(&envelope)?),
        })
    }

    /// Builds a retain request for a stored payment method.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidToken`] for an unusable token.
    pub fn retain(payment_method_token: &str) -> Result<Self, RequestError> {
        Self::payment_method_action(Operation::Retain, payment_method_token, "retain.xml")
    }

    /// Builds a redact request for a stored payment method.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidToken`] for an unusable token.
    pub fn redact(payment_method_token: &str) -> Result<Self, RequestError> {
        Self::payment_method_action(Operation::Redact, payment_method_token, "redact.xml")
    }

    /// Builds a retrieve request for a stored payment method.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidToken`] for an unusable token.
    pub fn retrieve(payment_method_token: &str) -> Result<Self, RequestError> {
        let token = path_token(payment_method_token)?;
        Ok(Self {
            operation: Operation::Retrieve,
            path_segments: vec!["payment_methods".to_owned(), format!("{token}.xml")],
            body: None,
        })
    }

    fn payment_method_action(
        operation: Operation,
        token: &str,
        action: &str,
    ) -> Result<Self, RequestError> {
        Ok(Self {
            operation,
            path_segments: vec![
                "payment_methods".to_owned(),
                path_token(token)?,
                action.to_owned(),
            ],
            body: None,
        })
    }

    /// Returns the operation this request performs.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.operation.method()
    }

    /// Returns the unencoded path segments below the API root.
    #[must_use]
    pub fn path_segments(&self) -> &[String] {
        &self.path_segments
    }

    /// Returns the XML body, if the operation sends one.
    ///
    /// `PUT` operations send an empty body and return `None` here.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Resolves the request path against an API root such as
    /// [`DEFAULT_BASE_URL`], percent-encoding each segment.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::UnusableBaseUrl`] if `base` cannot have a path.
    pub fn url(&self, base: &Url) -> Result<Url, RequestError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| RequestError::UnusableBaseUrl(base.to_string()))?
            .pop_if_empty()
            .extend(&self.path_segments);
        Ok(url)
    }
}

/// Checks that `token` stays a single path segment once resolved.
fn path_token(token: &str) -> Result<String, RequestError> {
    match token {
        "" | "." | ".." => Err(RequestError::InvalidToken(token.to_owned())),
        _ => Ok(token.to_owned()),
    }
}

/// Writes `envelope` under a `<transaction>` root, escaping quotes as well
/// as markup characters.
fn to_transaction_xml<T: Serialize>(envelope: &T) -> Result<String, RequestError> {
    let mut xml = String::new();
    let mut serializer = Serializer::with_root(&mut xml, Some("transaction"))
        .map_err(|e| RequestError::Encode(e.to_string()))?;
    serializer.set_quote_level(QuoteLevel::Full);
    envelope
        .serialize(serializer)
        .map_err(|e| RequestError::Encode(e.to_string()))?;
    Ok(xml)
}

/// Logs that a credit's `ip_address` is not sent.
#[cfg(feature = "telemetry")]
fn note_unsent_ip(ip_address: &str) {
    if !ip_address.is_empty() {
        tracing::debug!("credit request ignores ip_address; the envelope carries only amount");
    }
}

/// Logs that a credit's `ip_address` is not sent.
/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
const fn note_unsent_ip(_ip_address: &str) {}
