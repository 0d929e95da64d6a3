//! Result data model returned by every gateway operation.
//!
//! Every field has a zero value (empty string or `false`) so callers can
//! read any field unconditionally. The one deliberate exception is
//! [`PaymentMethodDetail::errors`], which is `None` when the gateway sent no
//! `<errors>` element and `Some` (possibly empty) when it did.

use serde::{Deserialize, Serialize};

/// Normalized outcome of a single gateway call.
///
/// Purchase and credit populate [`response`](Self::response); retain,
/// redact, and retrieve leave it at its default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResult {
    /// Kind of transaction the gateway recorded (e.g. `"purchase"`).
    pub transaction_type: String,
    /// Transaction token assigned by the gateway.
    pub token: String,
    /// Whether the gateway reports the transaction as successful.
    pub succeeded: bool,
    /// Human-readable outcome, or the gateway's `<error>` text.
    pub message: String,
    /// The `key` attribute of `<message>`, a stable identifier for the outcome.
    pub message_key: String,
    /// Amount in cents as echoed by the gateway.
    pub amount: String,
    /// ISO currency code as echoed by the gateway.
    pub currency_code: String,
    /// Caller-supplied order identifier.
    pub order_id: String,
    /// Token of the gateway configuration that processed the transaction.
    pub gateway_token: String,
    /// Whether the transaction ran against a test gateway.
    pub on_test_gateway: bool,
    /// Creation timestamp as sent by the gateway.
    pub created_at: String,
    /// Processor response details.
    pub response: ResponseDetail,
    /// Stored payment method the transaction used.
    pub payment_method: PaymentMethodDetail,
}

/// Details of the processor's response to a purchase or credit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseDetail {
    /// Whether the processor accepted the transaction.
    pub success: bool,
    /// Processor message.
    pub message: String,
    /// Processor error code.
    pub error_code: String,
    /// Extended processor error description.
    pub error_detail: String,
    /// Address verification result code.
    pub avs_code: String,
    /// Address verification result message.
    pub avs_message: String,
    /// Card verification value result code.
    pub cvv_code: String,
    /// Card verification value result message.
    pub cvv_message: String,
}

/// A stored payment method as described by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodDetail {
    /// Payment method token.
    pub token: String,
    /// Card brand (e.g. `"visa"`).
    pub card_type: String,
    /// Masked card number.
    pub card_number: String,
    /// Expiration month.
    pub exp_month: String,
    /// Expiration year.
    pub exp_year: String,
    /// Last four digits of the card number.
    pub last_four_digits: String,
    /// Cardholder first name.
    pub first_name: String,
    /// Cardholder last name.
    pub last_name: String,
    /// Cardholder email.
    pub email: String,
    /// Payment method kind (e.g. `"CreditCard"`).
    pub payment_method_type: String,
    /// Opaque data attached to the payment method.
    pub data: String,
    /// Validation errors; `None` when the gateway sent no `<errors>` element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl PaymentMethodDetail {
    /// Returns the validation errors, treating an absent list as empty.
    #[must_use]
    pub fn errors_or_empty(&self) -> &[FieldError] {
        self.errors.as_deref().unwrap_or_default()
    }
}

/// A single validation error reported against a payment method field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field the error applies to (e.g. `"number"`).
    pub attribute: String,
    /// Machine-readable error key (e.g. `"errors.blank"`).
    pub key: String,
    /// Human-readable message.
    pub message: String,
}
