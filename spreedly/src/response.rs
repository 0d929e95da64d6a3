//! Response parser for the Spreedly Core API.
//!
//! The gateway's XML is deserialized into wire structs whose fields all
//! default when absent, then mapped onto a [`TransactionResult`]. Only a
//! body that is empty or not well-formed XML is an error. Surrounding
//! whitespace in element text is not significant.
//!
//! `GET` responses arrive with a bare `<payment_method>` root. It is read as
//! the payment method of an otherwise empty `<transaction>`, so every
//! operation yields the same result shape.

use serde::Deserialize;

use crate::error::ParseError;
use crate::request::{HttpMethod, Operation};
use crate::types::{FieldError, PaymentMethodDetail, ResponseDetail, TransactionResult};

/// Which sections of the result an operation populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultFields {
    /// Header, response detail, and payment method (purchase, credit).
    #[default]
    Full,
    /// Header and payment method only (retain, redact, retrieve).
    HeaderAndPaymentMethod,
}

impl From<Operation> for ResultFields {
    fn from(operation: Operation) -> Self {
        if operation.has_response_detail() {
            Self::Full
        } else {
            Self::HeaderAndPaymentMethod
        }
    }
}

/// `<transaction>` root of `POST` and `PUT` responses.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TransactionXml {
    transaction_type: String,
    token: String,
    succeeded: String,
    message: MessageXml,
    error: String,
    amount: String,
    currency_code: String,
    order_id: String,
    gateway_token: String,
    on_test_gateway: String,
    created_at: String,
    response: ResponseXml,
    payment_method: PaymentMethodXml,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MessageXml {
    #[serde(rename = "@key")]
    key: String,
    #[serde(rename = "$text")]
    text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResponseXml {
    success: String,
    message: String,
    error_code: String,
    error_detail: String,
    avs_code: String,
    avs_message: String,
    cvv_code: String,
    cvv_message: String,
}

/// `<payment_method>`, nested in a transaction or the root of a `GET` body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PaymentMethodXml {
    token: String,
    card_type: String,
    number: String,
    month: String,
    year: String,
    last_four_digits: String,
    first_name: String,
    last_name: String,
    email: String,
    payment_method_type: String,
    data: String,
    errors: Option<ErrorsXml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorsXml {
    #[serde(rename = "error")]
    items: Vec<FieldErrorXml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FieldErrorXml {
    #[serde(rename = "@attribute")]
    attribute: String,
    #[serde(rename = "@key")]
    key: String,
    #[serde(rename = "$text")]
    message: String,
}

/// Parses a gateway response into a [`TransactionResult`].
///
/// `method` is the HTTP method of the request that produced `body`.
///
/// # Errors
///
/// Returns [`ParseError::Empty`] for a blank body and [`ParseError::Xml`]
/// for text that is not an XML document, including plain-text error pages.
pub fn parse_response(
    body: &str,
    method: HttpMethod,
    fields: ResultFields,
) -> Result<TransactionResult, ParseError> {
    if body.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let transaction = match method {
        HttpMethod::Get => TransactionXml {
            payment_method: quick_xml::de::from_str(body)?,
            ..TransactionXml::default()
        },
        HttpMethod::Put | HttpMethod::Post => quick_xml::de::from_str(body)?,
    };
    let result = transaction.into_result(fields);

    #[cfg(feature = "telemetry")]
    tracing::debug!(
        method = %method,
        transaction_type = %result.transaction_type,
        succeeded = result.succeeded,
        "parsed gateway response"
    );

    Ok(result)
}

/// Only the literal text `true` counts as set.
fn flag(text: &str) -> bool {
    text == "true"
}

impl TransactionXml {
    /// A non-empty `<error>` overrides `<succeeded>` and `<message>`.
    fn into_result(self, fields: ResultFields) -> TransactionResult {
        let (succeeded, message, message_key) = if self.error.is_empty() {
            (flag(&self.succeeded), self.message.text, self.message.key)
        } else {
            (false, self.error, String::new())
        };
        let response = match fields {
            ResultFields::Full => self.response.into(),
            ResultFields::HeaderAndPaymentMethod => ResponseDetail::default(),
        };

        TransactionResult {
            transaction_type: self.transaction_type,
            token: self.token,
            succeeded,
            message,
            message_key,
            amount: self.amount,
            currency_code: self.currency_code,
            order_id: self.order_id,
            gateway_token: self.gateway_token,
            on_test_gateway: flag(&self.on_test_gateway),
            created_at: self.created_at,
            response,
            payment_method: self.payment_method.into(),
        }
    }
}

impl From<ResponseXml> for ResponseDetail {
    fn from(xml: ResponseXml) -> Self {
        Self {
            success: flag(&xml.success),
            message: xml.message,
            error_code: xml.error_code,
            error_detail: xml.error_detail,
            avs_code: xml.avs_code,
            avs_message: xml.avs_message,
            cvv_code: xml.cvv_code,
            cvv_message: xml.cvv_message,
        }
    }
}

impl From<PaymentMethodXml> for PaymentMethodDetail {
    fn from(xml: PaymentMethodXml) -> Self {
        Self {
            token: xml.token,
            card_type: xml.card_type,
            card_number: xml.number,
            exp_month: xml.month,
            exp_year: xml.year,
            last_four_digits: xml.last_four_digits,
            first_name: xml.first_name,
            last_name: xml.last_name,
            email: xml.email,
            payment_method_type: xml.payment_method_type,
            data: xml.data,
            errors: xml.errors.map(|errors| {
                errors
                    .items
                    .into_iter()
                    .map(|error| FieldError {
                        attribute: error.attribute,
                        key: error.key,
                        message: error.message,
                    })
                    .collect()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAILED_PURCHASE: &str = r#"
<transaction>
  <amount type="integer">9405</amount>
  <on_test_gateway type="boolean">true</on_test_gateway>
  <created_at type="datetime">2011-06-15T17:13:24Z</created_at>
  <updated_at type="datetime">2011-06-15T17:13:24Z</updated_at>
  <currency_code>USD</currency_code>
  <succeeded type="boolean">false</succeeded>
  <token>UdhJ55p7eFBMKyux8Gf0lxYTI3s</token>
  <message key="messages.failed_response_from_gateway">Unable to obtain a successful response from the gateway.</message>
  <transaction_type>purchase</transaction_type>
  <gateway_token>HBwH9D7x7ZZAFCkwDuP8hAxLDA4</gateway_token>
  <order_id nil="true"></order_id>
  <response>
    <success type="boolean">false</success>
    <message>Unable to process the transaction.</message>
    <avs_code nil="true"></avs_code>
    <avs_message nil="true"></avs_message>
    <cvv_code nil="true"></cvv_code>
    <cvv_message nil="true"></cvv_message>
    <error_code></error_code>
    <error_detail nil="true"></error_detail>
    <created_at type="datetime">2011-06-15T17:13:24Z</created_at>
    <updated_at nil="true"></updated_at>
  </response>
  <payment_method>
    <token>H38ii6HR7p4rBGp6pGy6LzClR1r</token>
    <created_at type="datetime">2011-06-15T17:13:10Z</created_at>
    <updated_at type="datetime">2011-06-15T17:13:24Z</updated_at>
    <last_four_digits>1881</last_four_digits>
    <card_type>visa</card_type>
    <first_name>Gary</first_name>
    <last_name>Solomon</last_name>
    <month type="integer">12</month>
    <year type="integer">2011</year>
    <email nil="true"></email>
    <data nil="true"></data>
    <payment_method_type>CreditCard</payment_method_type>
    <verification_value>XXX</verification_value>
    <number>XXXX-XXXX-XXXX-1881</number>
    <errors>
    </errors>
  </payment_method>
</transaction>
"#;

    const PAYMENT_METHOD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<payment_method>
  <token>8xXpCw1bYAw4mjfsGsuUMBlMwWo</token>
  <card_type>master</card_type>
  <number>XXXX-XXXX-XXXX-4444</number>
  <month type="integer">4</month>
  <year type="integer">2030</year>
  <data>customer-42</data>
  <errors>
    <error attribute="first_name" key="errors.blank">First name can't be blank</error>
    <error attribute="number" key="errors.invalid">Number is invalid</error>
  </errors>
</payment_method>
"#;

    #[test]
    fn test_failed_purchase_sample() {
        let result =
            parse_response(FAILED_PURCHASE, HttpMethod::Post, ResultFields::Full).unwrap();

        assert_eq!(result.transaction_type, "purchase");
        assert_eq!(result.token, "UdhJ55p7eFBMKyux8Gf0lxYTI3s");
        assert!(!result.succeeded);
        assert_eq!(
            result.message,
            "Unable to obtain a successful response from the gateway."
        );
        assert_eq!(result.message_key, "messages.failed_response_from_gateway");
        assert_eq!(result.amount, "9405");
        assert_eq!(result.currency_code, "USD");
        assert_eq!(result.order_id, "");
        assert_eq!(result.gateway_token, "HBwH9D7x7ZZAFCkwDuP8hAxLDA4");
        assert!(result.on_test_gateway);

        assert!(!result.response.success);
        assert_eq!(result.response.message, "Unable to process the transaction.");
        assert_eq!(result.response.error_code, "");
        assert_eq!(result.response.avs_code, "");
        assert_eq!(result.response.cvv_message, "");

        let pm = &result.payment_method;
        assert_eq!(pm.token, "H38ii6HR7p4rBGp6pGy6LzClR1r");
        assert_eq!(pm.card_number, "XXXX-XXXX-XXXX-1881");
        assert_eq!(pm.card_type, "visa");
        assert_eq!(pm.exp_month, "12");
        assert_eq!(pm.exp_year, "2011");
        assert_eq!(pm.last_four_digits, "1881");
        assert_eq!(pm.first_name, "Gary");
        assert_eq!(pm.payment_method_type, "CreditCard");
        assert_eq!(pm.data, "");
        assert_eq!(pm.errors, Some(Vec::new()));
    }

    #[test]
    fn test_error_element_overrides_succeeded() {
        let xml = "<transaction><succeeded>true</succeeded><message>Succeeded!</message>\
                   <error>Some failure</error></transaction>";
        let result = parse_response(xml, HttpMethod::Post, ResultFields::Full).unwrap();
        assert!(!result.succeeded);
        assert_eq!(result.message, "Some failure");
        assert_eq!(result.message_key, "");
    }

    #[test]
    fn test_empty_error_element_does_not_override() {
        let xml = "<transaction><succeeded>true</succeeded><message>Succeeded!</message>\
                   <error></error></transaction>";
        let result = parse_response(xml, HttpMethod::Put, ResultFields::HeaderAndPaymentMethod)
            .unwrap();
        assert!(result.succeeded);
        assert_eq!(result.message, "Succeeded!");
    }

    #[test]
    fn test_succeeded_requires_exact_true() {
        for text in ["TRUE", "1", "yes", ""] {
            let xml = format!("<transaction><succeeded>{text}</succeeded></transaction>");
            let result = parse_response(&xml, HttpMethod::Post, ResultFields::Full).unwrap();
            assert!(!result.succeeded, "{text:?} must not read as success");
        }
    }

    #[test]
    fn test_get_body_is_wrapped() {
        let result = parse_response(
            PAYMENT_METHOD,
            HttpMethod::Get,
            ResultFields::HeaderAndPaymentMethod,
        )
        .unwrap();
        assert_eq!(result.payment_method.token, "8xXpCw1bYAw4mjfsGsuUMBlMwWo");
        assert_eq!(result.payment_method.card_type, "master");
        assert_eq!(result.payment_method.exp_month, "4");
        assert_eq!(result.payment_method.data, "customer-42");
        assert!(!result.succeeded);
        assert_eq!(result.transaction_type, "");
    }

    #[test]
    fn test_get_matches_prewrapped_content() {
        let body = PAYMENT_METHOD
            .trim()
            .trim_start_matches(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        let wrapped = format!("<transaction>{body}</transaction>");

        let via_get =
            parse_response(body, HttpMethod::Get, ResultFields::HeaderAndPaymentMethod).unwrap();
        let via_put =
            parse_response(&wrapped, HttpMethod::Put, ResultFields::HeaderAndPaymentMethod)
                .unwrap();
        assert_eq!(via_get, via_put);
    }

    #[test]
    fn test_validation_errors_in_document_order() {
        let result = parse_response(
            PAYMENT_METHOD,
            HttpMethod::Get,
            ResultFields::HeaderAndPaymentMethod,
        )
        .unwrap();
        let errors = result.payment_method.errors.unwrap();
        assert_eq!(
            errors,
            vec![
                FieldError {
                    attribute: "first_name".into(),
                    key: "errors.blank".into(),
                    message: "First name can't be blank".into(),
                },
                FieldError {
                    attribute: "number".into(),
                    key: "errors.invalid".into(),
                    message: "Number is invalid".into(),
                },
            ]
        );
    }

    #[test]
    fn test_absent_errors_element_is_none() {
        let xml = "<transaction><payment_method><token>t</token></payment_method></transaction>";
        let result = parse_response(xml, HttpMethod::Put, ResultFields::HeaderAndPaymentMethod)
            .unwrap();
        assert!(result.payment_method.errors.is_none());
    }

    #[test]
    fn test_empty_errors_element_is_empty_list() {
        let xml = "<transaction><payment_method><errors/></payment_method></transaction>";
        let result = parse_response(xml, HttpMethod::Put, ResultFields::HeaderAndPaymentMethod)
            .unwrap();
        assert_eq!(result.payment_method.errors, Some(Vec::new()));
    }

    #[test]
    fn test_header_only_fields_leave_response_at_default() {
        let result = parse_response(
            FAILED_PURCHASE,
            HttpMethod::Put,
            ResultFields::HeaderAndPaymentMethod,
        )
        .unwrap();
        assert_eq!(result.response, ResponseDetail::default());
        assert_eq!(result.payment_method.token, "H38ii6HR7p4rBGp6pGy6LzClR1r");
    }

    #[test]
    fn test_missing_sections_are_zero_values() {
        let result =
            parse_response("<transaction/>", HttpMethod::Post, ResultFields::Full).unwrap();
        assert_eq!(result, TransactionResult::default());
    }

    #[test]
    fn test_malformed_xml_is_error() {
        let result = parse_response(
            "<transaction><token>x</transaction>",
            HttpMethod::Post,
            ResultFields::Full,
        );
        assert!(matches!(result, Err(ParseError::Xml(_))));
        assert!(parse_response("<payment_method>", HttpMethod::Get, ResultFields::Full).is_err());
    }

    #[test]
    fn test_empty_body_is_error() {
        for method in [HttpMethod::Get, HttpMethod::Put, HttpMethod::Post] {
            let result = parse_response(" \n", method, ResultFields::HeaderAndPaymentMethod);
            assert!(matches!(result, Err(ParseError::Empty)), "{method}");
        }
    }

    #[test]
    fn test_plain_text_body_is_error() {
        for method in [HttpMethod::Get, HttpMethod::Put, HttpMethod::Post] {
            let result = parse_response(
                "Internal Server Error",
                method,
                ResultFields::HeaderAndPaymentMethod,
            );
            assert!(matches!(result, Err(ParseError::Xml(_))), "{method}");
        }
    }

    #[test]
    fn test_entities_and_cdata_are_decoded() {
        let xml = "<transaction><message>a &amp; b</message>\
                   <order_id><![CDATA[O&1<2]]></order_id></transaction>";
        let result = parse_response(xml, HttpMethod::Post, ResultFields::Full).unwrap();
        assert_eq!(result.message, "a & b");
        assert_eq!(result.order_id, "O&1<2");
    }

    #[test]
    fn test_unknown_elements_are_ignored() {
        let xml = "<transaction><updated_at>2011</updated_at><succeeded>true</succeeded>\
                   <payment_method><verification_value>XXX</verification_value></payment_method>\
                   </transaction>";
        let result = parse_response(xml, HttpMethod::Put, ResultFields::HeaderAndPaymentMethod)
            .unwrap();
        assert!(result.succeeded);
        assert_eq!(result.payment_method, PaymentMethodDetail::default());
    }

    #[test]
    fn test_result_fields_from_operation() {
        assert_eq!(ResultFields::from(Operation::Purchase), ResultFields::Full);
        assert_eq!(ResultFields::from(Operation::Credit), ResultFields::Full);
        assert_eq!(
            ResultFields::from(Operation::Retain),
            ResultFields::HeaderAndPaymentMethod
        );
        assert_eq!(
            ResultFields::from(Operation::Retrieve),
            ResultFields::HeaderAndPaymentMethod
        );
    }
}
