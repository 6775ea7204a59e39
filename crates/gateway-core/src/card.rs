//! # Card Types
//!
//! Card details as received from the caller and the payment-card shape
//! submitted to the provider. Card numbers are normalized (whitespace
//! stripped) before they leave this process, and never logged in full.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Card details as posted by the caller.
///
/// Field names follow the provider's camelCase wire schema so the caller
/// payload can be deserialized directly.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub card_holder_name: String,
    pub card_number: String,
    pub expire_month: String,
    pub expire_year: String,
    pub cvc: String,
}

impl CardDetails {
    /// The card number with all whitespace removed, as the provider expects.
    pub fn normalized_number(&self) -> String {
        self.card_number
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    }

    /// Last four digits of the normalized number, for log lines.
    pub fn last_four(&self) -> String {
        let normalized = self.normalized_number();
        let len = normalized.len();
        normalized.chars().skip(len.saturating_sub(4)).collect()
    }
}

// PAN and CVC must never reach the logs.
impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("card_holder_name", &self.card_holder_name)
            .field("card_number", &format_args!("****{}", self.last_four()))
            .field("expire_month", &self.expire_month)
            .field("expire_year", &self.expire_year)
            .field("cvc", &"***")
            .finish()
    }
}

/// Payment card in the provider's card-payment request schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCard {
    pub card_holder_name: String,
    pub card_number: String,
    pub expire_month: String,
    pub expire_year: String,
    pub cvc: String,
    /// "0" — the façade never stores cards with the provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub register_card: Option<String>,
}

impl PaymentCard {
    /// Build the provider card shape from caller-supplied details,
    /// stripping whitespace from the number.
    pub fn from_details(details: &CardDetails, register_card: bool) -> Self {
        Self {
            card_holder_name: details.card_holder_name.clone(),
            card_number: details.normalized_number(),
            expire_month: details.expire_month.clone(),
            expire_year: details.expire_year.clone(),
            cvc: details.cvc.clone(),
            register_card: register_card.then(|| "0".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_card() -> CardDetails {
        CardDetails {
            card_holder_name: "A B".to_string(),
            card_number: "4111 1111 1111 1111".to_string(),
            expire_month: "12".to_string(),
            expire_year: "2030".to_string(),
            cvc: "123".to_string(),
        }
    }

    #[test]
    fn test_normalized_number_strips_whitespace() {
        assert_eq!(sample_card().normalized_number(), "4111111111111111");
    }

    #[test]
    fn test_payment_card_from_details() {
        let card = PaymentCard::from_details(&sample_card(), true);
        assert_eq!(card.card_number, "4111111111111111");
        assert_eq!(card.register_card.as_deref(), Some("0"));

        let card = PaymentCard::from_details(&sample_card(), false);
        assert!(card.register_card.is_none());
    }

    #[test]
    fn test_debug_redacts_pan_and_cvc() {
        let rendered = format!("{:?}", sample_card());
        assert!(!rendered.contains("4111111111111111"));
        assert!(!rendered.contains("123,"));
        assert!(rendered.contains("****1111"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn test_caller_payload_deserializes() {
        let card: CardDetails = serde_json::from_str(
            r#"{"cardHolderName":"A B","cardNumber":"4111 1111 1111 1111",
                "expireMonth":"12","expireYear":"2030","cvc":"123"}"#,
        )
        .unwrap();
        assert_eq!(card.card_holder_name, "A B");
        assert_eq!(card.last_four(), "1111");
    }
}
