//! # Provider Request Shapes
//!
//! Transient request types in the provider's documented camelCase schema.
//! Everything here is constructed per HTTP request and discarded once the
//! provider responds; nothing is persisted.

use crate::card::{CardDetails, PaymentCard};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Provider locale code used on every call.
pub const LOCALE_TR: &str = "tr";

/// All card payments are charged in Turkish lira.
pub const CURRENCY_TRY: &str = "TRY";

/// Generate the per-request correlation identifier the provider requires.
///
/// Matches the `{userId}_{millis}` convention callers already correlate on.
pub fn conversation_id(user_id: &str) -> String {
    format!("{}_{}", user_id, Utc::now().timestamp_millis())
}

/// Buyer fields the caller may override on a card payment.
///
/// Production traffic historically shipped with placeholder buyer identity;
/// callers that supply real identity get it passed through, everyone else
/// falls back to the sandbox defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerOverrides {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub identity_number: Option<String>,
    #[serde(default)]
    pub registration_address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Buyer identity in the provider's schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buyer {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub identity_number: String,
    pub registration_address: String,
    pub ip: String,
    pub city: String,
    pub country: String,
}

const DEFAULT_ADDRESS: &str = "Nidakule Göztepe, Merdivenköy Mah. Bora Sok. No:1";
const DEFAULT_IDENTITY_NUMBER: &str = "74300864791";
const DEFAULT_IP: &str = "85.34.78.112";

impl Buyer {
    /// Buyer record for a card payment: caller overrides where present,
    /// sandbox placeholder identity otherwise.
    pub fn for_payment(user_id: &str, overrides: &BuyerOverrides, client_ip: Option<&str>) -> Self {
        Self {
            id: user_id.to_string(),
            name: overrides.name.clone().unwrap_or_else(|| "John".to_string()),
            surname: overrides.surname.clone().unwrap_or_else(|| "Doe".to_string()),
            email: overrides
                .email
                .clone()
                .unwrap_or_else(|| "email@email.com".to_string()),
            identity_number: overrides
                .identity_number
                .clone()
                .unwrap_or_else(|| DEFAULT_IDENTITY_NUMBER.to_string()),
            registration_address: overrides
                .registration_address
                .clone()
                .unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
            ip: client_ip.unwrap_or(DEFAULT_IP).to_string(),
            city: overrides.city.clone().unwrap_or_else(|| "Istanbul".to_string()),
            country: overrides
                .country
                .clone()
                .unwrap_or_else(|| "Turkey".to_string()),
        }
    }
}

/// Shipping or billing address in the provider's schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub contact_name: String,
    pub city: String,
    pub country: String,
    pub address: String,
}

impl Address {
    fn placeholder() -> Self {
        Self {
            contact_name: "Jane Doe".to_string(),
            city: "Istanbul".to_string(),
            country: "Turkey".to_string(),
            address: DEFAULT_ADDRESS.to_string(),
        }
    }
}

/// A basket line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketItem {
    pub id: String,
    pub name: String,
    pub category1: String,
    pub item_type: String,
    pub price: String,
}

/// Full card-payment request in the provider's schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub locale: String,
    pub conversation_id: String,
    pub price: String,
    pub paid_price: String,
    pub currency: String,
    pub installment: String,
    pub basket_id: String,
    pub payment_channel: String,
    pub payment_group: String,
    pub payment_card: PaymentCard,
    pub buyer: Buyer,
    pub shipping_address: Address,
    pub billing_address: Address,
    pub basket_items: Vec<BasketItem>,
}

impl PaymentRequest {
    /// Build a single-item subscription-payment charge.
    ///
    /// Invariants the provider contract requires: `paid_price` equals
    /// `price`, currency is TRY, installment is "1", and the card number
    /// has been stripped of whitespace.
    pub fn subscription_charge(
        user_id: &str,
        price: &str,
        card: &CardDetails,
        buyer: &BuyerOverrides,
        client_ip: Option<&str>,
    ) -> Self {
        let now_millis = Utc::now().timestamp_millis();
        Self {
            locale: LOCALE_TR.to_string(),
            conversation_id: conversation_id(user_id),
            price: price.to_string(),
            paid_price: price.to_string(),
            currency: CURRENCY_TRY.to_string(),
            installment: "1".to_string(),
            basket_id: format!("B{}", now_millis),
            payment_channel: "WEB".to_string(),
            payment_group: "PRODUCT".to_string(),
            payment_card: PaymentCard::from_details(card, true),
            buyer: Buyer::for_payment(user_id, buyer, client_ip),
            shipping_address: Address::placeholder(),
            billing_address: Address::placeholder(),
            basket_items: vec![BasketItem {
                id: "BI101".to_string(),
                name: "Subscription Payment".to_string(),
                category1: "Subscription".to_string(),
                item_type: "VIRTUAL".to_string(),
                price: price.to_string(),
            }],
        }
    }
}

/// Customer identity on subscription initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub customer_id: String,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub identity_number: String,
    pub shipping_contact_name: String,
    pub shipping_city: String,
    pub shipping_country: String,
    pub shipping_address: String,
    pub billing_contact_name: String,
    pub billing_city: String,
    pub billing_country: String,
    pub billing_address: String,
}

impl Customer {
    /// Placeholder customer used when the caller supplies identity nowhere
    /// else. Same sandbox defaults as [`Buyer::for_payment`].
    pub fn placeholder(user_id: &str) -> Self {
        Self {
            customer_id: user_id.to_string(),
            email: "test@test.com".to_string(),
            name: "John".to_string(),
            surname: "Doe".to_string(),
            identity_number: DEFAULT_IDENTITY_NUMBER.to_string(),
            shipping_contact_name: "John Doe".to_string(),
            shipping_city: "Istanbul".to_string(),
            shipping_country: "Turkey".to_string(),
            shipping_address: "Test Address".to_string(),
            billing_contact_name: "John Doe".to_string(),
            billing_city: "Istanbul".to_string(),
            billing_country: "Turkey".to_string(),
            billing_address: "Test Address".to_string(),
        }
    }
}

/// Request to start a new subscription on a pricing plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionCreateRequest {
    pub locale: String,
    pub conversation_id: String,
    pub pricing_plan_reference_code: String,
    pub subscription_initial_status: String,
    pub payment_card: PaymentCard,
    pub customer: Customer,
}

impl SubscriptionCreateRequest {
    pub fn new(user_id: &str, pricing_plan_reference_code: &str, card: &CardDetails) -> Self {
        Self {
            locale: LOCALE_TR.to_string(),
            conversation_id: Utc::now().timestamp_millis().to_string(),
            pricing_plan_reference_code: pricing_plan_reference_code.to_string(),
            subscription_initial_status: "ACTIVE".to_string(),
            payment_card: PaymentCard::from_details(card, false),
            customer: Customer::placeholder(user_id),
        }
    }
}

/// Request to move a subscription onto a different pricing plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanChangeRequest {
    pub locale: String,
    pub conversation_id: String,
    pub subscription_reference_code: String,
    pub new_pricing_plan_reference_code: String,
}

impl PlanChangeRequest {
    pub fn new(subscription_reference_code: &str, new_pricing_plan_reference_code: &str) -> Self {
        Self {
            locale: LOCALE_TR.to_string(),
            conversation_id: Utc::now().timestamp_millis().to_string(),
            subscription_reference_code: subscription_reference_code.to_string(),
            new_pricing_plan_reference_code: new_pricing_plan_reference_code.to_string(),
        }
    }
}

/// Request to replace the card on file for a subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardUpdateRequest {
    pub locale: String,
    pub conversation_id: String,
    pub subscription_reference_code: String,
    pub card_holder_name: String,
    pub card_number: String,
    pub expire_month: String,
    pub expire_year: String,
    pub cvc: String,
}

impl CardUpdateRequest {
    pub fn new(subscription_reference_code: &str, card: &CardDetails) -> Self {
        Self {
            locale: LOCALE_TR.to_string(),
            conversation_id: Utc::now().timestamp_millis().to_string(),
            subscription_reference_code: subscription_reference_code.to_string(),
            card_holder_name: card.card_holder_name.clone(),
            card_number: card.normalized_number(),
            expire_month: card.expire_month.clone(),
            expire_year: card.expire_year.clone(),
            cvc: card.cvc.clone(),
        }
    }
}

/// Query for successful subscription payments, fixed to the first page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSearchQuery {
    pub locale: String,
    pub conversation_id: String,
    pub subscription_reference_code: String,
    pub page: u32,
    pub count: u32,
    pub status: String,
}

impl PaymentSearchQuery {
    /// Page 1, 10 results, SUCCESS only — the history view's fixed window.
    pub fn successful_payments(subscription_reference_code: &str) -> Self {
        Self {
            locale: LOCALE_TR.to_string(),
            conversation_id: Utc::now().timestamp_millis().to_string(),
            subscription_reference_code: subscription_reference_code.to_string(),
            page: 1,
            count: 10,
            status: "SUCCESS".to_string(),
        }
    }
}
