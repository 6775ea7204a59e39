//! # Payment Provider Trait
//!
//! The single seam between the HTTP façade and the external payment
//! provider. Handlers receive a `BoxedPaymentProvider` through shared
//! state; the real client lives in `gateway-iyzico`, and tests substitute
//! a scripted stub.

use crate::error::PaymentResult;
use crate::request::{
    CardUpdateRequest, PaymentRequest, PaymentSearchQuery, PlanChangeRequest,
    SubscriptionCreateRequest,
};
use crate::response::ProviderResponse;
use async_trait::async_trait;
use std::sync::Arc;

/// Operations the façade delegates to the external provider.
///
/// Every method is a single synchronous (from the handler's point of view)
/// round trip: no retries, no compensation, no caching. Error semantics:
/// a provider-side rejection surfaces as `GatewayError::ProviderRejected`,
/// transport failures as `GatewayError::Network`.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Charge a card (one-off payment).
    async fn create_payment(&self, request: &PaymentRequest) -> PaymentResult<ProviderResponse>;

    /// Start a new subscription on a pricing plan.
    async fn initialize_subscription(
        &self,
        request: &SubscriptionCreateRequest,
    ) -> PaymentResult<ProviderResponse>;

    /// Cancel an active subscription.
    async fn cancel_subscription(
        &self,
        subscription_reference_code: &str,
    ) -> PaymentResult<ProviderResponse>;

    /// Retrieve the current state of a subscription.
    async fn retrieve_subscription(
        &self,
        subscription_reference_code: &str,
    ) -> PaymentResult<ProviderResponse>;

    /// Search subscription payments (paginated, filtered by status).
    async fn search_subscription_payments(
        &self,
        query: &PaymentSearchQuery,
    ) -> PaymentResult<ProviderResponse>;

    /// Move a subscription onto a different pricing plan.
    async fn change_subscription_plan(
        &self,
        request: &PlanChangeRequest,
    ) -> PaymentResult<ProviderResponse>;

    /// Replace the card on file for a subscription.
    async fn update_subscription_card(
        &self,
        request: &CardUpdateRequest,
    ) -> PaymentResult<ProviderResponse>;

    /// Provider name, for logging.
    fn provider_name(&self) -> &'static str;
}

/// Injected provider dependency (dynamic dispatch).
pub type BoxedPaymentProvider = Arc<dyn PaymentProvider>;
