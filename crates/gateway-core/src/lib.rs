//! # gateway-core
//!
//! Core types and traits for the iyzico-gateway payment façade.
//!
//! This crate provides:
//! - `PaymentProvider` trait — the injected seam to the external provider
//! - Transient request shapes in the provider's camelCase wire schema
//! - `ProviderResponse` for pass-through of provider results
//! - `GatewayError` for typed error handling
//!
//! Nothing in this crate performs I/O or holds state across requests: every
//! type is built per HTTP request, forwarded, and discarded.
//!
//! ## Example
//!
//! ```rust,ignore
//! use gateway_core::{CardDetails, BuyerOverrides, PaymentRequest};
//!
//! // Shape a card charge the way the provider expects it
//! let request = PaymentRequest::subscription_charge(
//!     "user-42",
//!     "100.00",
//!     &card_details,
//!     &BuyerOverrides::default(),
//!     Some(client_ip),
//! );
//!
//! // Submit through the injected provider
//! let result = provider.create_payment(&request).await?;
//! ```

pub mod card;
pub mod error;
pub mod provider;
pub mod request;
pub mod response;

// Re-exports for convenience
pub use card::{CardDetails, PaymentCard};
pub use error::{GatewayError, PaymentResult};
pub use provider::{BoxedPaymentProvider, PaymentProvider};
pub use request::{
    conversation_id, Address, BasketItem, Buyer, BuyerOverrides, CardUpdateRequest,
    PaymentRequest, PaymentSearchQuery, PlanChangeRequest, SubscriptionCreateRequest,
    CURRENCY_TRY, LOCALE_TR,
};
pub use response::ProviderResponse;
