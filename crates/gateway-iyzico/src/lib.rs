//! # gateway-iyzico
//!
//! Iyzico provider client for the iyzico-gateway payment façade.
//!
//! This crate owns everything provider-specific:
//!
//! - **IyzicoConfig** — API key, secret key, and endpoint from environment
//! - **IyzicoClient** — implements `gateway_core::PaymentProvider` over
//!   HTTPS with `IYZWSv2` request signing (HMAC-SHA256)
//!
//! The façade never interprets provider semantics beyond the response
//! envelope's `status`/`errorCode`/`errorMessage` fields; PCI handling,
//! idempotency, and retry guarantees are the provider's concern.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gateway_iyzico::IyzicoClient;
//! use gateway_core::{PaymentProvider, PaymentRequest};
//!
//! // Create client from environment (IYZICO_API_KEY, IYZICO_SECRET_KEY, IYZICO_URI)
//! let client = IyzicoClient::from_env()?;
//!
//! // Submit a card charge
//! let result = client.create_payment(&request).await?;
//! println!("payment id: {:?}", result.payment_id);
//! ```

pub mod client;
pub mod config;

// Re-exports
pub use client::IyzicoClient;
pub use config::IyzicoConfig;
