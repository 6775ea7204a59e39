//! # gateway-api
//!
//! HTTP API layer for the iyzico-gateway payment façade.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints that relay to the injected payment provider
//! - Credentialed CORS restricted to a configured origin allow-list
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/api/payment/health` | Liveness probe |
//! | GET | `/api/payment/test` | Environment echo |
//! | POST | `/api/payment/create` | Charge a card |
//! | GET | `/api/payment/history/:user_id` | Successful payments |
//! | POST | `/api/subscription/cancel` | Cancel a subscription |
//! | POST | `/api/subscription/upgrade` | Cancel current, start new plan |
//! | GET | `/api/subscription/status/:reference_code` | Subscription state |
//! | POST | `/api/subscription/change-plan` | Move to another pricing plan |
//! | POST | `/api/subscription/update-card` | Replace card on file |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
