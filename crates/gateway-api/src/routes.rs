//! # Routes
//!
//! Axum router configuration for the payment façade. The CORS allow-list
//! comes from `AppConfig`, so one router serves both the strict production
//! deployment and the relaxed development one.

use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Payments:
///   - GET  /api/payment/health - Liveness probe
///   - GET  /api/payment/test - Environment echo
///   - POST /api/payment/create - Charge a card
///   - GET  /api/payment/history/{user_id} - Successful payments, page 1
///
/// - Subscriptions:
///   - POST /api/subscription/cancel - Cancel a subscription
///   - POST /api/subscription/upgrade - Cancel current, start new plan
///   - GET  /api/subscription/status/{reference_code} - Subscription state
///   - POST /api/subscription/change-plan - Move to another pricing plan
///   - POST /api/subscription/update-card - Replace card on file
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    let payment_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/test", get(handlers::test_echo))
        .route("/create", post(handlers::create_payment))
        .route("/history/{user_id}", get(handlers::payment_history));

    let subscription_routes = Router::new()
        .route("/cancel", post(handlers::cancel_subscription))
        .route("/upgrade", post(handlers::upgrade_subscription))
        .route("/status/{reference_code}", get(handlers::subscription_status))
        .route("/change-plan", post(handlers::change_plan))
        .route("/update-card", post(handlers::update_card));

    Router::new()
        .nest("/api/payment", payment_routes)
        .nest("/api/subscription", subscription_routes)
        .fallback(handlers::not_found)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}

/// Credentialed CORS restricted to the configured origins.
///
/// Origins that fail header-value parsing are dropped rather than
/// panicking the server at startup.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
