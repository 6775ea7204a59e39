//! # Iyzico Gateway
//!
//! HTTP façade over the Iyzico payment provider.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export IYZICO_API_KEY=...
//! export IYZICO_SECRET_KEY=...
//! export IYZICO_URI=https://sandbox-api.iyzipay.com
//!
//! # Run the server
//! iyzico-gateway
//! ```

use gateway_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.provider.provider_name());
    info!(
        "Allowed origins: {}",
        state.config.allowed_origins.join(", ")
    );

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("Payment server running on http://{}", addr);

    if !is_prod {
        info!("Health: GET http://{}/api/payment/health", addr);
        info!("Create payment: POST http://{}/api/payment/create", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
