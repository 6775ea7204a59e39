//! # Application State
//!
//! Shared state for the Axum application: the injected payment provider
//! and the server configuration. One parameterized server replaces the
//! two near-duplicate deployments this service grew out of — CORS
//! strictness is configuration, not a fork.

use gateway_core::BoxedPaymentProvider;
use gateway_iyzico::IyzicoClient;
use std::sync::Arc;

/// Default allow-listed origins: the production storefront plus the two
/// local Vite dev ports.
const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:5173",
    "http://localhost:5174",
    "https://www.carion.com.tr",
    "https://carion.com.tr",
];

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Origins allowed by the CORS layer (credentials enabled)
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Load from environment variables.
    ///
    /// `ALLOWED_ORIGINS` is a comma-separated override; when unset the
    /// built-in allow-list applies.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let allowed_origins = if allowed_origins.is_empty() {
            DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            allowed_origins
        };

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5001),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            allowed_origins,
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The injected payment provider
    pub provider: BoxedPaymentProvider,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create state with the real Iyzico client, configured from the
    /// environment.
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let client = IyzicoClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Iyzico client: {}", e))?;

        Ok(Self {
            provider: Arc::new(client),
            config,
        })
    }

    /// Create state with an explicit provider (tests inject a stub here).
    pub fn with_provider(provider: BoxedPaymentProvider, config: AppConfig) -> Self {
        Self { provider, config }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");
        std::env::remove_var("ALLOWED_ORIGINS");

        let config = AppConfig::from_env();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5001);
        assert_eq!(config.allowed_origins.len(), 4);
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            environment: "test".to_string(),
            allowed_origins: Vec::new(),
        };

        let addr = config.socket_addr();
        assert_eq!(addr.to_string(), "127.0.0.1:3000");
    }
}
