//! # Iyzico Configuration
//!
//! Configuration management for the Iyzico integration.
//! All secrets are loaded from environment variables.

use gateway_core::GatewayError;
use std::env;

/// Default base URL (Iyzico sandbox).
const SANDBOX_BASE_URL: &str = "https://sandbox-api.iyzipay.com";

/// Iyzico API configuration
#[derive(Debug, Clone)]
pub struct IyzicoConfig {
    /// API key
    pub api_key: String,

    /// Secret key used to sign every request
    pub secret_key: String,

    /// API base URL (sandbox, production, or a mock server in tests)
    pub base_url: String,
}

impl IyzicoConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `IYZICO_API_KEY`
    /// - `IYZICO_SECRET_KEY`
    ///
    /// Optional:
    /// - `IYZICO_URI` (defaults to the sandbox endpoint)
    pub fn from_env() -> Result<Self, GatewayError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_key = env::var("IYZICO_API_KEY")
            .map_err(|_| GatewayError::Configuration("IYZICO_API_KEY not set".to_string()))?;

        let secret_key = env::var("IYZICO_SECRET_KEY")
            .map_err(|_| GatewayError::Configuration("IYZICO_SECRET_KEY not set".to_string()))?;

        if api_key.trim().is_empty() {
            return Err(GatewayError::Configuration(
                "IYZICO_API_KEY must not be empty".to_string(),
            ));
        }

        if secret_key.trim().is_empty() {
            return Err(GatewayError::Configuration(
                "IYZICO_SECRET_KEY must not be empty".to_string(),
            ));
        }

        let base_url = env::var("IYZICO_URI")
            .unwrap_or_else(|_| SANDBOX_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_key,
            secret_key,
            base_url,
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
            base_url: SANDBOX_BASE_URL.to_string(),
        }
    }

    /// Check if pointed at the sandbox environment
    pub fn is_sandbox(&self) -> bool {
        self.base_url.contains("sandbox")
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}
