//! # Gateway Error Types
//!
//! Typed error handling for the payment façade.
//! All gateway operations return `Result<T, GatewayError>`.

use thiserror::Error;

/// Core error type for all gateway operations
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A required top-level field was absent from the request
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The provider accepted the call but rejected the operation
    /// (card declined, unknown reference code, etc.)
    #[error("Provider rejected: {message}")]
    ProviderRejected {
        error_code: Option<String>,
        message: String,
    },

    /// Network/HTTP error communicating with the provider
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the HTTP status code appropriate for this error.
    ///
    /// Provider rejections surface as 400 with the provider's code/message
    /// passed through verbatim; transport and internal failures are 500.
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::Configuration(_) => 500,
            GatewayError::MissingField(_) => 400,
            GatewayError::InvalidRequest(_) => 400,
            GatewayError::ProviderRejected { .. } => 400,
            GatewayError::Network(_) => 500,
            GatewayError::Serialization(_) => 500,
            GatewayError::Internal(_) => 500,
        }
    }

    /// The provider's error code, if this is a provider rejection
    pub fn provider_error_code(&self) -> Option<&str> {
        match self {
            GatewayError::ProviderRejected { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }
}

/// Result type alias for gateway operations
pub type PaymentResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(GatewayError::MissingField("price").status_code(), 400);
        assert_eq!(
            GatewayError::ProviderRejected {
                error_code: Some("12".into()),
                message: "Invalid card".into()
            }
            .status_code(),
            400
        );
        assert_eq!(GatewayError::Network("timeout".into()).status_code(), 500);
        assert_eq!(
            GatewayError::Configuration("IYZICO_API_KEY not set".into()).status_code(),
            500
        );
    }

    #[test]
    fn test_provider_error_code() {
        let err = GatewayError::ProviderRejected {
            error_code: Some("5152".into()),
            message: "Card declined".into(),
        };
        assert_eq!(err.provider_error_code(), Some("5152"));
        assert_eq!(GatewayError::Network("x".into()).provider_error_code(), None);
    }
}
