//! # Provider Response
//!
//! The provider's response envelope. Known fields are typed; everything
//! else is kept in a flattened map and passed through to the caller
//! unmodified.

use serde::{Deserialize, Serialize};

/// Opaque provider response, relayed to the caller largely as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResponse {
    /// "success" or "failure"
    #[serde(default)]
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,

    /// Everything else the provider returned (subscription reference
    /// codes, plan details, pagination fields, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ProviderResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Provider error message, falling back to a generic one.
    pub fn error_message_or(&self, fallback: &str) -> String {
        self.error_message
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }
}
