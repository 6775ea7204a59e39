//! # Request Handlers
//!
//! Axum request handlers for the payment façade. Each handler is a single
//! linear pass: validate the top-level fields, shape the provider request,
//! await the provider, relay the result. No retries, no state across
//! requests.

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use gateway_core::{
    BuyerOverrides, CardDetails, CardUpdateRequest, GatewayError, PaymentRequest,
    PaymentSearchQuery, PlanChangeRequest, ProviderResponse, SubscriptionCreateRequest,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Card-payment request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentBody {
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub card_details: Option<CardDetails>,
    /// Optional buyer identity; sandbox placeholders apply when absent
    #[serde(default)]
    pub buyer: BuyerOverrides,
}

/// Subscription cancel request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelSubscriptionBody {
    #[serde(default)]
    pub subscription_reference_code: Option<String>,
}

/// Subscription upgrade request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeSubscriptionBody {
    #[serde(default)]
    pub user_id: Option<String>,
    /// Pricing plan reference code of the target plan
    #[serde(default)]
    pub new_plan_price: Option<String>,
    #[serde(default)]
    pub card_details: Option<CardDetails>,
    #[serde(default)]
    pub current_subscription_reference: Option<String>,
}

/// Plan change request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePlanBody {
    #[serde(default)]
    pub subscription_reference_code: Option<String>,
    #[serde(default)]
    pub new_pricing_plan_reference_code: Option<String>,
}

/// Card update request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardBody {
    #[serde(default)]
    pub subscription_reference_code: Option<String>,
    #[serde(default)]
    pub card_details: Option<CardDetails>,
}

/// Error envelope relayed to the caller
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
            error_code: None,
        }
    }

    pub fn with_error_code(mut self, error_code: Option<String>) -> Self {
        self.error_code = error_code;
        self
    }
}

type HandlerError = (StatusCode, Json<ErrorResponse>);
type HandlerResult = Result<Json<serde_json::Value>, HandlerError>;

fn error_to_response(err: GatewayError) -> HandlerError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let error_code = err.provider_error_code().map(String::from);
    let response = match &err {
        GatewayError::ProviderRejected { message, .. } => ErrorResponse::new(message.clone()),
        other => ErrorResponse::new(other.to_string()),
    };
    (status, Json(response.with_error_code(error_code)))
}

fn require<T>(field: Option<T>, name: &'static str) -> Result<T, HandlerError> {
    field.ok_or_else(|| error_to_response(GatewayError::MissingField(name)))
}

fn relay(result: ProviderResponse) -> HandlerResult {
    serde_json::to_value(&result)
        .map(Json)
        .map_err(|e| error_to_response(GatewayError::Serialization(e.to_string())))
}

/// Caller IP as reported by the front proxy, if any.
fn client_ip(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
}

// =============================================================================
// Handlers
// =============================================================================

/// Catch-all: unmatched routes get the same JSON error envelope as
/// everything else.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Route not found")),
    )
}

/// Liveness probe — never fails
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Environment echo
pub async fn test_echo(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Payment server is working!",
        "environment": state.config.environment,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Charge a card for a subscription payment.
///
/// Validates the three top-level fields before the provider is touched;
/// a missing field is a 400 with no outbound call.
#[instrument(skip(state, headers, body))]
pub async fn create_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreatePaymentBody>,
) -> HandlerResult {
    let price = require(body.price, "price")?;
    let user_id = require(body.user_id, "userId")?;
    let card_details = require(body.card_details, "cardDetails")?;

    let request = PaymentRequest::subscription_charge(
        &user_id,
        &price,
        &card_details,
        &body.buyer,
        client_ip(&headers),
    );

    info!(
        "Creating payment: conversation_id={}, price={}",
        request.conversation_id, request.price
    );

    let result = state.provider.create_payment(&request).await.map_err(|e| {
        error!("Payment failed: {}", e);
        error_to_response(e)
    })?;

    info!("Payment succeeded: payment_id={:?}", result.payment_id);
    relay(result)
}

/// Cancel a subscription
#[instrument(skip(state, body))]
pub async fn cancel_subscription(
    State(state): State<AppState>,
    Json(body): Json<CancelSubscriptionBody>,
) -> HandlerResult {
    let reference = require(body.subscription_reference_code, "subscriptionReferenceCode")?;

    let result = state
        .provider
        .cancel_subscription(&reference)
        .await
        .map_err(|e| {
            error!("Cancellation failed for {}: {}", reference, e);
            error_to_response(e)
        })?;

    info!("Cancelled subscription: {}", reference);
    relay(result)
}

/// Upgrade a subscription: cancel the current one, then start a new one on
/// the target plan.
///
/// The cancel step is awaited and its failure aborts the upgrade — a new
/// subscription is never initialized on top of an uncancelled one.
#[instrument(skip(state, body))]
pub async fn upgrade_subscription(
    State(state): State<AppState>,
    Json(body): Json<UpgradeSubscriptionBody>,
) -> HandlerResult {
    let user_id = require(body.user_id, "userId")?;
    let new_plan = require(body.new_plan_price, "newPlanPrice")?;
    let card_details = require(body.card_details, "cardDetails")?;
    let current_reference = require(
        body.current_subscription_reference,
        "currentSubscriptionReference",
    )?;

    state
        .provider
        .cancel_subscription(&current_reference)
        .await
        .map_err(|e| {
            error!(
                "Upgrade aborted, cancellation of {} failed: {}",
                current_reference, e
            );
            error_to_response(e)
        })?;

    info!(
        "Cancelled {} for upgrade, initializing plan {}",
        current_reference, new_plan
    );

    let request = SubscriptionCreateRequest::new(&user_id, &new_plan, &card_details);

    let result = state
        .provider
        .initialize_subscription(&request)
        .await
        .map_err(|e| {
            error!("Subscription initialization failed: {}", e);
            error_to_response(e)
        })?;

    relay(result)
}

/// Retrieve subscription state
#[instrument(skip(state))]
pub async fn subscription_status(
    State(state): State<AppState>,
    Path(reference_code): Path<String>,
) -> HandlerResult {
    let result = state
        .provider
        .retrieve_subscription(&reference_code)
        .await
        .map_err(error_to_response)?;

    relay(result)
}

/// Successful subscription payments for a reference, first page only
#[instrument(skip(state))]
pub async fn payment_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> HandlerResult {
    let query = PaymentSearchQuery::successful_payments(&user_id);

    let result = state
        .provider
        .search_subscription_payments(&query)
        .await
        .map_err(error_to_response)?;

    relay(result)
}

/// Move a subscription onto a different pricing plan
#[instrument(skip(state, body))]
pub async fn change_plan(
    State(state): State<AppState>,
    Json(body): Json<ChangePlanBody>,
) -> HandlerResult {
    let reference = require(body.subscription_reference_code, "subscriptionReferenceCode")?;
    let new_plan = require(
        body.new_pricing_plan_reference_code,
        "newPricingPlanReferenceCode",
    )?;

    let request = PlanChangeRequest::new(&reference, &new_plan);

    let result = state
        .provider
        .change_subscription_plan(&request)
        .await
        .map_err(|e| {
            error!("Plan change failed for {}: {}", reference, e);
            error_to_response(e)
        })?;

    relay(result)
}

/// Replace the card on file for a subscription
#[instrument(skip(state, body))]
pub async fn update_card(
    State(state): State<AppState>,
    Json(body): Json<UpdateCardBody>,
) -> HandlerResult {
    let reference = require(body.subscription_reference_code, "subscriptionReferenceCode")?;
    let card_details = require(body.card_details, "cardDetails")?;

    let request = CardUpdateRequest::new(&reference, &card_details);

    let result = state
        .provider
        .update_subscription_card(&request)
        .await
        .map_err(|e| {
            error!("Card update failed for {}: {}", reference, e);
            error_to_response(e)
        })?;

    relay(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope() {
        let err = ErrorResponse::new("Card declined").with_error_code(Some("5152".into()));
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Card declined");
        assert_eq!(json["errorCode"], "5152");
    }

    #[test]
    fn test_error_code_omitted_when_absent() {
        let json = serde_json::to_value(ErrorResponse::new("boom")).unwrap();
        assert!(json.get("errorCode").is_none());
    }

    #[test]
    fn test_provider_rejection_maps_to_400() {
        let (status, Json(body)) = error_to_response(GatewayError::ProviderRejected {
            error_code: Some("12".into()),
            message: "Invalid card number".into(),
        });
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "Invalid card number");
        assert_eq!(body.error_code.as_deref(), Some("12"));
    }

    #[test]
    fn test_network_error_maps_to_500() {
        let (status, _) = error_to_response(GatewayError::Network("connection refused".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_client_ip_takes_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "85.34.78.112, 10.0.0.1".parse().unwrap());
        assert_eq!(client_ip(&headers), Some("85.34.78.112"));
        assert_eq!(client_ip(&HeaderMap::new()), None);
    }
}
