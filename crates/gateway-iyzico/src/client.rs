//! # Iyzico Client
//!
//! HTTP client implementing [`PaymentProvider`] against the Iyzico REST
//! API. Every request carries an `IYZWSv2` authorization header signed
//! with HMAC-SHA256 over the random key, the request path, and the body.
//!
//! Error semantics are uniform across operations: a body whose `status` is
//! not `"success"` maps to `GatewayError::ProviderRejected` with the
//! provider's errorCode/errorMessage passed through verbatim; transport
//! failures map to `GatewayError::Network`. No retries, no caching.

use crate::config::IyzicoConfig;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use gateway_core::{
    CardUpdateRequest, GatewayError, PaymentProvider, PaymentRequest, PaymentResult,
    PaymentSearchQuery, PlanChangeRequest, ProviderResponse, SubscriptionCreateRequest,
    LOCALE_TR,
};
use reqwest::{Client, Method};
use serde::Serialize;
use tracing::{debug, error, instrument};
use uuid::Uuid;

/// Iyzico provider client
pub struct IyzicoClient {
    config: IyzicoConfig,
    client: Client,
}

impl IyzicoClient {
    /// Create a new client from explicit configuration
    pub fn new(config: IyzicoConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| GatewayError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        let config = IyzicoConfig::from_env()?;
        Self::new(config)
    }

    /// Build the `IYZWSv2` authorization header for a request.
    ///
    /// signature = hex(HMAC-SHA256(secret, random_key + path + body))
    fn authorization_header(&self, random_key: &str, path: &str, body: &str) -> String {
        let payload = format!("{}{}{}", random_key, path, body);
        let signature = hmac_sha256_hex(&self.config.secret_key, &payload);
        let authorization = format!(
            "apiKey:{}&randomKey:{}&signature:{}",
            self.config.api_key, random_key, signature
        );
        format!("IYZWSv2 {}", BASE64.encode(authorization))
    }

    /// Send a signed request and map the provider's envelope to a result.
    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        fallback_message: &str,
    ) -> PaymentResult<ProviderResponse> {
        let body_text = match body {
            Some(b) => serde_json::to_string(b)
                .map_err(|e| GatewayError::Serialization(e.to_string()))?,
            None => String::new(),
        };

        let random_key = Uuid::new_v4().simple().to_string();
        let authorization = self.authorization_header(&random_key, path, &body_text);
        let url = format!("{}{}", self.config.base_url, path);

        debug!("Calling provider: {} {}", method, path);

        let mut request = self
            .client
            .request(method, &url)
            .header("Authorization", authorization)
            .header("x-iyzi-rnd", random_key);

        if body.is_some() {
            request = request
                .header("Content-Type", "application/json")
                .body(body_text);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let parsed: ProviderResponse = match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(e) => {
                error!("Unparseable provider response: status={}, body={}", status, text);
                if status.is_success() {
                    return Err(GatewayError::Serialization(format!(
                        "Failed to parse provider response: {}",
                        e
                    )));
                }
                return Err(GatewayError::Network(format!("HTTP {}: {}", status, text)));
            }
        };

        if parsed.is_success() {
            Ok(parsed)
        } else {
            error!(
                "Provider rejected: code={:?}, message={:?}",
                parsed.error_code, parsed.error_message
            );
            Err(GatewayError::ProviderRejected {
                error_code: parsed.error_code.clone(),
                message: parsed.error_message_or(fallback_message),
            })
        }
    }
}

#[async_trait]
impl PaymentProvider for IyzicoClient {
    #[instrument(skip(self, request), fields(conversation_id = %request.conversation_id))]
    async fn create_payment(&self, request: &PaymentRequest) -> PaymentResult<ProviderResponse> {
        self.send(Method::POST, "/payment/auth", Some(request), "Payment failed")
            .await
    }

    #[instrument(skip(self, request), fields(plan = %request.pricing_plan_reference_code))]
    async fn initialize_subscription(
        &self,
        request: &SubscriptionCreateRequest,
    ) -> PaymentResult<ProviderResponse> {
        self.send(
            Method::POST,
            "/v2/subscription/initialize",
            Some(request),
            "Subscription initialization failed",
        )
        .await
    }

    #[instrument(skip(self))]
    async fn cancel_subscription(
        &self,
        subscription_reference_code: &str,
    ) -> PaymentResult<ProviderResponse> {
        let path = format!(
            "/v2/subscription/subscriptions/{}/cancel",
            subscription_reference_code
        );
        let body = serde_json::json!({
            "locale": LOCALE_TR,
            "subscriptionReferenceCode": subscription_reference_code,
        });
        self.send(Method::POST, &path, Some(&body), "Cancellation failed")
            .await
    }

    #[instrument(skip(self))]
    async fn retrieve_subscription(
        &self,
        subscription_reference_code: &str,
    ) -> PaymentResult<ProviderResponse> {
        let path = format!(
            "/v2/subscription/subscriptions/{}",
            subscription_reference_code
        );
        self.send::<()>(Method::GET, &path, None, "Subscription lookup failed")
            .await
    }

    #[instrument(skip(self, query), fields(reference = %query.subscription_reference_code))]
    async fn search_subscription_payments(
        &self,
        query: &PaymentSearchQuery,
    ) -> PaymentResult<ProviderResponse> {
        self.send(
            Method::POST,
            "/v2/subscription/payments/search",
            Some(query),
            "Payment search failed",
        )
        .await
    }

    #[instrument(skip(self, request), fields(reference = %request.subscription_reference_code))]
    async fn change_subscription_plan(
        &self,
        request: &PlanChangeRequest,
    ) -> PaymentResult<ProviderResponse> {
        let path = format!(
            "/v2/subscription/subscriptions/{}/upgrade",
            request.subscription_reference_code
        );
        self.send(Method::POST, &path, Some(request), "Plan change failed")
            .await
    }

    #[instrument(skip(self, request), fields(reference = %request.subscription_reference_code))]
    async fn update_subscription_card(
        &self,
        request: &CardUpdateRequest,
    ) -> PaymentResult<ProviderResponse> {
        self.send(
            Method::POST,
            "/v2/subscription/card-update",
            Some(request),
            "Card update failed",
        )
        .await
    }

    fn provider_name(&self) -> &'static str {
        "iyzico"
    }
}

fn hmac_sha256_hex(secret: &str, message: &str) -> String {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    type HmacSha256 = Hmac<Sha256>;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_core::{BuyerOverrides, CardDetails};
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_card() -> CardDetails {
        CardDetails {
            card_holder_name: "A B".to_string(),
            card_number: "4111 1111 1111 1111".to_string(),
            expire_month: "12".to_string(),
            expire_year: "2030".to_string(),
            cvc: "123".to_string(),
        }
    }

    async fn client_for(server: &MockServer) -> IyzicoClient {
        let config = IyzicoConfig::new("api-key", "secret-key").with_base_url(server.uri());
        IyzicoClient::new(config).unwrap()
    }

    #[test]
    fn test_hmac_sha256_hex() {
        let sig = hmac_sha256_hex("secret", "rnd/payment/auth{}");
        assert_eq!(sig.len(), 64);
        // Deterministic for fixed inputs
        assert_eq!(sig, hmac_sha256_hex("secret", "rnd/payment/auth{}"));
    }

    #[test]
    fn test_authorization_header_shape() {
        let config = IyzicoConfig::new("api-key", "secret-key");
        let client = IyzicoClient::new(config).unwrap();

        let header = client.authorization_header("rnd123", "/payment/auth", "{}");
        assert!(header.starts_with("IYZWSv2 "));

        let decoded = BASE64.decode(header.trim_start_matches("IYZWSv2 ")).unwrap();
        let decoded = String::from_utf8(decoded).unwrap();
        assert!(decoded.starts_with("apiKey:api-key&randomKey:rnd123&signature:"));
    }

    #[tokio::test]
    async fn test_create_payment_sends_provider_schema() {
        let server = MockServer::start().await;

        // The outbound payload must carry price == paidPrice, TRY, and a
        // whitespace-stripped card number.
        Mock::given(method("POST"))
            .and(path("/payment/auth"))
            .and(body_partial_json(serde_json::json!({
                "price": "100.00",
                "paidPrice": "100.00",
                "currency": "TRY",
                "installment": "1",
                "paymentCard": { "cardNumber": "4111111111111111" },
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "paymentId": "p1",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let request = PaymentRequest::subscription_charge(
            "u1",
            "100.00",
            &sample_card(),
            &BuyerOverrides::default(),
            None,
        );

        let response = client.create_payment(&request).await.unwrap();
        assert!(response.is_success());
        assert_eq!(response.payment_id.as_deref(), Some("p1"));
    }

    #[tokio::test]
    async fn test_provider_failure_maps_to_rejection() {
        let server = MockServer::start().await;

        // Iyzico reports declines with HTTP 200 and status=failure.
        Mock::given(method("POST"))
            .and(path("/payment/auth"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "failure",
                "errorCode": "5152",
                "errorMessage": "Card declined",
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let request = PaymentRequest::subscription_charge(
            "u1",
            "100.00",
            &sample_card(),
            &BuyerOverrides::default(),
            None,
        );

        let err = client.create_payment(&request).await.unwrap_err();
        match err {
            GatewayError::ProviderRejected { error_code, message } => {
                assert_eq!(error_code.as_deref(), Some("5152"));
                assert_eq!(message, "Card declined");
            }
            other => panic!("expected ProviderRejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_cancel_hits_subscription_endpoint() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2/subscription/subscriptions/sub-1/cancel"))
            .and(body_partial_json(serde_json::json!({
                "subscriptionReferenceCode": "sub-1",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let response = client.cancel_subscription("sub-1").await.unwrap();
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_retrieve_subscription_get() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/subscription/subscriptions/sub-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "subscriptionStatus": "ACTIVE",
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let response = client.retrieve_subscription("sub-1").await.unwrap();
        assert_eq!(
            response.extra.get("subscriptionStatus").and_then(|v| v.as_str()),
            Some("ACTIVE")
        );
    }

    #[tokio::test]
    async fn test_unparseable_error_body_maps_to_network() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2/subscription/card-update"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let request = CardUpdateRequest::new("sub-1", &sample_card());

        let err = client.update_subscription_card(&request).await.unwrap_err();
        assert!(matches!(err, GatewayError::Network(_)));
    }
}
