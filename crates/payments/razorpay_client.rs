use anyhow::Result;
use hmac::{Hmac, Mac};
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::json;
use sha2::Sha256;
use tracing::error;

type HmacSha256 = Hmac<Sha256>;

const ORDERS_URL: &str = "https://api.razorpay.com/v1/orders";

/// Minimal Razorpay client built on reqwest.
pub struct RazorpayClient {
    http: reqwest::Client,
    key_id: String,
    key_secret: String,
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorEnvelope {
    error: RazorpayErrorDetails,
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorDetails {
    code: Option<String>,
    description: Option<String>,
    field: Option<String>,
}

impl RazorpayClient {
    pub fn new(key_id: String, key_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            key_id,
            key_secret,
        }
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    async fn ensure_success(resp: reqwest::Response, context: &str) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "<empty response body>".to_string(),
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        let (error_code, error_description, error_field) =
            match serde_json::from_str::<RazorpayErrorEnvelope>(&body) {
                Ok(envelope) => {
                    let details = envelope.error;
                    (details.code, details.description, details.field)
                }
                Err(_) => (None, None, None),
            };

        error!(
            status = %status,
            razorpay_error_code = ?error_code,
            razorpay_error_description = ?error_description,
            razorpay_error_field = ?error_field,
            response_body = %body,
            context = %context,
            "razorpay api request failed"
        );

        anyhow::bail!(
            "Razorpay API request failed: {} (status {})",
            context,
            status
        );
    }

    /// Creates an order for the given amount (in paise) and returns its id.
    /// Razorpay orders docs: https://razorpay.com/docs/api/orders
    pub async fn create_order(&self, amount_minor: i64, receipt: &str) -> Result<String> {
        if self.key_id.is_empty() || self.key_secret.is_empty() {
            anyhow::bail!("Razorpay credentials are not configured");
        }

        let body = json!({
            "amount": amount_minor,
            "currency": "INR",
            "receipt": receipt,
        });

        let resp = self
            .http
            .post(ORDERS_URL)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "create order").await?;

        #[derive(Deserialize)]
        struct OrderResp {
            id: String,
        }

        let parsed: OrderResp = resp.json().await?;
        Ok(parsed.id)
    }

    /// Checks the checkout signature Razorpay hands back after a payment:
    /// HMAC-SHA256 over `order_id|payment_id` keyed with the key secret.
    pub fn verify_signature(&self, payment_id: &str, order_id: &str, signature: &str) -> bool {
        let signed_payload = format!("{order_id}|{payment_id}");

        let Ok(mut mac) = HmacSha256::new_from_slice(self.key_secret.as_bytes()) else {
            return false;
        };
        mac.update(signed_payload.as_bytes());
        let expected = mac.finalize().into_bytes();

        let Ok(provided) = hex::decode(signature) else {
            return false;
        };

        expected[..] == provided[..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(secret: &str, order_id: &str, payment_id: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{order_id}|{payment_id}").as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn verify_signature_accepts_matching_hmac() {
        let client = RazorpayClient::new("rzp_test_key".to_string(), "secret".to_string());
        let signature = sign("secret", "order_123", "pay_456");

        assert!(client.verify_signature("pay_456", "order_123", &signature));
    }

    #[test]
    fn verify_signature_rejects_wrong_secret() {
        let client = RazorpayClient::new("rzp_test_key".to_string(), "secret".to_string());
        let signature = sign("other-secret", "order_123", "pay_456");

        assert!(!client.verify_signature("pay_456", "order_123", &signature));
    }

    #[test]
    fn verify_signature_rejects_malformed_hex() {
        let client = RazorpayClient::new("rzp_test_key".to_string(), "secret".to_string());

        assert!(!client.verify_signature("pay_456", "order_123", "not-hex"));
    }
}
