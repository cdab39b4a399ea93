//! # Portal backend client
//!
//! [`PortalClient`] speaks the backend REST contract (JSON over HTTPS,
//! bearer-token authenticated except for login/register):
//!
//! | Endpoint | Auth | Request | Response |
//! |----------|------|---------|----------|
//! | `POST /auth/login` | no | `{email, password}` | `{token, userId, name, paymentStatus}` |
//! | `POST /auth/register` | no | `{name, email, password}` | `{userId}` |
//! | `POST /api/create-payment-intent` | bearer | `{}` | `{clientSecret}` |
//! | `GET /api/payment-status` | bearer | — | `{paymentStatus}` |
//! | `POST /api/update-payment-status` | bearer | `{}` | `{paymentStatus}` |
//!
//! Non-2xx responses carry `{"error": msg}` (older backend revisions used
//! `{"message": msg}`; both are accepted). 401 maps to [`ApiError::Auth`],
//! transport failures to [`ApiError::Network`], anything malformed to
//! [`ApiError::Backend`].
//!
//! The authenticated payment endpoints are also exposed through the
//! [`Backend`] trait so the coordinator and reconciler can be exercised
//! against stubs in tests.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::PortalConfig;
use crate::error::ApiError;
use store::{Identity, PaymentStatus};

/// The authenticated backend surface the payment flow depends on.
pub trait Backend {
    /// Request a new single-use payment intent for the fixed setup fee,
    /// returning its client secret.
    async fn create_payment_intent(&self, token: &str) -> Result<String, ApiError>;

    /// Read the authoritative payment status for the current user.
    async fn payment_status(&self, token: &str) -> Result<PaymentStatus, ApiError>;

    /// Ask the backend to reconcile and report the now-authoritative payment
    /// status. Idempotent on the backend side.
    async fn update_payment_status(&self, token: &str) -> Result<PaymentStatus, ApiError>;
}

/// Successful `POST /auth/login` payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    pub payment_status: PaymentStatus,
}

impl LoginResponse {
    /// Split into the `(token, user)` pair the session store adopts. The
    /// backend does not echo the email, so the caller supplies it.
    pub fn into_session(self, email: &str) -> (String, Identity) {
        (
            self.token,
            Identity {
                id: self.user_id,
                name: self.name,
                email: email.to_string(),
                payment_status: self.payment_status,
            },
        )
    }
}

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    #[serde(rename = "userId")]
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    #[serde(rename = "clientSecret")]
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    #[serde(rename = "paymentStatus")]
    payment_status: PaymentStatus,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// REST client for the portal backend.
#[derive(Clone, Debug)]
pub struct PortalClient {
    http: reqwest::Client,
    base_url: String,
}

impl PortalClient {
    pub fn new(config: &PortalConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.backend_url.clone(),
        }
    }

    /// Authenticate with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let response = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Create an account; returns the new user id.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        let response = self
            .http
            .post(format!("{}/auth/register", self.base_url))
            .json(&serde_json::json!({ "name": name, "email": email, "password": password }))
            .send()
            .await?;
        let body: RegisterResponse = Self::parse(response).await?;
        Ok(body.user_id)
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Auth);
        }
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error.or(b.message))
                .unwrap_or_else(|| format!("request failed with HTTP {status}"));
            tracing::warn!("backend error ({status}): {message}");
            return Err(ApiError::Backend(message));
        }

        serde_json::from_str(&body).map_err(|err| {
            tracing::warn!("unparseable backend response: {err}");
            ApiError::Backend("received an invalid response from the server".into())
        })
    }
}

impl Backend for PortalClient {
    async fn create_payment_intent(&self, token: &str) -> Result<String, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/create-payment-intent", self.base_url))
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        let body: IntentResponse = Self::parse(response).await?;
        body.client_secret
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| ApiError::Backend("payment intent response missing client secret".into()))
    }

    async fn payment_status(&self, token: &str) -> Result<PaymentStatus, ApiError> {
        let response = self
            .http
            .get(format!("{}/api/payment-status", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;
        let body: StatusResponse = Self::parse(response).await?;
        Ok(body.payment_status)
    }

    async fn update_payment_status(&self, token: &str) -> Result<PaymentStatus, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/update-payment-status", self.base_url))
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        let body: StatusResponse = Self::parse(response).await?;
        Ok(body.payment_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_deserializes_wire_shape() {
        let body: LoginResponse = serde_json::from_str(
            r#"{"message":"Login successful","token":"jwt-abc","userId":"rec123","name":"Ada","paymentStatus":"unpaid"}"#,
        )
        .unwrap();
        assert_eq!(body.token, "jwt-abc");
        assert_eq!(body.user_id, "rec123");
        assert_eq!(body.payment_status, PaymentStatus::Unpaid);
    }

    #[test]
    fn login_response_builds_a_complete_identity() {
        let body: LoginResponse = serde_json::from_str(
            r#"{"token":"jwt-abc","userId":"rec123","name":"Ada","paymentStatus":"paid"}"#,
        )
        .unwrap();
        let (token, user) = body.into_session("ada@example.com");
        assert_eq!(token, "jwt-abc");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn error_body_accepts_both_keys() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"Invalid email or password"}"#).unwrap();
        assert_eq!(body.error.as_deref(), Some("Invalid email or password"));

        let body: ErrorBody = serde_json::from_str(r#"{"message":"Token has expired!"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("Token has expired!"));
    }

    #[test]
    fn status_response_tolerates_unknown_statuses() {
        let body: StatusResponse =
            serde_json::from_str(r#"{"paymentStatus":"refund_pending"}"#).unwrap();
        assert_eq!(body.payment_status, PaymentStatus::Unknown);
    }
}
