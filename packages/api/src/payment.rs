//! # Payment intent coordination
//!
//! [`PaymentIntentCoordinator`] owns the lifecycle of the one-time setup-fee
//! payment: request a single-use intent from the backend, then drive exactly
//! one successful confirmation through the processor.
//!
//! The processor boundary is the [`PaymentProcessor`] trait;
//! [`StripeProcessor`] is the production implementation, confirming the
//! intent directly against the processor's REST API with the publishable key
//! (the same call the hosted card element makes under the hood). Status is
//! only authoritative after reconciliation, so the coordinator never writes
//! into the session store.

use serde::Deserialize;

use crate::client::Backend;
use crate::config::PortalConfig;
use crate::error::{ApiError, PaymentError, ProcessorError};

/// Terminal and in-flight states of a payment intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentStatus {
    RequiresConfirmation,
    Succeeded,
    Failed,
    Pending,
}

impl IntentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentStatus::RequiresConfirmation => "requires_confirmation",
            IntentStatus::Succeeded => "succeeded",
            IntentStatus::Failed => "failed",
            IntentStatus::Pending => "pending",
        }
    }
}

impl std::fmt::Display for IntentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single-use payment authorization. Held only in memory for the lifetime
/// of the payment form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub client_secret: String,
    pub status: IntentStatus,
}

/// User-entered payment-method details handed to the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDetails {
    pub number: String,
    pub exp_month: String,
    pub exp_year: String,
    pub cvc: String,
}

/// The payment-processor seam: confirm a held client secret with card
/// details and report the resulting intent status.
pub trait PaymentProcessor {
    async fn confirm_card_payment(
        &self,
        client_secret: &str,
        card: &CardDetails,
    ) -> Result<IntentStatus, ProcessorError>;
}

/// Obtains a single-use payment intent and drives it to a terminal outcome.
#[derive(Clone, Debug)]
pub struct PaymentIntentCoordinator<P> {
    processor: P,
    intent: Option<PaymentIntent>,
}

impl<P: PaymentProcessor> PaymentIntentCoordinator<P> {
    pub fn new(processor: P) -> Self {
        Self {
            processor,
            intent: None,
        }
    }

    /// Whether a confirmable intent is currently held.
    pub fn ready(&self) -> bool {
        matches!(
            &self.intent,
            Some(intent) if intent.status != IntentStatus::Succeeded
        )
    }

    /// Whether the held intent has already been confirmed successfully.
    pub fn succeeded(&self) -> bool {
        matches!(
            &self.intent,
            Some(intent) if intent.status == IntentStatus::Succeeded
        )
    }

    /// Request a new intent for the setup fee from the backend.
    ///
    /// Must not be attempted before authentication: a missing token fails
    /// with [`ApiError::Auth`] without touching the network.
    pub async fn request_intent<B: Backend>(
        &mut self,
        backend: &B,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        let token = token.ok_or(ApiError::Auth)?;
        let client_secret = backend.create_payment_intent(token).await?;
        self.intent = Some(PaymentIntent {
            client_secret,
            status: IntentStatus::RequiresConfirmation,
        });
        Ok(())
    }

    /// Submit the held client secret plus card details to the processor.
    ///
    /// Refuses with [`PaymentError::NotReady`], without a processor call,
    /// when no intent has been obtained, or when the held intent already
    /// reached a terminal success (at most one successful confirmation per
    /// intent). A card error leaves the intent held so the user can correct
    /// and resubmit.
    pub async fn confirm(&mut self, card: &CardDetails) -> Result<IntentStatus, PaymentError> {
        let Some(intent) = self.intent.as_mut() else {
            return Err(PaymentError::NotReady);
        };
        if intent.status == IntentStatus::Succeeded {
            return Err(PaymentError::NotReady);
        }

        match self
            .processor
            .confirm_card_payment(&intent.client_secret, card)
            .await
        {
            Ok(status) => {
                intent.status = status;
                Ok(status)
            }
            Err(ProcessorError::Card(message)) => Err(PaymentError::Card(message)),
            Err(err) => Err(PaymentError::Unexpected(err.to_string())),
        }
    }
}

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

#[derive(Debug, Deserialize)]
struct StripeIntentResponse {
    status: Option<String>,
    error: Option<StripeErrorBody>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    #[serde(rename = "type")]
    kind: Option<String>,
    message: Option<String>,
}

/// Confirms payment intents against the processor's REST API using the
/// publishable key, the browser-side half of the card flow.
#[derive(Clone, Debug)]
pub struct StripeProcessor {
    http: reqwest::Client,
    publishable_key: String,
}

impl StripeProcessor {
    pub fn new(config: &PortalConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            publishable_key: config.publishable_key.clone(),
        }
    }

    /// The intent id is the prefix of its client secret
    /// (`"pi_…_secret_…"`).
    fn intent_id(client_secret: &str) -> Result<&str, ProcessorError> {
        client_secret
            .split_once("_secret_")
            .map(|(id, _)| id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ProcessorError::Other("malformed client secret".into()))
    }

    fn map_status(status: &str) -> IntentStatus {
        match status {
            "succeeded" => IntentStatus::Succeeded,
            "processing" => IntentStatus::Pending,
            "requires_confirmation" | "requires_action" | "requires_payment_method" => {
                IntentStatus::RequiresConfirmation
            }
            _ => IntentStatus::Failed,
        }
    }
}

impl PaymentProcessor for StripeProcessor {
    async fn confirm_card_payment(
        &self,
        client_secret: &str,
        card: &CardDetails,
    ) -> Result<IntentStatus, ProcessorError> {
        let intent_id = Self::intent_id(client_secret)?;

        let form = [
            ("key", self.publishable_key.as_str()),
            ("client_secret", client_secret),
            ("payment_method_data[type]", "card"),
            ("payment_method_data[card][number]", card.number.as_str()),
            ("payment_method_data[card][exp_month]", card.exp_month.as_str()),
            ("payment_method_data[card][exp_year]", card.exp_year.as_str()),
            ("payment_method_data[card][cvc]", card.cvc.as_str()),
        ];

        let response = self
            .http
            .post(format!("{STRIPE_API_BASE}/payment_intents/{intent_id}/confirm"))
            .form(&form)
            .send()
            .await?;

        let body: StripeIntentResponse = response
            .json()
            .await
            .map_err(|err| ProcessorError::Other(format!("invalid processor response: {err}")))?;

        if let Some(error) = body.error {
            let message = error
                .message
                .unwrap_or_else(|| "payment was declined".into());
            return match error.kind.as_deref() {
                Some("card_error") | Some("validation_error") => {
                    Err(ProcessorError::Card(message))
                }
                _ => Err(ProcessorError::Other(message)),
            };
        }

        match body.status.as_deref() {
            Some(status) => Ok(Self::map_status(status)),
            None => Err(ProcessorError::Other(
                "processor response missing intent status".into(),
            )),
        }
    }
}
