//! Port abstraction for the external payment gateway collaborator.
//!
//! The gateway protocol is out of scope; the domain only needs
//! `create_payment_intent(amount, currency) -> client_secret`. Calls have no
//! internal retry; a failure surfaces immediately as an upstream error.

use async_trait::async_trait;
use serde::Serialize;

/// Errors raised by payment gateway adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentGatewayError {
    /// The gateway rejected or failed the intent request.
    #[error("payment gateway request failed: {0}")]
    Upstream(String),
}

/// An intent handle the client uses to complete the charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    /// Opaque secret returned by the gateway.
    pub client_secret: String,
}

/// Port for creating payment intents.
///
/// `amount_minor` is always in integer minor units; the [`crate::domain::Price`]
/// conversion happens before this boundary.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Ask the gateway for a new payment intent.
    async fn create_payment_intent(
        &self,
        amount_minor: u64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentGatewayError>;
}
