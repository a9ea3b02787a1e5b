//! Local stand-in for the card payment gateway.
//!
//! Fabricates client secrets with the same shape a hosted gateway returns,
//! so the intent endpoint and its clients behave identically in development
//! and under test.

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{PaymentGateway, PaymentGatewayError, PaymentIntent};

/// Gateway adapter that mints intents locally instead of calling out.
#[derive(Debug, Default)]
pub struct LocalPaymentGateway;

impl LocalPaymentGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentGateway for LocalPaymentGateway {
    async fn create_payment_intent(
        &self,
        amount_minor: u64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentGatewayError> {
        let intent = Uuid::new_v4().simple();
        let secret = Uuid::new_v4().simple();
        debug!(amount_minor, currency, %intent, "minted local payment intent");
        Ok(PaymentIntent {
            client_secret: format!("pi_{intent}_secret_{secret}"),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn secrets_are_unique_per_intent() {
        let gateway = LocalPaymentGateway::new();
        let first = gateway
            .create_payment_intent(2000, "usd")
            .await
            .expect("intent");
        let second = gateway
            .create_payment_intent(2000, "usd")
            .await
            .expect("intent");
        assert!(first.client_secret.starts_with("pi_"));
        assert_ne!(first.client_secret, second.client_secret);
    }
}
