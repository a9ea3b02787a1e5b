//! Booking and payment orchestration.
//!
//! The capacity-sensitive core: the only writer of `available_seats`, invoked
//! solely from the payment-confirmation handler. A booking attempt moves
//! `Requested → CapacityChecked → {Decremented, Rejected} → Recorded`; the
//! decrement always commits strictly before the payment record is appended,
//! and an exhausted class is rejected with `Conflict`; no payment is
//! recorded for a seat that was never reserved.
//!
//! Known limitation: a caller disconnecting after the decrement commits does
//! not roll it back; there is no compensating transaction.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ports::{
    ClassRepository, PaymentGateway, PaymentIntent, PaymentRepository, SeatReservation,
};
use crate::domain::{ClassId, DomainError, EmailAddress, PaymentRecord, Price};

/// Currency every intent is denominated in.
const CURRENCY: &str = "usd";

/// A confirmed-checkout request for a single class seat.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmPayment {
    pub class_id: ClassId,
    pub email: EmailAddress,
    pub price: Price,
    /// Gateway transaction reference reported by the client.
    pub transaction_ref: String,
}

/// Orchestrates seat reservation and payment capture.
pub struct BookingService {
    classes: Arc<dyn ClassRepository>,
    payments: Arc<dyn PaymentRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl BookingService {
    /// Construct the orchestrator over its ports.
    pub fn new(
        classes: Arc<dyn ClassRepository>,
        payments: Arc<dyn PaymentRepository>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            classes,
            payments,
            gateway,
        }
    }

    /// Ask the gateway for a payment intent over the minor-unit amount.
    pub async fn create_intent(&self, price: Price) -> Result<PaymentIntent, DomainError> {
        self.gateway
            .create_payment_intent(price.minor_units(), CURRENCY)
            .await
            .map_err(|err| DomainError::internal(err.to_string()))
    }

    /// Confirm a payment: reserve a seat atomically, then record the payment.
    ///
    /// The capacity check and decrement are one conditional compare-and-write
    /// inside the store ([`ClassRepository::reserve_seat`]); under concurrent
    /// confirmations for the last seat exactly one succeeds and the rest
    /// observe `Conflict`.
    pub async fn confirm(&self, request: ConfirmPayment) -> Result<PaymentRecord, DomainError> {
        let reservation = self
            .classes
            .reserve_seat(&request.class_id)
            .await
            .map_err(|err| DomainError::internal(err.to_string()))?;

        match reservation {
            SeatReservation::NotFound => Err(DomainError::not_found("class not found")),
            SeatReservation::Exhausted => {
                warn!(class_id = %request.class_id, "booking rejected: no seats remaining");
                Err(DomainError::conflict("class is fully booked"))
            }
            SeatReservation::Reserved { remaining } => {
                info!(
                    class_id = %request.class_id,
                    remaining,
                    "seat reserved, recording payment"
                );
                let record = PaymentRecord::capture(
                    request.email,
                    request.class_id,
                    request.price,
                    request.transaction_ref,
                );
                self.payments
                    .append(record)
                    .await
                    .map_err(|err| DomainError::internal(err.to_string()))
            }
        }
    }

    /// A student's payment history. Ownership is enforced by the HTTP gate.
    pub async fn history(&self, email: &EmailAddress) -> Result<Vec<PaymentRecord>, DomainError> {
        self.payments
            .list_by_email(email)
            .await
            .map_err(|err| DomainError::internal(err.to_string()))
    }
}
