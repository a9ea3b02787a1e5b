//! Payment record model.
//!
//! Records are append-only: written exactly once per successful booking
//! confirmation, never mutated or deleted.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ClassId, EmailAddress, Price};

/// Stable payment identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(Uuid);

impl PaymentId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for PaymentId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A captured payment for a confirmed booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub email: EmailAddress,
    pub class_id: ClassId,
    pub price: Price,
    pub date: DateTime<Utc>,
    pub transaction_ref: String,
}

impl PaymentRecord {
    /// Construct a record dated now.
    pub fn capture(
        email: EmailAddress,
        class_id: ClassId,
        price: Price,
        transaction_ref: String,
    ) -> Self {
        Self {
            id: PaymentId::random(),
            email,
            class_id,
            price,
            date: Utc::now(),
            transaction_ref,
        }
    }
}
