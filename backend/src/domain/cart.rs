//! Cart item model.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ClassId, EmailAddress};

/// Stable cart item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartItemId(Uuid);

impl CartItemId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for CartItemId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for CartItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An enrollment intent: one student, one class.
///
/// ## Invariants
/// - At most one item exists per `(class_id, email)` pair, enforced by the
///   store's pre-insert existence check under the collection lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub class_id: ClassId,
    pub email: EmailAddress,
}

impl CartItem {
    /// Construct a new enrollment intent with a random identifier.
    pub fn new(class_id: ClassId, email: EmailAddress) -> Self {
        Self {
            id: CartItemId::random(),
            class_id,
            email,
        }
    }
}
