//! Cart use-cases: deduplicated enrollment intents.

use std::sync::Arc;

use crate::domain::gates::{Gate, Identity, OwnershipGate};
use crate::domain::ports::{CartInsertOutcome, CartRepository};
use crate::domain::{CartItem, CartItemId, ClassId, DomainError, EmailAddress};

/// Cart management over the cart item store.
pub struct CartService {
    items: Arc<dyn CartRepository>,
}

impl CartService {
    /// Construct the service over a cart repository port.
    pub fn new(items: Arc<dyn CartRepository>) -> Self {
        Self { items }
    }

    /// Add an enrollment intent.
    ///
    /// Idempotent by design: a duplicate `(class, student)` pair reports
    /// [`CartInsertOutcome::AlreadyPresent`] rather than creating a second
    /// row or raising a conflict error, so flaky clients can retry without
    /// side effects.
    pub async fn add(
        &self,
        class_id: ClassId,
        email: EmailAddress,
    ) -> Result<CartInsertOutcome, DomainError> {
        self.items
            .insert_if_absent(CartItem::new(class_id, email))
            .await
            .map_err(|err| DomainError::internal(err.to_string()))
    }

    /// List the caller's cart. Ownership is enforced by the HTTP gate before
    /// this runs.
    pub async fn list_for(&self, email: &EmailAddress) -> Result<Vec<CartItem>, DomainError> {
        self.items
            .list_by_email(email)
            .await
            .map_err(|err| DomainError::internal(err.to_string()))
    }

    /// Remove a cart item on behalf of `caller`.
    ///
    /// Ownership is a property of the referenced record, so the item is
    /// resolved first: an absent item is `NotFound` (never an identity
    /// error), and a non-owning caller is rejected before anything is
    /// deleted.
    pub async fn remove(
        &self,
        id: &CartItemId,
        caller: &Identity,
    ) -> Result<CartItem, DomainError> {
        let item = self
            .items
            .find(id)
            .await
            .map_err(|err| DomainError::internal(err.to_string()))?
            .ok_or_else(|| DomainError::not_found("cart item not found"))?;

        OwnershipGate::new(item.email.clone()).evaluate(caller).await?;

        let deleted = self
            .items
            .delete(id)
            .await
            .map_err(|err| DomainError::internal(err.to_string()))?;
        if deleted {
            Ok(item)
        } else {
            // Raced with another deletion between resolve and delete.
            Err(DomainError::not_found("cart item not found"))
        }
    }
}
