//! Port abstraction for the cart collection.

use async_trait::async_trait;

use crate::domain::{CartItem, CartItemId, EmailAddress};

use super::RepositoryError;

/// Outcome of a deduplicated cart insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartInsertOutcome {
    /// No item existed for this `(class, student)` pair; one was stored.
    Added(CartItem),
    /// An item already existed; the store is unchanged.
    AlreadyPresent(CartItem),
}

/// Port for cart item storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Insert the item unless one already exists for the same
    /// `(class_id, email)` pair. The existence check and insert run under
    /// the collection lock.
    async fn insert_if_absent(
        &self,
        item: CartItem,
    ) -> Result<CartInsertOutcome, RepositoryError>;

    /// List a student's cart items.
    async fn list_by_email(&self, email: &EmailAddress)
        -> Result<Vec<CartItem>, RepositoryError>;

    /// Look up a single item, e.g. to resolve its owner before deletion.
    async fn find(&self, id: &CartItemId) -> Result<Option<CartItem>, RepositoryError>;

    /// Delete an item. Returns `true` when a record was removed.
    async fn delete(&self, id: &CartItemId) -> Result<bool, RepositoryError>;
}
