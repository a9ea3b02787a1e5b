//! Port abstraction for the class offering collection.
//!
//! [`ClassRepository::reserve_seat`] is the single correctness-critical
//! primitive of the system: the capacity check and the decrement must be one
//! compare-and-write inside the store, never a read-then-write pair in
//! application code.

use async_trait::async_trait;

use crate::domain::{ClassFields, ClassId, ClassOffering, ClassStatus, EmailAddress};

use super::RepositoryError;

/// Result of the atomic conditional seat decrement.
#[derive(Debug, Clone, PartialEq)]
pub enum SeatReservation {
    /// `available_seats` was positive and has been decremented by one.
    Reserved {
        /// Seats remaining after the decrement.
        remaining: u32,
    },
    /// `available_seats` was already zero; nothing was written.
    Exhausted,
    /// No offering exists under this id.
    NotFound,
}

/// Port for class offering storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClassRepository: Send + Sync {
    /// Store a new offering.
    async fn insert(&self, offering: ClassOffering) -> Result<ClassOffering, RepositoryError>;

    /// List every offering.
    async fn list(&self) -> Result<Vec<ClassOffering>, RepositoryError>;

    /// Look up a single offering.
    async fn find(&self, id: &ClassId) -> Result<Option<ClassOffering>, RepositoryError>;

    /// List offerings created by the given instructor.
    async fn list_by_instructor(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<ClassOffering>, RepositoryError>;

    /// Replace the instructor-editable fields, returning the updated
    /// offering if it exists.
    async fn replace_fields(
        &self,
        id: &ClassId,
        fields: ClassFields,
    ) -> Result<Option<ClassOffering>, RepositoryError>;

    /// Admin moderation: set status and optional feedback.
    async fn moderate(
        &self,
        id: &ClassId,
        status: ClassStatus,
        feedback: Option<String>,
    ) -> Result<Option<ClassOffering>, RepositoryError>;

    /// Delete an offering. Returns `true` when a record was removed.
    async fn delete(&self, id: &ClassId) -> Result<bool, RepositoryError>;

    /// Decrement `available_seats` by one if and only if it is positive,
    /// as one atomic conditional operation.
    ///
    /// Under concurrent calls for the last remaining seat, exactly one
    /// caller observes [`SeatReservation::Reserved`]; the counter never goes
    /// negative.
    async fn reserve_seat(&self, id: &ClassId) -> Result<SeatReservation, RepositoryError>;
}
