//! Port abstraction for the append-only payment collection.

use async_trait::async_trait;

use crate::domain::{EmailAddress, PaymentRecord};

use super::RepositoryError;

/// Port for payment record storage. Append-only by design.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Append a captured payment.
    async fn append(&self, record: PaymentRecord) -> Result<PaymentRecord, RepositoryError>;

    /// List a student's payments.
    async fn list_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<PaymentRecord>, RepositoryError>;
}
