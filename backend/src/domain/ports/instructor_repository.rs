//! Port abstraction for the instructor profile collection.
//!
//! The HTTP surface over this collection is read-only; profiles are written
//! by operational tooling, so the port carries an insert for seeding but no
//! update or delete.

use async_trait::async_trait;

use crate::domain::{InstructorId, InstructorProfile};

use super::RepositoryError;

/// Port for instructor profile storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InstructorRepository: Send + Sync {
    /// Store a profile.
    async fn insert(
        &self,
        profile: InstructorProfile,
    ) -> Result<InstructorProfile, RepositoryError>;

    /// List every profile.
    async fn list(&self) -> Result<Vec<InstructorProfile>, RepositoryError>;

    /// Look up a single profile.
    async fn find(
        &self,
        id: &InstructorId,
    ) -> Result<Option<InstructorProfile>, RepositoryError>;
}
