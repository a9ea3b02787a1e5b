//! Port abstraction for the user collection.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Role, User, UserId};

use super::RepositoryError;

/// Outcome of an idempotent registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// A new user record was stored.
    Created(User),
    /// The e-mail was already registered; the stored record is untouched.
    AlreadyRegistered(User),
}

/// Port for user storage and role management.
///
/// Role freshness depends on this port: gates call [`UserRepository::find_by_email`]
/// on every request rather than trusting anything inside the credential.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Look up a user by normalised e-mail address.
    async fn find_by_email(&self, email: &EmailAddress)
        -> Result<Option<User>, RepositoryError>;

    /// Insert the user unless the e-mail is already registered.
    ///
    /// Re-registering an existing e-mail is a no-op that never overwrites
    /// the stored role.
    async fn create_if_absent(&self, user: User) -> Result<RegistrationOutcome, RepositoryError>;

    /// List all registered users.
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;

    /// Change a user's role, returning the updated record if it exists.
    async fn set_role(&self, id: &UserId, role: Role) -> Result<Option<User>, RepositoryError>;
}
