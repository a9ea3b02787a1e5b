//! User directory use-cases: registration and role management.

use std::sync::Arc;

use crate::domain::ports::{RegistrationOutcome, UserRepository};
use crate::domain::{DomainError, EmailAddress, Role, User, UserId};

/// Registration and role management over the user store.
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    /// Construct the service over a user repository port.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Register an e-mail address, defaulting the role to student.
    ///
    /// Idempotent: a second registration of the same e-mail reports
    /// [`RegistrationOutcome::AlreadyRegistered`] and never overwrites the
    /// stored role.
    pub async fn register(
        &self,
        email: EmailAddress,
        role: Option<Role>,
    ) -> Result<RegistrationOutcome, DomainError> {
        let user = User::register(email, role.unwrap_or(Role::Student));
        self.users
            .create_if_absent(user)
            .await
            .map_err(|err| DomainError::internal(err.to_string()))
    }

    /// List every registered user.
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.users
            .list()
            .await
            .map_err(|err| DomainError::internal(err.to_string()))
    }

    /// Admin role change. Takes effect on the next gated request without
    /// credential reissuance.
    pub async fn set_role(&self, id: &UserId, role: Role) -> Result<User, DomainError> {
        self.users
            .set_role(id, role)
            .await
            .map_err(|err| DomainError::internal(err.to_string()))?
            .ok_or_else(|| DomainError::not_found("user not found"))
    }

    /// The stored role for an e-mail, if the user exists.
    pub async fn role_of(&self, email: &EmailAddress) -> Result<Option<Role>, DomainError> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .map_err(|err| DomainError::internal(err.to_string()))?;
        Ok(user.map(|user| user.role))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockUserRepository, RepositoryError};
    use crate::domain::ErrorCode;

    fn email(raw: &str) -> EmailAddress {
        EmailAddress::parse(raw).expect("valid email")
    }

    #[tokio::test]
    async fn registration_defaults_to_student() {
        let mut users = MockUserRepository::new();
        users
            .expect_create_if_absent()
            .withf(|user| user.role == Role::Student)
            .returning(|user| Ok(RegistrationOutcome::Created(user)));
        let service = UserService::new(Arc::new(users));

        let outcome = service
            .register(email("a@x.com"), None)
            .await
            .expect("registration should succeed");
        assert!(matches!(outcome, RegistrationOutcome::Created(_)));
    }

    #[tokio::test]
    async fn set_role_maps_missing_user_to_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_set_role().returning(|_, _| Ok(None));
        let service = UserService::new(Arc::new(users));

        let err = service
            .set_role(&UserId::random(), Role::Instructor)
            .await
            .expect_err("missing user must fail");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn store_failures_surface_as_internal_errors() {
        let mut users = MockUserRepository::new();
        users
            .expect_list()
            .returning(|| Err(RepositoryError::Store("boom".to_owned())));
        let service = UserService::new(Arc::new(users));

        let err = service.list().await.expect_err("store failure propagates");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
