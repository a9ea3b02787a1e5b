//! Authorization gates: the composable per-request check chain.
//!
//! Every protected request passes the identity verifier (an inbound
//! extractor) and then one or more [`Gate`]s. A gate is a capability that
//! evaluates a verified [`Identity`] and either lets the request continue or
//! short-circuits it before any handler or store mutation runs.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::UserRepository;
use crate::domain::{DomainError, EmailAddress, Role};

/// Verified identity claims extracted from a bearer credential.
///
/// Deliberately minimal: the credential asserts *who* the caller is, never
/// what they may do. Roles are re-read from the store by [`RoleGate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    email: EmailAddress,
}

impl Identity {
    /// Wrap verified claims.
    pub fn new(email: EmailAddress) -> Self {
        Self { email }
    }

    /// The subject's e-mail address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

/// A request-pipeline authorization stage.
#[async_trait]
pub trait Gate: Send + Sync {
    /// Let the identity pass or fail with the gate's error.
    async fn evaluate(&self, identity: &Identity) -> Result<(), DomainError>;
}

/// Evaluate gates in order, stopping at the first failure.
pub async fn evaluate_all(gates: &[&dyn Gate], identity: &Identity) -> Result<(), DomainError> {
    for gate in gates {
        gate.evaluate(identity).await?;
    }
    Ok(())
}

/// Role membership gate.
///
/// Always re-reads the caller's role from the user store at request time, so
/// role changes take effect without credential reissuance. A missing user
/// record fails closed as `Forbidden`, never a permissive default.
pub struct RoleGate {
    users: Arc<dyn UserRepository>,
    allowed: Vec<Role>,
}

impl RoleGate {
    /// Gate on membership in `allowed`.
    pub fn new(users: Arc<dyn UserRepository>, allowed: impl Into<Vec<Role>>) -> Self {
        Self {
            users,
            allowed: allowed.into(),
        }
    }
}

#[async_trait]
impl Gate for RoleGate {
    async fn evaluate(&self, identity: &Identity) -> Result<(), DomainError> {
        let user = self
            .users
            .find_by_email(identity.email())
            .await
            .map_err(|err| DomainError::internal(err.to_string()))?;
        match user {
            Some(user) if self.allowed.contains(&user.role) => Ok(()),
            _ => Err(DomainError::forbidden()),
        }
    }
}

/// Ownership gate for endpoints scoped to "my own resources".
///
/// Compares the verified identity against a path- or record-supplied owner.
/// Must run after identity verification; resolving the owning record (and
/// returning `NotFound` when it is absent) is the caller's job.
pub struct OwnershipGate {
    owner: EmailAddress,
}

impl OwnershipGate {
    /// Gate on the caller being `owner`.
    pub fn new(owner: EmailAddress) -> Self {
        Self { owner }
    }
}

#[async_trait]
impl Gate for OwnershipGate {
    async fn evaluate(&self, identity: &Identity) -> Result<(), DomainError> {
        if identity.email() == &self.owner {
            Ok(())
        } else {
            Err(DomainError::forbidden())
        }
    }
}
