//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data`, so they depend only on
//! domain ports and services and stay testable without I/O. The store handle
//! behind the repository ports is process-lifetime state constructed once at
//! startup and injected here, never a global.

use std::sync::Arc;

use crate::domain::ports::{
    CartRepository, ClassRepository, InstructorRepository, PaymentGateway, PaymentRepository,
    TokenCodec, UserRepository,
};
use crate::domain::{
    BookingService, CartService, DomainError, Identity, OwnershipGate, Role, RoleGate,
    UserService, EmailAddress, Gate,
};

/// Parameter object bundling the port implementations for HTTP handlers.
pub struct HttpStatePorts {
    pub tokens: Arc<dyn TokenCodec>,
    pub users: Arc<dyn UserRepository>,
    pub classes: Arc<dyn ClassRepository>,
    pub instructors: Arc<dyn InstructorRepository>,
    pub cart_items: Arc<dyn CartRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub gateway: Arc<dyn PaymentGateway>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub tokens: Arc<dyn TokenCodec>,
    pub users: Arc<dyn UserRepository>,
    pub classes: Arc<dyn ClassRepository>,
    pub instructors: Arc<dyn InstructorRepository>,
    pub directory: Arc<UserService>,
    pub cart: Arc<CartService>,
    pub booking: Arc<BookingService>,
}

impl HttpState {
    /// Wire services over the supplied ports.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            tokens,
            users,
            classes,
            instructors,
            cart_items,
            payments,
            gateway,
        } = ports;
        let directory = Arc::new(UserService::new(Arc::clone(&users)));
        let cart = Arc::new(CartService::new(cart_items));
        let booking = Arc::new(BookingService::new(
            Arc::clone(&classes),
            payments,
            gateway,
        ));
        Self {
            tokens,
            users,
            classes,
            instructors,
            directory,
            cart,
            booking,
        }
    }

    /// Role gate over the user store: membership in `allowed`, read fresh.
    pub async fn require_role(
        &self,
        identity: &Identity,
        allowed: &[Role],
    ) -> Result<(), DomainError> {
        RoleGate::new(Arc::clone(&self.users), allowed)
            .evaluate(identity)
            .await
    }

    /// Ownership gate: the caller must be `owner`.
    pub async fn require_self(
        &self,
        identity: &Identity,
        owner: &EmailAddress,
    ) -> Result<(), DomainError> {
        OwnershipGate::new(owner.clone()).evaluate(identity).await
    }
}

/// Build a state over mock ports for extractor and handler unit tests.
#[cfg(test)]
pub fn test_state_with_tokens(tokens: crate::domain::ports::MockTokenCodec) -> HttpState {
    use crate::domain::ports::{
        MockCartRepository, MockClassRepository, MockInstructorRepository, MockPaymentGateway,
        MockPaymentRepository, MockUserRepository,
    };

    HttpState::new(HttpStatePorts {
        tokens: Arc::new(tokens),
        users: Arc::new(MockUserRepository::new()),
        classes: Arc::new(MockClassRepository::new()),
        instructors: Arc::new(MockInstructorRepository::new()),
        cart_items: Arc::new(MockCartRepository::new()),
        payments: Arc::new(MockPaymentRepository::new()),
        gateway: Arc::new(MockPaymentGateway::new()),
    })
}
