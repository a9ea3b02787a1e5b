//! Port traits separating the domain from its adapters.
//!
//! In hexagonal terms these are the seams: repositories over the document
//! store, plus the two external collaborators (token codec, payment gateway)
//! whose internals are out of scope. Adapters live under `outbound`; tests
//! substitute `mockall` doubles.

mod cart_repository;
mod class_repository;
mod instructor_repository;
mod payment_gateway;
mod payment_repository;
mod token_codec;
mod user_repository;

pub use cart_repository::{CartInsertOutcome, CartRepository};
pub use class_repository::{ClassRepository, SeatReservation};
pub use instructor_repository::InstructorRepository;
pub use payment_gateway::{PaymentGateway, PaymentGatewayError, PaymentIntent};
pub use payment_repository::PaymentRepository;
pub use token_codec::{TokenCodec, TokenCodecError};
pub use user_repository::{RegistrationOutcome, UserRepository};

#[cfg(test)]
pub use cart_repository::MockCartRepository;
#[cfg(test)]
pub use class_repository::MockClassRepository;
#[cfg(test)]
pub use instructor_repository::MockInstructorRepository;
#[cfg(test)]
pub use payment_gateway::MockPaymentGateway;
#[cfg(test)]
pub use payment_repository::MockPaymentRepository;
#[cfg(test)]
pub use token_codec::MockTokenCodec;
#[cfg(test)]
pub use user_repository::MockUserRepository;

/// Error raised by document-store repository adapters.
///
/// Store-layer failures are not locally recovered; they propagate to the
/// inbound adapter as a generic server error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// Query or mutation failed inside the store.
    #[error("store operation failed: {0}")]
    Store(String),
}
