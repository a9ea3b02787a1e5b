//! Transport-agnostic domain layer: models, gates, services, and ports.

mod booking_service;
mod cart;
mod cart_service;
mod class;
mod error;
mod gates;
mod instructor;
mod payment;
pub mod ports;
mod user;
mod user_service;

pub use booking_service::{BookingService, ConfirmPayment};
pub use cart::{CartItem, CartItemId};
pub use cart_service::CartService;
pub use class::{
    ClassFields, ClassId, ClassOffering, ClassStatus, Price, PriceValidationError,
};
pub use error::{DomainError, ErrorCode};
pub use gates::{evaluate_all, Gate, Identity, OwnershipGate, RoleGate};
pub use instructor::{InstructorId, InstructorProfile};
pub use payment::{PaymentId, PaymentRecord};
pub use user::{EmailAddress, EmailValidationError, Role, User, UserId};
pub use user_service::UserService;
