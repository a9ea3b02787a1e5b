//! Storage adapters for the repository ports.

mod memory;

pub use memory::{
    InMemoryCartRepository, InMemoryClassRepository, InMemoryInstructorRepository,
    InMemoryPaymentRepository, InMemoryUserRepository,
};
