//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod cart;
pub mod classes;
pub mod error;
pub mod health;
pub mod instructors;
pub mod payments;
pub mod state;
pub mod tokens;
pub mod users;

pub use error::{ApiError, ApiResult};
