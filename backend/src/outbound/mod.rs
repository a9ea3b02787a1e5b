//! Outbound adapters implementing the domain ports.

pub mod gateway;
pub mod persistence;
pub mod token;
