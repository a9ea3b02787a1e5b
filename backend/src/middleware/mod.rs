//! Request-pipeline middleware.

pub mod trace;

pub use trace::Trace;
