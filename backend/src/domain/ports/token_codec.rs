//! Port abstraction for the bearer credential collaborator.
//!
//! Token issuance mechanics are out of scope for the domain: it only relies
//! on `issue(claims) -> token` and `verify(token) -> claims`. Verification is
//! pure and never touches the user store.

use crate::domain::Identity;

/// Errors raised by token codec adapters.
///
/// Verification failures collapse into one variant on purpose: callers must
/// not be able to distinguish a malformed token from an expired one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenCodecError {
    /// The credential is missing, malformed, tampered with, or expired.
    #[error("credential rejected")]
    Rejected,
    /// Signing a new credential failed.
    #[error("credential issuance failed: {0}")]
    Issuance(String),
}

/// Port for signing and verifying bearer credentials.
#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync {
    /// Sign a credential asserting the given identity.
    fn issue(&self, identity: &Identity) -> Result<String, TokenCodecError>;

    /// Verify a raw token and extract the identity it asserts.
    fn verify(&self, token: &str) -> Result<Identity, TokenCodecError>;
}
