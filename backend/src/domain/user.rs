//! User data model: identifiers, e-mail addresses, and roles.
//!
//! The e-mail address is the value-level foreign key correlating cart items
//! and payments to an identity, so it is normalised (trimmed, lowercased)
//! once at the boundary and treated as opaque afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors raised when constructing an [`EmailAddress`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailValidationError {
    /// Input was empty once trimmed.
    Empty,
    /// Input lacked a plausible `local@domain` shape.
    Malformed,
}

impl fmt::Display for EmailValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "email must not be empty"),
            Self::Malformed => write!(f, "email must look like local@domain"),
        }
    }
}

impl std::error::Error for EmailValidationError {}

/// Normalised e-mail address.
///
/// ## Invariants
/// - Trimmed, lowercased, non-empty.
/// - Contains exactly one `@` with non-empty local part and domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise and validate a raw e-mail string.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, EmailValidationError> {
        let normalized = raw.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        let mut parts = normalized.split('@');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self(normalized))
            }
            _ => Err(EmailValidationError::Malformed),
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Marketplace role stored on the user record.
///
/// The bearer credential never carries a role; gates re-read it from the
/// user store on every request so role changes apply without reissuance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Default role granted at registration.
    Student,
    /// May create and edit class offerings.
    Instructor,
    /// May moderate classes and manage user roles.
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Student => write!(f, "student"),
            Self::Instructor => write!(f, "instructor"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Stable user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered marketplace user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub role: Role,
}

impl User {
    /// Construct a freshly registered user with a random identifier.
    pub fn register(email: EmailAddress, role: Role) -> Self {
        Self {
            id: UserId::random(),
            email,
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", EmailValidationError::Empty)]
    #[case("   ", EmailValidationError::Empty)]
    #[case("not-an-email", EmailValidationError::Malformed)]
    #[case("@x.com", EmailValidationError::Malformed)]
    #[case("a@", EmailValidationError::Malformed)]
    #[case("a@b@c", EmailValidationError::Malformed)]
    fn invalid_emails_are_rejected(#[case] raw: &str, #[case] expected: EmailValidationError) {
        let err = EmailAddress::parse(raw).expect_err("invalid input must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  A@X.Com  ", "a@x.com")]
    #[case("student@example.org", "student@example.org")]
    fn valid_emails_are_normalised(#[case] raw: &str, #[case] expected: &str) {
        let email = EmailAddress::parse(raw).expect("valid input should succeed");
        assert_eq!(email.as_ref(), expected);
    }

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_string(&Role::Instructor).expect("serializable");
        assert_eq!(json, "\"instructor\"");
    }

    #[test]
    fn registration_assigns_a_fresh_id() {
        let email = EmailAddress::parse("a@x.com").expect("valid email");
        let first = User::register(email.clone(), Role::Student);
        let second = User::register(email, Role::Student);
        assert_ne!(first.id, second.id);
    }
}
