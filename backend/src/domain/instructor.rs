//! Instructor profile model.
//!
//! Profiles are marketing material for the public catalogue, maintained
//! out-of-band; they are distinct from the instructor's user record and
//! carry no authorization weight.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::EmailAddress;

/// Stable instructor profile identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstructorId(Uuid);

impl InstructorId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for InstructorId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for InstructorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A public instructor profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorProfile {
    pub id: InstructorId,
    pub name: String,
    pub email: EmailAddress,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl InstructorProfile {
    /// Construct a new profile with a random identifier.
    pub fn new(name: String, email: EmailAddress, image: String, bio: Option<String>) -> Self {
        Self {
            id: InstructorId::random(),
            name,
            email,
            image,
            bio,
        }
    }
}
