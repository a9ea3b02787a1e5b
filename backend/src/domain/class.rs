//! Class offering model and monetary price handling.
//!
//! `Price` owns the minor-unit conversion so floating-point values never
//! reach a monetary amount field directly; gateways only ever see integers.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::EmailAddress;

/// Validation errors raised when constructing a [`Price`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceValidationError {
    /// Input was NaN or infinite.
    NotFinite,
    /// Input was negative.
    Negative,
}

impl fmt::Display for PriceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFinite => write!(f, "price must be a finite number"),
            Self::Negative => write!(f, "price must not be negative"),
        }
    }
}

impl std::error::Error for PriceValidationError {}

/// Monetary price in major units (e.g. dollars).
///
/// ## Invariants
/// - Finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    /// Validate and construct a price from a raw float.
    pub fn new(value: f64) -> Result<Self, PriceValidationError> {
        if !value.is_finite() {
            return Err(PriceValidationError::NotFinite);
        }
        if value < 0.0 {
            return Err(PriceValidationError::Negative);
        }
        Ok(Self(value))
    }

    /// Convert to integer minor units (`round(price * 100)`).
    ///
    /// This is the integer-safety boundary: everything downstream of it deals
    /// in whole minor units only.
    pub fn minor_units(self) -> u64 {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "value is validated finite and non-negative"
        )]
        let units = (self.0 * 100.0).round() as u64;
        units
    }

    /// Raw major-unit value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Price {
    type Error = PriceValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

/// Stable class offering identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(Uuid);

impl ClassId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for ClassId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Moderation status of a class offering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClassStatus {
    /// Awaiting admin review.
    Pending,
    /// Visible and bookable.
    Approved,
    /// Rejected by an admin.
    Denied,
}

/// Mutable fields of a class offering supplied by its instructor.
///
/// Creation and full replace deliberately do not validate
/// `available_seats <= total_seats`; the seat bound is enforced only by the
/// atomic decrement at booking time.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassFields {
    pub name: String,
    pub instructor: String,
    pub instructor_email: EmailAddress,
    pub total_seats: u32,
    pub available_seats: u32,
    pub price: Price,
    pub image: String,
}

/// A scheduled class offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassOffering {
    pub id: ClassId,
    pub name: String,
    pub instructor: String,
    pub instructor_email: EmailAddress,
    pub total_seats: u32,
    pub available_seats: u32,
    pub price: Price,
    pub status: ClassStatus,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl ClassOffering {
    /// Construct a new offering pending moderation.
    pub fn create(fields: ClassFields) -> Self {
        Self {
            id: ClassId::random(),
            name: fields.name,
            instructor: fields.instructor,
            instructor_email: fields.instructor_email,
            total_seats: fields.total_seats,
            available_seats: fields.available_seats,
            price: fields.price,
            status: ClassStatus::Pending,
            image: fields.image,
            feedback: None,
        }
    }

    /// Replace the instructor-editable fields, keeping id, status, and
    /// feedback.
    pub fn replace_fields(&mut self, fields: ClassFields) {
        self.name = fields.name;
        self.instructor = fields.instructor;
        self.instructor_email = fields.instructor_email;
        self.total_seats = fields.total_seats;
        self.available_seats = fields.available_seats;
        self.price = fields.price;
        self.image = fields.image;
    }
}
