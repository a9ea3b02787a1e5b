//! In-process document store backing the repository ports.
//!
//! Each collection is a `parking_lot::RwLock` over a map keyed by record id.
//! Conditional writes (seat reservation, deduplicated inserts) take the write
//! lock for the whole check-and-mutate, which gives them the same atomicity a
//! document store's conditional update would.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::ports::{
    CartInsertOutcome, CartRepository, ClassRepository, InstructorRepository, PaymentRepository,
    RegistrationOutcome, RepositoryError, SeatReservation, UserRepository,
};
use crate::domain::{
    CartItem, CartItemId, ClassFields, ClassId, ClassOffering, ClassStatus, EmailAddress,
    InstructorId, InstructorProfile, PaymentRecord, Role, User, UserId,
};

/// User collection held in memory, keyed by user id with the e-mail as a
/// secondary uniqueness constraint.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read();
        Ok(users.values().find(|user| &user.email == email).cloned())
    }

    async fn create_if_absent(
        &self,
        user: User,
    ) -> Result<RegistrationOutcome, RepositoryError> {
        let mut users = self.users.write();
        if let Some(existing) = users.values().find(|u| u.email == user.email) {
            return Ok(RegistrationOutcome::AlreadyRegistered(existing.clone()));
        }
        users.insert(user.id, user.clone());
        Ok(RegistrationOutcome::Created(user))
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.users.read().values().cloned().collect())
    }

    async fn set_role(
        &self,
        id: &UserId,
        role: Role,
    ) -> Result<Option<User>, RepositoryError> {
        let mut users = self.users.write();
        Ok(users.get_mut(id).map(|user| {
            user.role = role;
            user.clone()
        }))
    }
}

/// Class collection held in memory.
#[derive(Debug, Default)]
pub struct InMemoryClassRepository {
    classes: RwLock<HashMap<ClassId, ClassOffering>>,
}

impl InMemoryClassRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClassRepository for InMemoryClassRepository {
    async fn insert(
        &self,
        offering: ClassOffering,
    ) -> Result<ClassOffering, RepositoryError> {
        self.classes.write().insert(offering.id, offering.clone());
        Ok(offering)
    }

    async fn list(&self) -> Result<Vec<ClassOffering>, RepositoryError> {
        Ok(self.classes.read().values().cloned().collect())
    }

    async fn find(&self, id: &ClassId) -> Result<Option<ClassOffering>, RepositoryError> {
        Ok(self.classes.read().get(id).cloned())
    }

    async fn list_by_instructor(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<ClassOffering>, RepositoryError> {
        let classes = self.classes.read();
        Ok(classes
            .values()
            .filter(|offering| &offering.instructor_email == email)
            .cloned()
            .collect())
    }

    async fn replace_fields(
        &self,
        id: &ClassId,
        fields: ClassFields,
    ) -> Result<Option<ClassOffering>, RepositoryError> {
        let mut classes = self.classes.write();
        Ok(classes.get_mut(id).map(|offering| {
            offering.replace_fields(fields);
            offering.clone()
        }))
    }

    async fn moderate(
        &self,
        id: &ClassId,
        status: ClassStatus,
        feedback: Option<String>,
    ) -> Result<Option<ClassOffering>, RepositoryError> {
        let mut classes = self.classes.write();
        Ok(classes.get_mut(id).map(|offering| {
            offering.status = status;
            if let Some(feedback) = feedback {
                offering.feedback = Some(feedback);
            }
            offering.clone()
        }))
    }

    async fn delete(&self, id: &ClassId) -> Result<bool, RepositoryError> {
        Ok(self.classes.write().remove(id).is_some())
    }

    async fn reserve_seat(&self, id: &ClassId) -> Result<SeatReservation, RepositoryError> {
        // Check and decrement under one write lock so the counter cannot be
        // raced below zero.
        let mut classes = self.classes.write();
        let Some(offering) = classes.get_mut(id) else {
            return Ok(SeatReservation::NotFound);
        };
        if offering.available_seats == 0 {
            return Ok(SeatReservation::Exhausted);
        }
        offering.available_seats -= 1;
        Ok(SeatReservation::Reserved {
            remaining: offering.available_seats,
        })
    }
}

/// Cart collection held in memory, deduplicated on `(class_id, email)`.
#[derive(Debug, Default)]
pub struct InMemoryCartRepository {
    items: RwLock<HashMap<CartItemId, CartItem>>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn insert_if_absent(
        &self,
        item: CartItem,
    ) -> Result<CartInsertOutcome, RepositoryError> {
        let mut items = self.items.write();
        let duplicate = items
            .values()
            .find(|existing| existing.class_id == item.class_id && existing.email == item.email);
        if let Some(existing) = duplicate {
            return Ok(CartInsertOutcome::AlreadyPresent(existing.clone()));
        }
        items.insert(item.id, item.clone());
        Ok(CartInsertOutcome::Added(item))
    }

    async fn list_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<CartItem>, RepositoryError> {
        let items = self.items.read();
        Ok(items
            .values()
            .filter(|item| &item.email == email)
            .cloned()
            .collect())
    }

    async fn find(&self, id: &CartItemId) -> Result<Option<CartItem>, RepositoryError> {
        Ok(self.items.read().get(id).cloned())
    }

    async fn delete(&self, id: &CartItemId) -> Result<bool, RepositoryError> {
        Ok(self.items.write().remove(id).is_some())
    }
}

/// Instructor profile collection held in memory.
#[derive(Debug, Default)]
pub struct InMemoryInstructorRepository {
    profiles: RwLock<HashMap<InstructorId, InstructorProfile>>,
}

impl InMemoryInstructorRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InstructorRepository for InMemoryInstructorRepository {
    async fn insert(
        &self,
        profile: InstructorProfile,
    ) -> Result<InstructorProfile, RepositoryError> {
        self.profiles.write().insert(profile.id, profile.clone());
        Ok(profile)
    }

    async fn list(&self) -> Result<Vec<InstructorProfile>, RepositoryError> {
        Ok(self.profiles.read().values().cloned().collect())
    }

    async fn find(
        &self,
        id: &InstructorId,
    ) -> Result<Option<InstructorProfile>, RepositoryError> {
        Ok(self.profiles.read().get(id).cloned())
    }
}

/// Append-only payment log held in memory.
#[derive(Debug, Default)]
pub struct InMemoryPaymentRepository {
    records: RwLock<Vec<PaymentRecord>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn append(&self, record: PaymentRecord) -> Result<PaymentRecord, RepositoryError> {
        self.records.write().push(record.clone());
        Ok(record)
    }

    async fn list_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<PaymentRecord>, RepositoryError> {
        let records = self.records.read();
        Ok(records
            .iter()
            .filter(|record| &record.email == email)
            .cloned()
            .collect())
    }
}
