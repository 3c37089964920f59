//! # Core Traits (Ports)
//!
//! Adapters implement these traits; services depend on nothing else.
//! With the `testing` feature enabled, mockall generates `MockXxx`
//! doubles for every port.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::DomainResult;
use crate::models::{Course, Batch, Lecture, LectureFilter, Role, User};

/// Data persistence contract for accounts.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn insert(&self, user: User) -> DomainResult<()>;
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>>;
    /// Email lookups are exact-match; callers normalize case first.
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    /// Role-gated lookup: resolves only when the id exists AND carries `role`.
    async fn find_by_id_and_role(&self, id: Uuid, role: Role) -> DomainResult<Option<User>>;
    async fn list_by_role(&self, role: Role) -> DomainResult<Vec<User>>;
    async fn update(&self, user: User) -> DomainResult<()>;
}

/// Data persistence contract for courses and their batches.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait CourseRepo: Send + Sync {
    async fn insert(&self, course: Course) -> DomainResult<()>;
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Course>>;
    async fn find_by_code(&self, code: &str) -> DomainResult<Option<Course>>;
    async fn list(&self) -> DomainResult<Vec<Course>>;
    /// Returns false when no course with that id existed.
    async fn delete(&self, id: Uuid) -> DomainResult<bool>;

    // Batch operations. Batches live inside their course aggregate.
    async fn insert_batch(&self, batch: Batch) -> DomainResult<()>;
    async fn list_batches(&self, course_id: Uuid) -> DomainResult<Vec<Batch>>;
    async fn find_batch(&self, course_id: Uuid, batch_id: Uuid) -> DomainResult<Option<Batch>>;
}

/// Data persistence contract for scheduled lectures.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait LectureRepo: Send + Sync {
    /// Persists a lecture. Implementations enforcing the one-per-day
    /// uniqueness constraint return `DomainError::Conflict` when a racing
    /// insert already took the (instructor, day) slot.
    async fn insert(&self, lecture: Lecture) -> DomainResult<()>;
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Lecture>>;
    /// Any lecture of `instructor_id` whose day bucket equals `day`,
    /// skipping `exclude` when given.
    async fn find_on_day(
        &self,
        instructor_id: Uuid,
        day: NaiveDate,
        exclude: Option<Uuid>,
    ) -> DomainResult<Option<Lecture>>;
    /// Lectures matching `filter`, ordered by `start_time` ascending.
    async fn list(&self, filter: &LectureFilter) -> DomainResult<Vec<Lecture>>;
}

/// Password hashing contract.
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> DomainResult<String>;
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Claims carried by a verified access token.
#[derive(Debug, Clone)]
pub struct AuthClaims {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    /// Expiry as unix seconds.
    pub expires_at: i64,
}

/// Access-token issuance and verification contract.
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait TokenAuthority: Send + Sync {
    fn issue(&self, user: &User) -> DomainResult<String>;
    fn verify(&self, token: &str) -> DomainResult<AuthClaims>;
}
