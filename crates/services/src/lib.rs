//! # services
//!
//! Orchestration layer: each service validates input, resolves references
//! through the domain ports, applies the scheduling rule where relevant,
//! and persists. Services hold `Arc<dyn Port>` handles and carry no
//! storage- or transport-specific code.

pub mod auth;
pub mod batches;
pub mod conflict;
pub mod courses;
pub mod lectures;

pub use auth::{AuthService, RegisterUser};
pub use batches::BatchService;
pub use conflict::ConflictChecker;
pub use courses::{CourseService, CreateCourse};
pub use lectures::{CreateLecture, LectureService, ListFilter};
