//! # Domain Models
//!
//! These structs represent the core entities of Lectern.
//! Timestamps are stored in UTC; the scheduling day bucket is computed
//! once, at creation, against the configured schedule offset.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role. Admins schedule lectures; instructors deliver them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Instructor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Instructor => "instructor",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "instructor" => Ok(Role::Instructor),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// An account: an administrator or an instructor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Stored lowercased and trimmed; unique across accounts.
    pub email: String,
    /// Argon2 PHC string. Never serialized onto the wire by the API layer.
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Course difficulty, as advertised to students.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl CourseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseLevel::Easy => "easy",
            CourseLevel::Medium => "medium",
            CourseLevel::Hard => "hard",
        }
    }
}

impl std::str::FromStr for CourseLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(CourseLevel::Easy),
            "medium" => Ok(CourseLevel::Medium),
            "hard" => Ok(CourseLevel::Hard),
            other => Err(format!("unknown course level: {other}")),
        }
    }
}

/// A course that lectures are scheduled against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub name: String,
    /// Short unique code (e.g. "CS101").
    pub code: String,
    pub description: String,
    pub level: CourseLevel,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An enrollment window within a course.
/// Invariant: `start_date < end_date`, checked at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub id: Uuid,
    pub course_id: Uuid,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// A single scheduled teaching session. Lectures carry a start time but
/// no end time; the scheduling granularity is the calendar day.
/// Created once, never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lecture {
    pub id: Uuid,
    pub course_id: Uuid,
    pub instructor_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    /// Day bucket: `start_time` projected into the schedule offset.
    /// At most one lecture may exist per (instructor_id, start_day).
    pub start_day: NaiveDate,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Course fields a lecture response is enriched with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSummary {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub description: String,
}

impl From<&Course> for CourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            name: course.name.clone(),
            code: course.code.clone(),
            description: course.description.clone(),
        }
    }
}

/// Instructor fields a lecture response is enriched with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructorSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<&User> for InstructorSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// A lecture joined with summaries of the entities it references.
/// Summaries are optional: a dangling reference (e.g. a deleted course)
/// yields `None`, not an error.
#[derive(Debug, Clone, Serialize)]
pub struct LectureDetails {
    pub lecture: Lecture,
    pub course: Option<CourseSummary>,
    pub instructor: Option<InstructorSummary>,
}

/// Selection applied when listing lectures from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LectureFilter {
    All,
    ByInstructor(Uuid),
    ByCourse(Uuid),
}
