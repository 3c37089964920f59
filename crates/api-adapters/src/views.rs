//! Wire-format views. Domain entities stay snake_case internally; the
//! client speaks camelCase, so each response type renames here.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use domains::models::{
    Batch, Course, CourseLevel, CourseSummary, InstructorSummary, LectureDetails, Role, User,
};

/// An account without its password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseView {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub description: String,
    pub level: CourseLevel,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Course> for CourseView {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            name: course.name.clone(),
            code: course.code.clone(),
            description: course.description.clone(),
            level: course.level,
            created_by: course.created_by,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchView {
    pub id: Uuid,
    pub course_id: Uuid,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl From<&Batch> for BatchView {
    fn from(batch: &Batch) -> Self {
        Self {
            id: batch.id,
            course_id: batch.course_id,
            name: batch.name.clone(),
            start_date: batch.start_date,
            end_date: batch.end_date,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummaryView {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorSummaryView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// A lecture enriched with summaries of the course and instructor it
/// references; either summary is null when the referenced entity is gone.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureView {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub course: Option<CourseSummaryView>,
    pub instructor: Option<InstructorSummaryView>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&LectureDetails> for LectureView {
    fn from(details: &LectureDetails) -> Self {
        Self {
            id: details.lecture.id,
            title: details.lecture.title.clone(),
            description: details.lecture.description.clone(),
            start_time: details.lecture.start_time,
            course: details.course.as_ref().map(CourseSummaryView::from),
            instructor: details.instructor.as_ref().map(InstructorSummaryView::from),
            created_by: details.lecture.created_by,
            created_at: details.lecture.created_at,
            updated_at: details.lecture.updated_at,
        }
    }
}

impl From<&CourseSummary> for CourseSummaryView {
    fn from(summary: &CourseSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name.clone(),
            code: summary.code.clone(),
            description: summary.description.clone(),
        }
    }
}

impl From<&InstructorSummary> for InstructorSummaryView {
    fn from(summary: &InstructorSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name.clone(),
            email: summary.email.clone(),
        }
    }
}
