//! # Course Service
//!
//! Course CRUD with code uniqueness. Courses own their batches; batch
//! operations live in [`crate::batches`].

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use domains::models::{Course, CourseLevel};
use domains::ports::CourseRepo;
use domains::{DomainError, DomainResult};

/// Input for course creation.
#[derive(Debug, Clone)]
pub struct CreateCourse {
    pub name: String,
    pub code: String,
    pub description: String,
    pub level: CourseLevel,
}

pub struct CourseService {
    courses: Arc<dyn CourseRepo>,
}

impl CourseService {
    pub fn new(courses: Arc<dyn CourseRepo>) -> Self {
        Self { courses }
    }

    pub async fn create(&self, actor_id: Uuid, input: CreateCourse) -> DomainResult<Course> {
        let name = input.name.trim().to_string();
        let code = input.code.trim().to_string();
        let description = input.description.trim().to_string();
        if name.is_empty() || code.is_empty() || description.is_empty() {
            return Err(DomainError::Validation("All fields are required".into()));
        }

        if self.courses.find_by_code(&code).await?.is_some() {
            return Err(DomainError::Conflict(
                "Course with this code already exists".into(),
            ));
        }

        let now = Utc::now();
        let course = Course {
            id: Uuid::new_v4(),
            name,
            code,
            description,
            level: input.level,
            created_by: actor_id,
            created_at: now,
            updated_at: now,
        };
        self.courses.insert(course.clone()).await?;

        tracing::info!(course_id = %course.id, code = %course.code, "course created");
        Ok(course)
    }

    pub async fn list(&self) -> DomainResult<Vec<Course>> {
        self.courses.list().await
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Course> {
        self.courses
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Course not found".into()))
    }

    /// Removes a course and its batches. Scheduled lectures keep their
    /// course reference; listings render the course summary as null.
    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        if !self.courses.delete(id).await? {
            return Err(DomainError::NotFound("Course not found".into()));
        }
        tracing::info!(course_id = %id, "course deleted");
        Ok(())
    }
}
