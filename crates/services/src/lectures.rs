//! # Lecture Lifecycle Service
//!
//! Orchestrates lecture creation (reference validation, conflict check,
//! persist) and the filtered listings. Lectures have no further lifecycle:
//! once created they are only ever read.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use uuid::Uuid;

use domains::models::{
    Course, CourseSummary, InstructorSummary, Lecture, LectureDetails, LectureFilter, Role, User,
};
use domains::ports::{CourseRepo, LectureRepo, UserRepo};
use domains::{DomainError, DomainResult};

use crate::conflict::{lecture_day, ConflictChecker};

/// Input for scheduling a lecture. Ids and the start time are already
/// typed; the HTTP layer rejects requests where they are absent.
#[derive(Debug, Clone)]
pub struct CreateLecture {
    pub course_id: Uuid,
    pub instructor_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Listing selections exposed to the API.
#[derive(Debug, Clone)]
pub enum ListFilter {
    All,
    ByInstructor(Uuid),
    ByCourse(Uuid),
    /// The caller's own lectures (instructor panel).
    Mine(Uuid),
}

pub struct LectureService {
    lectures: Arc<dyn LectureRepo>,
    courses: Arc<dyn CourseRepo>,
    users: Arc<dyn UserRepo>,
    checker: ConflictChecker,
}

impl LectureService {
    pub fn new(
        lectures: Arc<dyn LectureRepo>,
        courses: Arc<dyn CourseRepo>,
        users: Arc<dyn UserRepo>,
        offset: FixedOffset,
    ) -> Self {
        let checker = ConflictChecker::new(lectures.clone(), offset);
        Self {
            lectures,
            courses,
            users,
            checker,
        }
    }

    pub fn conflict_checker(&self) -> &ConflictChecker {
        &self.checker
    }

    /// Schedules a lecture on behalf of `actor_id` (the acting admin).
    pub async fn create(&self, actor_id: Uuid, input: CreateLecture) -> DomainResult<LectureDetails> {
        // 1. Field validation
        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::Validation("Required fields missing".into()));
        }

        // 2. Course must exist
        let course = self
            .courses
            .find_by_id(input.course_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Course not found".into()))?;

        // 3. Instructor must exist AND carry the instructor role
        let instructor = self
            .users
            .find_by_id_and_role(input.instructor_id, Role::Instructor)
            .await?
            .ok_or_else(|| DomainError::NotFound("Instructor not found".into()))?;

        // 4. Same-day conflict check
        if self
            .checker
            .has_conflict(input.instructor_id, input.start_time, None)
            .await?
        {
            return Err(DomainError::Conflict(
                "Scheduling conflict - instructor already has a lecture on this date".into(),
            ));
        }

        // 5. Persist. The store's uniqueness index turns a racing insert
        //    into the same Conflict instead of a silent double-booking.
        let now = Utc::now();
        let lecture = Lecture {
            id: Uuid::new_v4(),
            course_id: course.id,
            instructor_id: instructor.id,
            title,
            description: input
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            start_time: input.start_time,
            start_day: lecture_day(input.start_time, self.checker.offset()),
            created_by: actor_id,
            created_at: now,
            updated_at: now,
        };
        self.lectures.insert(lecture.clone()).await?;

        tracing::info!(
            lecture_id = %lecture.id,
            instructor_id = %lecture.instructor_id,
            start_day = %lecture.start_day,
            "lecture scheduled"
        );

        Ok(LectureDetails {
            lecture,
            course: Some(CourseSummary::from(&course)),
            instructor: Some(InstructorSummary::from(&instructor)),
        })
    }

    /// Lectures matching `filter`, ordered by start time ascending and
    /// enriched with course and instructor summaries.
    ///
    /// Empty results are an error only for the by-course listing; the
    /// other filters return empty lists.
    pub async fn list(&self, filter: ListFilter) -> DomainResult<Vec<LectureDetails>> {
        let (repo_filter, error_on_empty) = match filter {
            ListFilter::All => (LectureFilter::All, false),
            ListFilter::ByInstructor(id) => (LectureFilter::ByInstructor(id), false),
            ListFilter::Mine(id) => (LectureFilter::ByInstructor(id), false),
            ListFilter::ByCourse(id) => (LectureFilter::ByCourse(id), true),
        };

        let lectures = self.lectures.list(&repo_filter).await?;
        if lectures.is_empty() && error_on_empty {
            return Err(DomainError::NotFound(
                "No lectures found for this course".into(),
            ));
        }

        self.enrich(lectures).await
    }

    /// Joins each lecture with its course and instructor summaries.
    /// Dangling references resolve to `None` rather than failing the list.
    async fn enrich(&self, lectures: Vec<Lecture>) -> DomainResult<Vec<LectureDetails>> {
        let mut course_cache: HashMap<Uuid, Option<Course>> = HashMap::new();
        let mut user_cache: HashMap<Uuid, Option<User>> = HashMap::new();

        let mut details = Vec::with_capacity(lectures.len());
        for lecture in lectures {
            if !course_cache.contains_key(&lecture.course_id) {
                let course = self.courses.find_by_id(lecture.course_id).await?;
                course_cache.insert(lecture.course_id, course);
            }
            if !user_cache.contains_key(&lecture.instructor_id) {
                let user = self.users.find_by_id(lecture.instructor_id).await?;
                user_cache.insert(lecture.instructor_id, user);
            }

            let course = course_cache[&lecture.course_id]
                .as_ref()
                .map(CourseSummary::from);
            let instructor = user_cache[&lecture.instructor_id]
                .as_ref()
                .map(InstructorSummary::from);
            details.push(LectureDetails {
                lecture,
                course,
                instructor,
            });
        }
        Ok(details)
    }
}
