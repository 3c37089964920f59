//! # Batch Service
//!
//! Enrollment windows attached to a course. A batch is valid only when its
//! start date precedes its end date.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use domains::models::Batch;
use domains::ports::CourseRepo;
use domains::{DomainError, DomainResult};

pub struct BatchService {
    courses: Arc<dyn CourseRepo>,
}

impl BatchService {
    pub fn new(courses: Arc<dyn CourseRepo>) -> Self {
        Self { courses }
    }

    pub async fn add_batch(
        &self,
        course_id: Uuid,
        name: &str,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> DomainResult<Batch> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::Validation(
                "Name, start date, and end date are required".into(),
            ));
        }

        self.require_course(course_id).await?;

        if start_date >= end_date {
            return Err(DomainError::Validation(
                "End date must be after start date".into(),
            ));
        }

        let batch = Batch {
            id: Uuid::new_v4(),
            course_id,
            name,
            start_date,
            end_date,
            created_at: Utc::now(),
        };
        self.courses.insert_batch(batch.clone()).await?;
        Ok(batch)
    }

    pub async fn list_batches(&self, course_id: Uuid) -> DomainResult<Vec<Batch>> {
        self.require_course(course_id).await?;
        self.courses.list_batches(course_id).await
    }

    pub async fn get_batch(&self, course_id: Uuid, batch_id: Uuid) -> DomainResult<Batch> {
        self.require_course(course_id).await?;
        self.courses
            .find_batch(course_id, batch_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Batch not found".into()))
    }

    async fn require_course(&self, course_id: Uuid) -> DomainResult<()> {
        self.courses
            .find_by_id(course_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("Course not found".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use domains::models::{Course, CourseLevel};
    use domains::ports::MockCourseRepo;

    fn course(id: Uuid) -> Course {
        Course {
            id,
            name: "Networks".into(),
            code: "NET200".into(),
            description: "Sockets up".into(),
            level: CourseLevel::Easy,
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn add_batch_rejects_inverted_dates() {
        let mut repo = MockCourseRepo::new();
        repo.expect_find_by_id().return_once(|id| Ok(Some(course(id))));

        let svc = BatchService::new(Arc::new(repo));
        let err = svc
            .add_batch(
                Uuid::new_v4(),
                "Spring cohort",
                date(2025, 6, 1),
                date(2025, 5, 1),
            )
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::Validation("End date must be after start date".into())
        );
    }

    #[tokio::test]
    async fn add_batch_requires_the_course() {
        let mut repo = MockCourseRepo::new();
        repo.expect_find_by_id().return_once(|_| Ok(None));

        let svc = BatchService::new(Arc::new(repo));
        let err = svc
            .add_batch(
                Uuid::new_v4(),
                "Spring cohort",
                date(2025, 5, 1),
                date(2025, 6, 1),
            )
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound("Course not found".into()));
    }

    #[tokio::test]
    async fn add_batch_persists_a_valid_window() {
        let course_id = Uuid::new_v4();
        let mut repo = MockCourseRepo::new();
        repo.expect_find_by_id().return_once(|id| Ok(Some(course(id))));
        repo.expect_insert_batch()
            .withf(move |b| b.course_id == course_id && b.name == "Spring cohort")
            .return_once(|_| Ok(()));

        let svc = BatchService::new(Arc::new(repo));
        let batch = svc
            .add_batch(course_id, "Spring cohort", date(2025, 5, 1), date(2025, 6, 1))
            .await
            .unwrap();
        assert!(batch.start_date < batch.end_date);
    }
}
