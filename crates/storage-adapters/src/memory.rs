//! # In-memory store
//!
//! DashMap-backed implementation of every persistence port. Used by the
//! HTTP-level tests and handy for local development; behavior mirrors
//! the SQLite store, including the one-lecture-per-day guarantee, which
//! is enforced atomically through the day-index entry.

use chrono::NaiveDate;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use async_trait::async_trait;

use domains::models::{Batch, Course, Lecture, LectureFilter, Role, User};
use domains::ports::{CourseRepo, LectureRepo, UserRepo};
use domains::{DomainError, DomainResult};

#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<Uuid, User>,
    courses: DashMap<Uuid, Course>,
    batches: DashMap<Uuid, Batch>,
    lectures: DashMap<Uuid, Lecture>,
    /// (instructor, day) -> lecture id. The uniqueness authority.
    lecture_days: DashMap<(Uuid, NaiveDate), Uuid>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn insert(&self, user: User) -> DomainResult<()> {
        if self.users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::Conflict(
                "User with this email already exists".into(),
            ));
        }
        self.users.insert(user.id, user);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.value().clone()))
    }

    async fn find_by_id_and_role(&self, id: Uuid, role: Role) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .get(&id)
            .filter(|u| u.role == role)
            .map(|u| u.value().clone()))
    }

    async fn list_by_role(&self, role: Role) -> DomainResult<Vec<User>> {
        let mut users: Vec<User> = self
            .users
            .iter()
            .filter(|u| u.role == role)
            .map(|u| u.value().clone())
            .collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn update(&self, user: User) -> DomainResult<()> {
        self.users.insert(user.id, user);
        Ok(())
    }
}

#[async_trait]
impl CourseRepo for MemoryStore {
    async fn insert(&self, course: Course) -> DomainResult<()> {
        if self.courses.iter().any(|c| c.code == course.code) {
            return Err(DomainError::Conflict(
                "Course with this code already exists".into(),
            ));
        }
        self.courses.insert(course.id, course);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Course>> {
        Ok(self.courses.get(&id).map(|c| c.value().clone()))
    }

    async fn find_by_code(&self, code: &str) -> DomainResult<Option<Course>> {
        Ok(self
            .courses
            .iter()
            .find(|c| c.code == code)
            .map(|c| c.value().clone()))
    }

    async fn list(&self) -> DomainResult<Vec<Course>> {
        let mut courses: Vec<Course> = self.courses.iter().map(|c| c.value().clone()).collect();
        courses.sort_by_key(|c| c.created_at);
        Ok(courses)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let removed = self.courses.remove(&id).is_some();
        if removed {
            self.batches.retain(|_, b| b.course_id != id);
        }
        Ok(removed)
    }

    async fn insert_batch(&self, batch: Batch) -> DomainResult<()> {
        self.batches.insert(batch.id, batch);
        Ok(())
    }

    async fn list_batches(&self, course_id: Uuid) -> DomainResult<Vec<Batch>> {
        let mut batches: Vec<Batch> = self
            .batches
            .iter()
            .filter(|b| b.course_id == course_id)
            .map(|b| b.value().clone())
            .collect();
        batches.sort_by_key(|b| b.start_date);
        Ok(batches)
    }

    async fn find_batch(&self, course_id: Uuid, batch_id: Uuid) -> DomainResult<Option<Batch>> {
        Ok(self
            .batches
            .get(&batch_id)
            .filter(|b| b.course_id == course_id)
            .map(|b| b.value().clone()))
    }
}

#[async_trait]
impl LectureRepo for MemoryStore {
    async fn insert(&self, lecture: Lecture) -> DomainResult<()> {
        match self
            .lecture_days
            .entry((lecture.instructor_id, lecture.start_day))
        {
            Entry::Occupied(_) => Err(DomainError::Conflict(
                "Scheduling conflict - instructor already has a lecture on this date".into(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(lecture.id);
                self.lectures.insert(lecture.id, lecture);
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Lecture>> {
        Ok(self.lectures.get(&id).map(|l| l.value().clone()))
    }

    async fn find_on_day(
        &self,
        instructor_id: Uuid,
        day: NaiveDate,
        exclude: Option<Uuid>,
    ) -> DomainResult<Option<Lecture>> {
        let Some(id) = self.lecture_days.get(&(instructor_id, day)).map(|e| *e.value()) else {
            return Ok(None);
        };
        if exclude == Some(id) {
            return Ok(None);
        }
        Ok(self.lectures.get(&id).map(|l| l.value().clone()))
    }

    async fn list(&self, filter: &LectureFilter) -> DomainResult<Vec<Lecture>> {
        let mut lectures: Vec<Lecture> = self
            .lectures
            .iter()
            .filter(|l| match filter {
                LectureFilter::All => true,
                LectureFilter::ByInstructor(id) => l.instructor_id == *id,
                LectureFilter::ByCourse(id) => l.course_id == *id,
            })
            .map(|l| l.value().clone())
            .collect();
        lectures.sort_by_key(|l| l.start_time);
        Ok(lectures)
    }
}
