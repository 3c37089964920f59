//! SQLite implementation of `LectureRepo`.
//!
//! The `(instructor_id, start_day)` uniqueness index enforces the
//! one-lecture-per-day invariant even when two creation requests race
//! past the service-level check.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

use domains::models::{Lecture, LectureFilter};
use domains::ports::LectureRepo;
use domains::{DomainError, DomainResult};

use super::{blob_to_uuid, map_insert_err, uuid_to_blob};

const SAME_DAY_CONFLICT: &str =
    "Scheduling conflict - instructor already has a lecture on this date";

pub struct SqliteLectureRepo {
    pool: SqlitePool,
}

impl SqliteLectureRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_lecture(row: &SqliteRow) -> DomainResult<Lecture> {
    Ok(Lecture {
        id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice())?,
        course_id: blob_to_uuid(row.get::<Vec<u8>, _>("course_id").as_slice())?,
        instructor_id: blob_to_uuid(row.get::<Vec<u8>, _>("instructor_id").as_slice())?,
        title: row.get("title"),
        description: row.get("description"),
        start_time: row.get("start_time"),
        start_day: row.get("start_day"),
        created_by: blob_to_uuid(row.get::<Vec<u8>, _>("created_by").as_slice())?,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

#[async_trait]
impl LectureRepo for SqliteLectureRepo {
    async fn insert(&self, lecture: Lecture) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO lectures (id, course_id, instructor_id, title, description, \
             start_time, start_day, created_by, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(lecture.id))
        .bind(uuid_to_blob(lecture.course_id))
        .bind(uuid_to_blob(lecture.instructor_id))
        .bind(lecture.title)
        .bind(lecture.description)
        .bind(lecture.start_time)
        .bind(lecture.start_day)
        .bind(uuid_to_blob(lecture.created_by))
        .bind(lecture.created_at)
        .bind(lecture.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|err| map_insert_err(err, SAME_DAY_CONFLICT))?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Lecture>> {
        let row = sqlx::query("SELECT * FROM lectures WHERE id = ?")
            .bind(uuid_to_blob(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(DomainError::internal)?;
        row.as_ref().map(row_to_lecture).transpose()
    }

    async fn find_on_day(
        &self,
        instructor_id: Uuid,
        day: NaiveDate,
        exclude: Option<Uuid>,
    ) -> DomainResult<Option<Lecture>> {
        let row = match exclude {
            Some(excluded) => {
                sqlx::query(
                    "SELECT * FROM lectures \
                     WHERE instructor_id = ? AND start_day = ? AND id != ? LIMIT 1",
                )
                .bind(uuid_to_blob(instructor_id))
                .bind(day)
                .bind(uuid_to_blob(excluded))
                .fetch_optional(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    "SELECT * FROM lectures WHERE instructor_id = ? AND start_day = ? LIMIT 1",
                )
                .bind(uuid_to_blob(instructor_id))
                .bind(day)
                .fetch_optional(&self.pool)
                .await
            }
        }
        .map_err(DomainError::internal)?;
        row.as_ref().map(row_to_lecture).transpose()
    }

    async fn list(&self, filter: &LectureFilter) -> DomainResult<Vec<Lecture>> {
        let rows = match filter {
            LectureFilter::All => {
                sqlx::query("SELECT * FROM lectures ORDER BY start_time ASC")
                    .fetch_all(&self.pool)
                    .await
            }
            LectureFilter::ByInstructor(id) => {
                sqlx::query(
                    "SELECT * FROM lectures WHERE instructor_id = ? ORDER BY start_time ASC",
                )
                .bind(uuid_to_blob(*id))
                .fetch_all(&self.pool)
                .await
            }
            LectureFilter::ByCourse(id) => {
                sqlx::query("SELECT * FROM lectures WHERE course_id = ? ORDER BY start_time ASC")
                    .bind(uuid_to_blob(*id))
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(DomainError::internal)?;
        rows.iter().map(row_to_lecture).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::SqliteStore;
    use chrono::{DateTime, TimeZone, Utc};

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn lecture(instructor_id: Uuid, start_time: DateTime<Utc>) -> Lecture {
        let now = Utc::now();
        Lecture {
            id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            instructor_id,
            title: "Error Handling".into(),
            description: Some("thiserror and friends".into()),
            start_time,
            start_day: start_time.date_naive(),
            created_by: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn unique_index_rejects_a_second_same_day_insert() {
        let store = SqliteStore::connect_memory().await.unwrap();
        let repo = store.lectures();
        let instructor = Uuid::new_v4();

        repo.insert(lecture(instructor, utc(2025, 3, 10, 9, 0)))
            .await
            .unwrap();

        // Different clock time, same day bucket: the index refuses it.
        let err = repo
            .insert(lecture(instructor, utc(2025, 3, 10, 17, 0)))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::Conflict(SAME_DAY_CONFLICT.into()));

        // Next day is fine, and so is another instructor on the same day.
        repo.insert(lecture(instructor, utc(2025, 3, 11, 9, 0)))
            .await
            .unwrap();
        repo.insert(lecture(Uuid::new_v4(), utc(2025, 3, 10, 9, 0)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn find_on_day_respects_the_bucket() {
        let store = SqliteStore::connect_memory().await.unwrap();
        let repo = store.lectures();
        let instructor = Uuid::new_v4();

        repo.insert(lecture(instructor, utc(2025, 3, 10, 23, 59)))
            .await
            .unwrap();

        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert!(repo
            .find_on_day(instructor, day, None)
            .await
            .unwrap()
            .is_some());

        let next = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();
        assert!(repo
            .find_on_day(instructor, next, None)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn find_on_day_can_exclude_one_lecture() {
        let store = SqliteStore::connect_memory().await.unwrap();
        let repo = store.lectures();
        let instructor = Uuid::new_v4();

        let only = lecture(instructor, utc(2025, 3, 10, 9, 0));
        repo.insert(only.clone()).await.unwrap();

        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert!(repo
            .find_on_day(instructor, day, Some(only.id))
            .await
            .unwrap()
            .is_none());
        assert!(repo
            .find_on_day(instructor, day, Some(Uuid::new_v4()))
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn listings_come_back_in_start_time_order() {
        let store = SqliteStore::connect_memory().await.unwrap();
        let repo = store.lectures();
        let instructor = Uuid::new_v4();

        repo.insert(lecture(instructor, utc(2025, 3, 12, 9, 0)))
            .await
            .unwrap();
        repo.insert(lecture(instructor, utc(2025, 3, 10, 9, 0)))
            .await
            .unwrap();
        repo.insert(lecture(instructor, utc(2025, 3, 11, 9, 0)))
            .await
            .unwrap();

        let all = repo.list(&LectureFilter::All).await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].start_time <= w[1].start_time));

        let mine = repo
            .list(&LectureFilter::ByInstructor(instructor))
            .await
            .unwrap();
        assert_eq!(mine.len(), 3);

        let none = repo
            .list(&LectureFilter::ByInstructor(Uuid::new_v4()))
            .await
            .unwrap();
        assert!(none.is_empty());
    }
}
