//! SQLite implementation of `CourseRepo`, including the batch table.

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

use domains::models::{Batch, Course, CourseLevel};
use domains::ports::CourseRepo;
use domains::{DomainError, DomainResult};

use super::{blob_to_uuid, map_insert_err, uuid_to_blob};

pub struct SqliteCourseRepo {
    pool: SqlitePool,
}

impl SqliteCourseRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_course(row: &SqliteRow) -> DomainResult<Course> {
    let level: String = row.get("level");
    Ok(Course {
        id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice())?,
        name: row.get("name"),
        code: row.get("code"),
        description: row.get("description"),
        level: level.parse::<CourseLevel>().map_err(DomainError::internal)?,
        created_by: blob_to_uuid(row.get::<Vec<u8>, _>("created_by").as_slice())?,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

fn row_to_batch(row: &SqliteRow) -> DomainResult<Batch> {
    Ok(Batch {
        id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice())?,
        course_id: blob_to_uuid(row.get::<Vec<u8>, _>("course_id").as_slice())?,
        name: row.get("name"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        created_at: row.get("created_at"),
    })
}

#[async_trait]
impl CourseRepo for SqliteCourseRepo {
    async fn insert(&self, course: Course) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO courses (id, name, code, description, level, created_by, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(course.id))
        .bind(course.name)
        .bind(course.code)
        .bind(course.description)
        .bind(course.level.as_str())
        .bind(uuid_to_blob(course.created_by))
        .bind(course.created_at)
        .bind(course.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|err| map_insert_err(err, "Course with this code already exists"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Course>> {
        let row = sqlx::query("SELECT * FROM courses WHERE id = ?")
            .bind(uuid_to_blob(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(DomainError::internal)?;
        row.as_ref().map(row_to_course).transpose()
    }

    async fn find_by_code(&self, code: &str) -> DomainResult<Option<Course>> {
        let row = sqlx::query("SELECT * FROM courses WHERE code = ?")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(DomainError::internal)?;
        row.as_ref().map(row_to_course).transpose()
    }

    async fn list(&self) -> DomainResult<Vec<Course>> {
        let rows = sqlx::query("SELECT * FROM courses ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(DomainError::internal)?;
        rows.iter().map(row_to_course).collect()
    }

    /// Removes the course and its batches in one transaction so a failed
    /// delete never leaves orphaned batches behind.
    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let mut tx = self.pool.begin().await.map_err(DomainError::internal)?;

        sqlx::query("DELETE FROM batches WHERE course_id = ?")
            .bind(uuid_to_blob(id))
            .execute(&mut *tx)
            .await
            .map_err(DomainError::internal)?;

        let result = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(uuid_to_blob(id))
            .execute(&mut *tx)
            .await
            .map_err(DomainError::internal)?;

        tx.commit().await.map_err(DomainError::internal)?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_batch(&self, batch: Batch) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO batches (id, course_id, name, start_date, end_date, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(batch.id))
        .bind(uuid_to_blob(batch.course_id))
        .bind(batch.name)
        .bind(batch.start_date)
        .bind(batch.end_date)
        .bind(batch.created_at)
        .execute(&self.pool)
        .await
        .map_err(DomainError::internal)?;
        Ok(())
    }

    async fn list_batches(&self, course_id: Uuid) -> DomainResult<Vec<Batch>> {
        let rows = sqlx::query("SELECT * FROM batches WHERE course_id = ? ORDER BY start_date ASC")
            .bind(uuid_to_blob(course_id))
            .fetch_all(&self.pool)
            .await
            .map_err(DomainError::internal)?;
        rows.iter().map(row_to_batch).collect()
    }

    async fn find_batch(&self, course_id: Uuid, batch_id: Uuid) -> DomainResult<Option<Batch>> {
        let row = sqlx::query("SELECT * FROM batches WHERE course_id = ? AND id = ?")
            .bind(uuid_to_blob(course_id))
            .bind(uuid_to_blob(batch_id))
            .fetch_optional(&self.pool)
            .await
            .map_err(DomainError::internal)?;
        row.as_ref().map(row_to_batch).transpose()
    }
}
