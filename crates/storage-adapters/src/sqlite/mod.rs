//! # SQLite store
//!
//! Maps the relational SQLite model to the domain entities. Uuids are
//! stored as 16-byte BLOBs, timestamps as RFC 3339 TEXT (which sorts
//! chronologically), and the lecture day bucket as an ISO date TEXT
//! column carrying the uniqueness index.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use uuid::Uuid;

use domains::{DomainError, DomainResult};

mod courses;
mod lectures;
mod users;

pub use courses::SqliteCourseRepo;
pub use lectures::SqliteLectureRepo;
pub use users::SqliteUserRepo;

const SCHEMA: &str = include_str!("schema.sql");

/// Owns the connection pool and hands out per-entity repositories.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if missing) the database at `url` and applies the
    /// schema.
    pub async fn connect(url: &str) -> DomainResult<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(DomainError::internal)?
            .create_if_missing(true)
            .foreign_keys(false);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(DomainError::internal)?;
        let store = Self { pool };
        store.apply_schema().await?;
        tracing::debug!(%url, "sqlite store ready");
        Ok(store)
    }

    /// An isolated in-memory database, for tests.
    ///
    /// Pinned to a single connection: every pooled connection would
    /// otherwise open its own empty `:memory:` database.
    pub async fn connect_memory() -> DomainResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(DomainError::internal)?
            .foreign_keys(false);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(DomainError::internal)?;
        let store = Self { pool };
        store.apply_schema().await?;
        Ok(store)
    }

    async fn apply_schema(&self) -> DomainResult<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(DomainError::internal)?;
        Ok(())
    }

    pub fn users(&self) -> SqliteUserRepo {
        SqliteUserRepo::new(self.pool.clone())
    }

    pub fn courses(&self) -> SqliteCourseRepo {
        SqliteCourseRepo::new(self.pool.clone())
    }

    pub fn lectures(&self) -> SqliteLectureRepo {
        SqliteLectureRepo::new(self.pool.clone())
    }
}

// Helpers for UUID conversion
pub(crate) fn uuid_to_blob(id: Uuid) -> Vec<u8> {
    id.as_bytes().to_vec()
}

pub(crate) fn blob_to_uuid(blob: &[u8]) -> DomainResult<Uuid> {
    Uuid::from_slice(blob)
        .map_err(|err| DomainError::internal(format!("malformed uuid column: {err}")))
}

/// Maps an insert failure, translating a uniqueness violation into the
/// caller-supplied conflict message.
pub(crate) fn map_insert_err(err: sqlx::Error, conflict_msg: &str) -> DomainError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return DomainError::Conflict(conflict_msg.to_string());
        }
    }
    DomainError::internal(err)
}
