//! SQLite implementation of `UserRepo`.

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

use domains::models::{Role, User};
use domains::ports::UserRepo;
use domains::{DomainError, DomainResult};

use super::{blob_to_uuid, map_insert_err, uuid_to_blob};

pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: &SqliteRow) -> DomainResult<User> {
    let role: String = row.get("role");
    Ok(User {
        id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice())?,
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        role: role
            .parse::<Role>()
            .map_err(DomainError::internal)?,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

#[async_trait]
impl UserRepo for SqliteUserRepo {
    async fn insert(&self, user: User) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, role, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(user.id))
        .bind(user.name)
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|err| map_insert_err(err, "User with this email already exists"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(uuid_to_blob(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(DomainError::internal)?;
        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(DomainError::internal)?;
        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_by_id_and_role(&self, id: Uuid, role: Role) -> DomainResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ? AND role = ?")
            .bind(uuid_to_blob(id))
            .bind(role.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(DomainError::internal)?;
        row.as_ref().map(row_to_user).transpose()
    }

    async fn list_by_role(&self, role: Role) -> DomainResult<Vec<User>> {
        let rows = sqlx::query("SELECT * FROM users WHERE role = ? ORDER BY created_at ASC")
            .bind(role.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(DomainError::internal)?;
        rows.iter().map(row_to_user).collect()
    }

    async fn update(&self, user: User) -> DomainResult<()> {
        sqlx::query(
            "UPDATE users SET name = ?, email = ?, password_hash = ?, role = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(user.name)
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.role.as_str())
        .bind(user.updated_at)
        .bind(uuid_to_blob(user.id))
        .execute(&self.pool)
        .await
        .map_err(|err| map_insert_err(err, "Email already in use"))?;
        Ok(())
    }
}
