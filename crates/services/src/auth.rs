//! # Auth & Account Service
//!
//! Registration, login, and instructor management. Tokens and password
//! hashing go through ports so the service stays testable without real
//! crypto or a real store.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use domains::models::{Role, User};
use domains::ports::{PasswordHasher, TokenAuthority, UserRepo};
use domains::{DomainError, DomainResult};

const MIN_PASSWORD_LEN: usize = 8;

/// Input for account registration.
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Defaults to `Role::Instructor` when absent.
    pub role: Option<Role>,
}

pub struct AuthService {
    users: Arc<dyn UserRepo>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenAuthority>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepo>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenAuthority>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Creates an account. Emails are lowercased before the uniqueness check.
    pub async fn register(&self, input: RegisterUser) -> DomainResult<User> {
        let name = input.name.trim().to_string();
        let email = input.email.trim().to_lowercase();
        if name.is_empty() || email.is_empty() || input.password.is_empty() {
            return Err(DomainError::Validation("All fields are required".into()));
        }
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::Validation(
                "Password must be at least 8 characters".into(),
            ));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict(
                "User with this email already exists".into(),
            ));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash: self.hasher.hash(&input.password)?,
            role: input.role.unwrap_or(Role::Instructor),
            created_at: now,
            updated_at: now,
        };
        self.users.insert(user.clone()).await?;

        tracing::info!(user_id = %user.id, role = user.role.as_str(), "user registered");
        Ok(user)
    }

    /// Verifies credentials and issues an access token.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<(User, String)> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::Validation(
                "Email and password are required".into(),
            ));
        }

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found".into()))?;

        if !self.hasher.verify(password, &user.password_hash) {
            return Err(DomainError::Unauthorized("Invalid user credentials".into()));
        }

        let token = self.tokens.issue(&user)?;
        tracing::debug!(user_id = %user.id, "user logged in");
        Ok((user, token))
    }

    pub async fn current_user(&self, id: Uuid) -> DomainResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found".into()))
    }

    pub async fn list_instructors(&self) -> DomainResult<Vec<User>> {
        self.users.list_by_role(Role::Instructor).await
    }

    /// Admin-driven instructor creation; the role is forced.
    pub async fn create_instructor(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<User> {
        self.register(RegisterUser {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: Some(Role::Instructor),
        })
        .await
    }

    /// Renames an instructor and/or changes their email.
    pub async fn update_instructor(
        &self,
        id: Uuid,
        name: Option<String>,
        email: Option<String>,
    ) -> DomainResult<User> {
        let name = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        let email = email
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty());
        if name.is_none() && email.is_none() {
            return Err(DomainError::Validation(
                "At least one field is required for update".into(),
            ));
        }

        let mut instructor = self
            .users
            .find_by_id_and_role(id, Role::Instructor)
            .await?
            .ok_or_else(|| DomainError::NotFound("Instructor not found".into()))?;

        if let Some(email) = email {
            if email != instructor.email {
                if self.users.find_by_email(&email).await?.is_some() {
                    return Err(DomainError::Conflict("Email already in use".into()));
                }
                instructor.email = email;
            }
        }
        if let Some(name) = name {
            instructor.name = name;
        }
        instructor.updated_at = Utc::now();

        self.users.update(instructor.clone()).await?;
        Ok(instructor)
    }
}
