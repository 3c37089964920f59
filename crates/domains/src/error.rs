//! # DomainError
//!
//! Centralized error handling for the Lectern domain.
//! Every failure carries the user-facing message; the API layer maps
//! variants to HTTP status codes and never invents its own wording.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Missing or malformed input (e.g. empty title, short password)
    #[error("{0}")]
    Validation(String),

    /// Referenced entity absent (e.g. course, instructor, batch)
    #[error("{0}")]
    NotFound(String),

    /// Scheduling or uniqueness violation (e.g. same-day lecture, duplicate email)
    #[error("{0}")]
    Conflict(String),

    /// Missing or invalid credentials
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but lacking the required role
    #[error("{0}")]
    Forbidden(String),

    /// Infrastructure failure (e.g. store down, token signing failed)
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Wraps an infrastructure failure, preserving its message for the logs.
    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A specialized Result type for domain logic.
pub type DomainResult<T> = std::result::Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_pass_through_unchanged() {
        let err = DomainError::NotFound("Course not found".into());
        assert_eq!(err.to_string(), "Course not found");

        let err = DomainError::Conflict("Course with this code already exists".into());
        assert_eq!(err.to_string(), "Course with this code already exists");
    }

    #[test]
    fn internal_prefixes_the_cause() {
        let err = DomainError::internal("connection refused");
        assert_eq!(err.to_string(), "internal error: connection refused");
    }
}
