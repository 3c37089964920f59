//! # auth-adapters
//!
//! Credential handling for Lectern: Argon2 password hashing and
//! HS256 JWT access tokens, implementing the `PasswordHasher` and
//! `TokenAuthority` ports.

pub mod jwt;
pub mod password;

pub use jwt::JwtAuthority;
pub use password::Argon2Hasher;
