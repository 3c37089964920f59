//! # storage-adapters
//!
//! Implementations of the domain persistence ports: a durable SQLite
//! store (sqlx) and a DashMap-backed in-memory store for tests and
//! local development.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
