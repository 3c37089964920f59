//! Route handlers, one module per resource.

pub mod auth;
pub mod batches;
pub mod courses;
pub mod health;
pub mod lectures;
