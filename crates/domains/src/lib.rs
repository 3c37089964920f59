//! # domains
//!
//! Core domain layer for Lectern: entity models, port traits, and the
//! error taxonomy. This crate performs no I/O; adapters implement the
//! ports and services orchestrate against them.

pub mod error;
pub mod models;
pub mod ports;

pub use error::{DomainError, DomainResult};
