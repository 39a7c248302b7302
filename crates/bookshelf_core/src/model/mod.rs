//! Domain model for the library catalog.
//!
//! # Responsibility
//! - Define the validated entity types used by core business logic.
//! - Keep field-level validation rules next to the data they guard.
//!
//! # Invariants
//! - Every entity is identified by a stable UUID.
//! - Write paths must call `validate()` before any persistence mutation.

pub mod author;
pub mod book;
