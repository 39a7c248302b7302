//! Author domain model.
//!
//! # Responsibility
//! - Define the canonical author record and its field-level invariants.
//!
//! # Invariants
//! - `id` is stable and never reused for another author.
//! - `name` is non-empty and at most 255 characters.
//! - `email` is a syntactically valid address.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for an author.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type AuthorId = Uuid;

pub const AUTHOR_NAME_MAX_CHARS: usize = 255;

// Syntax-only check: one `@`, non-empty local part, dotted domain without
// whitespace. Deliverability is out of scope.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Validation failure for author fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorValidationError {
    /// `name` is empty after trimming.
    EmptyName,
    /// `name` exceeds the maximum length, in characters.
    NameTooLong { length: usize },
    /// `email` does not look like an address.
    InvalidEmail { email: String },
}

impl Display for AuthorValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "author name must not be empty"),
            Self::NameTooLong { length } => write!(
                f,
                "author name has {length} characters, maximum is {AUTHOR_NAME_MAX_CHARS}"
            ),
            Self::InvalidEmail { email } => write!(f, "invalid author email: `{email}`"),
        }
    }
}

impl Error for AuthorValidationError {}

/// Canonical author record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Stable global ID used for linking and auditing.
    pub id: AuthorId,
    /// Display name, 1..=255 characters.
    pub name: String,
    /// Contact address, unique across the catalog.
    pub email: String,
}

impl Author {
    /// Creates a new author with a generated stable ID.
    ///
    /// Does not validate; repositories validate on every write path.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name, email)
    }

    /// Creates an author with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    ///
    /// # Invariants
    /// - The provided `id` must remain stable for this author's lifetime.
    pub fn with_id(id: AuthorId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Checks field-level invariants.
    ///
    /// # Errors
    /// - `EmptyName` when `name` trims to nothing.
    /// - `NameTooLong` when `name` exceeds 255 characters.
    /// - `InvalidEmail` when `email` fails the syntax check.
    pub fn validate(&self) -> Result<(), AuthorValidationError> {
        if self.name.trim().is_empty() {
            return Err(AuthorValidationError::EmptyName);
        }
        let length = self.name.chars().count();
        if length > AUTHOR_NAME_MAX_CHARS {
            return Err(AuthorValidationError::NameTooLong { length });
        }
        if !EMAIL_RE.is_match(&self.email) {
            return Err(AuthorValidationError::InvalidEmail {
                email: self.email.clone(),
            });
        }
        Ok(())
    }
}
