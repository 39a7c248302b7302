//! Book domain model.
//!
//! # Responsibility
//! - Define the canonical book record and its field-level invariants.
//!
//! # Invariants
//! - `id` is stable and never reused for another book.
//! - `title` is non-empty and at most 500 characters.
//! - `isbn`, when present, is 10..=17 characters (hyphenated forms allowed).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a book.
pub type BookId = Uuid;

pub const BOOK_TITLE_MAX_CHARS: usize = 500;
pub const ISBN_MIN_CHARS: usize = 10;
pub const ISBN_MAX_CHARS: usize = 17;

/// Validation failure for book fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    /// `title` is empty after trimming.
    EmptyTitle,
    /// `title` exceeds the maximum length, in characters.
    TitleTooLong { length: usize },
    /// `isbn` is present but outside the accepted length range.
    InvalidIsbnLength { length: usize },
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "book title must not be empty"),
            Self::TitleTooLong { length } => write!(
                f,
                "book title has {length} characters, maximum is {BOOK_TITLE_MAX_CHARS}"
            ),
            Self::InvalidIsbnLength { length } => write!(
                f,
                "ISBN has {length} characters, expected {ISBN_MIN_CHARS}..={ISBN_MAX_CHARS}"
            ),
        }
    }
}

impl Error for BookValidationError {}

/// Canonical book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Stable global ID used for linking and auditing.
    pub id: BookId,
    /// Title, 1..=500 characters.
    pub title: String,
    /// Optional ISBN-10/ISBN-13, unique across the catalog when set.
    pub isbn: Option<String>,
}

impl Book {
    /// Creates a new book with a generated stable ID.
    ///
    /// Does not validate; repositories validate on every write path.
    pub fn new(title: impl Into<String>, isbn: Option<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title, isbn)
    }

    /// Creates a book with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    ///
    /// # Invariants
    /// - The provided `id` must remain stable for this book's lifetime.
    pub fn with_id(id: BookId, title: impl Into<String>, isbn: Option<String>) -> Self {
        Self {
            id,
            title: title.into(),
            isbn,
        }
    }

    /// Checks field-level invariants.
    ///
    /// # Errors
    /// - `EmptyTitle` when `title` trims to nothing.
    /// - `TitleTooLong` when `title` exceeds 500 characters.
    /// - `InvalidIsbnLength` when a present `isbn` is outside 10..=17 characters.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.title.trim().is_empty() {
            return Err(BookValidationError::EmptyTitle);
        }
        let length = self.title.chars().count();
        if length > BOOK_TITLE_MAX_CHARS {
            return Err(BookValidationError::TitleTooLong { length });
        }
        if let Some(isbn) = &self.isbn {
            let length = isbn.chars().count();
            if !(ISBN_MIN_CHARS..=ISBN_MAX_CHARS).contains(&length) {
                return Err(BookValidationError::InvalidIsbnLength { length });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Book, BookValidationError};

    #[test]
    fn valid_book_passes_with_and_without_isbn() {
        assert!(Book::new("Clean Architecture", None).validate().is_ok());
        assert!(
            Book::new("Clean Architecture", Some("978-0-13-449416-6".to_string()))
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn whitespace_title_is_rejected() {
        let book = Book::new("  \t", None);
        assert_eq!(book.validate(), Err(BookValidationError::EmptyTitle));
    }

    #[test]
    fn overlong_title_is_rejected() {
        let book = Book::new("x".repeat(501), None);
        assert!(matches!(
            book.validate(),
            Err(BookValidationError::TitleTooLong { length: 501 })
        ));
    }

    #[test]
    fn isbn_length_bounds_are_enforced() {
        let short = Book::new("t", Some("123456789".to_string()));
        assert!(matches!(
            short.validate(),
            Err(BookValidationError::InvalidIsbnLength { length: 9 })
        ));

        let long = Book::new("t", Some("1".repeat(18)));
        assert!(matches!(
            long.validate(),
            Err(BookValidationError::InvalidIsbnLength { length: 18 })
        ));

        let min = Book::new("t", Some("0306406152".to_string()));
        assert!(min.validate().is_ok());
    }
}
