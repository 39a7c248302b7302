//! Core domain logic for the Bookshelf library catalog.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::author::{Author, AuthorId, AuthorValidationError};
pub use model::book::{Book, BookId, BookValidationError};
pub use repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
pub use repo::book_repo::{BookRepository, SqliteBookRepository};
pub use repo::{RepoError, RepoResult};
pub use service::author_service::AuthorService;
pub use service::book_service::BookService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
