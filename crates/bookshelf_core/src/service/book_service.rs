//! Book use-case service.
//!
//! # Responsibility
//! - Provide book-specific CRUD entry points for core callers.
//! - Atomically replace the author set of a book and read the result back.
//!
//! # Invariants
//! - Author-link replacement uses full-set semantics, never partial patching.
//! - Linked author listings are always sorted by `name ASC, id ASC`.

use crate::model::author::{Author, AuthorId};
use crate::model::book::{Book, BookId};
use crate::repo::book_repo::BookRepository;
use crate::repo::RepoResult;

/// Use-case service wrapper for book CRUD and author-link operations.
pub struct BookService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> BookService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a book with a freshly generated id.
    ///
    /// # Contract
    /// - Returns the persisted book including its new stable id.
    pub fn create_book(&self, title: impl Into<String>, isbn: Option<String>) -> RepoResult<Book> {
        let book = Book::new(title, isbn);
        self.repo.insert_book(&book)?;
        Ok(book)
    }

    /// Inserts a book whose id was assigned externally.
    ///
    /// Used by import paths; the id must not collide with existing rows.
    pub fn register_book(&self, book: &Book) -> RepoResult<BookId> {
        self.repo.insert_book(book)
    }

    /// Updates an existing book by stable id.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn update_book(&self, book: &Book) -> RepoResult<()> {
        self.repo.update_book(book)
    }

    /// Gets one book by id.
    pub fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        self.repo.get_book(id)
    }

    /// Lists all books ordered by title.
    pub fn list_books(&self) -> RepoResult<Vec<Book>> {
        self.repo.list_books()
    }

    /// Deletes a book by id. Author links are removed with the row.
    pub fn delete_book(&self, id: BookId) -> RepoResult<()> {
        self.repo.delete_book(id)
    }

    /// Atomically replaces the full author set for one book.
    ///
    /// Returns the linked authors as persisted, in listing order.
    pub fn set_book_authors(
        &mut self,
        book_id: BookId,
        author_ids: &[AuthorId],
    ) -> RepoResult<Vec<Author>> {
        self.repo.set_book_authors(book_id, author_ids)?;
        self.repo.authors_of_book(book_id)
    }

    /// Lists the authors linked to one book.
    pub fn authors_of_book(&self, book_id: BookId) -> RepoResult<Vec<Author>> {
        self.repo.authors_of_book(book_id)
    }

    /// Lists the books linked to one author.
    pub fn books_of_author(&self, author_id: AuthorId) -> RepoResult<Vec<Book>> {
        self.repo.books_of_author(author_id)
    }
}
