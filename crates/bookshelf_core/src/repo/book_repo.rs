//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over `books` storage.
//! - Own author-link replacement logic (`set_book_authors`) with atomic
//!   semantics.
//!
//! # Invariants
//! - Write paths must call `Book::validate()` before SQL mutations.
//! - `set_book_authors` replaces the whole author set in a single
//!   transaction.
//! - Listing order is `title ASC, id ASC` for deterministic output.

use crate::model::author::{Author, AuthorId};
use crate::model::book::{Book, BookId};
use crate::repo::author_repo::parse_author_row;
use crate::repo::{ensure_schema_version, ensure_table_shape, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::collections::BTreeSet;

const BOOK_SELECT_SQL: &str = "SELECT id, title, isbn FROM books";

/// Repository interface for book CRUD and author-link operations.
pub trait BookRepository {
    /// Returns all books ordered by title, then id.
    fn list_books(&self) -> RepoResult<Vec<Book>>;
    /// Gets one book by stable id.
    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>>;
    /// Inserts one book and returns its stable id.
    fn insert_book(&self, book: &Book) -> RepoResult<BookId>;
    /// Updates an existing book by stable id.
    fn update_book(&self, book: &Book) -> RepoResult<()>;
    /// Deletes one book by stable id. Association rows cascade.
    fn delete_book(&self, id: BookId) -> RepoResult<()>;
    /// Replaces all author links for the given book in one transaction.
    fn set_book_authors(&mut self, book_id: BookId, author_ids: &[AuthorId]) -> RepoResult<()>;
    /// Returns the authors linked to one book, ordered by name, then id.
    fn authors_of_book(&self, book_id: BookId) -> RepoResult<Vec<Author>>;
    /// Returns the books linked to one author, ordered by title, then id.
    fn books_of_author(&self, author_id: AuthorId) -> RepoResult<Vec<Book>>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version does not match.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the `books` or
    ///   `author_books` shape is incomplete.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_schema_version(conn)?;
        ensure_table_shape(conn, "books", &["id", "title", "isbn"])?;
        ensure_table_shape(conn, "author_books", &["author_id", "book_id"])?;
        Ok(Self { conn })
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn list_books(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} ORDER BY title ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }
        Ok(books)
    }

    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }
        Ok(None)
    }

    fn insert_book(&self, book: &Book) -> RepoResult<BookId> {
        book.validate()?;

        self.conn.execute(
            "INSERT INTO books (id, title, isbn) VALUES (?1, ?2, ?3);",
            params![book.id.to_string(), book.title.as_str(), book.isbn.as_deref()],
        )?;

        Ok(book.id)
    }

    fn update_book(&self, book: &Book) -> RepoResult<()> {
        book.validate()?;

        let changed = self.conn.execute(
            "UPDATE books
             SET
                title = ?1,
                isbn = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?3;",
            params![book.title.as_str(), book.isbn.as_deref(), book.id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(book.id));
        }

        Ok(())
    }

    fn delete_book(&self, id: BookId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM books WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn set_book_authors(&mut self, book_id: BookId, author_ids: &[AuthorId]) -> RepoResult<()> {
        let book_id_text = book_id.to_string();
        // Dedup up front so a repeated id cannot trip the pair constraint.
        let unique_ids: BTreeSet<AuthorId> = author_ids.iter().copied().collect();

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if !book_exists_in_tx(&tx, book_id_text.as_str())? {
            return Err(RepoError::NotFound(book_id));
        }

        tx.execute(
            "DELETE FROM author_books WHERE book_id = ?1;",
            [book_id_text.as_str()],
        )?;

        for author_id in &unique_ids {
            let linked = tx.execute(
                "INSERT INTO author_books (author_id, book_id)
                 SELECT id, ?2
                 FROM authors
                 WHERE id = ?1;",
                params![author_id.to_string(), book_id_text.as_str()],
            )?;
            if linked == 0 {
                return Err(RepoError::InvalidData(format!(
                    "cannot link unknown author `{author_id}` to book `{book_id}`"
                )));
            }
        }

        tx.execute(
            "UPDATE books
             SET updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            [book_id_text.as_str()],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn authors_of_book(&self, book_id: BookId) -> RepoResult<Vec<Author>> {
        let mut stmt = self.conn.prepare(
            "SELECT a.id AS id, a.name AS name, a.email AS email
             FROM author_books ab
             INNER JOIN authors a ON a.id = ab.author_id
             WHERE ab.book_id = ?1
             ORDER BY a.name ASC, a.id ASC;",
        )?;
        let mut rows = stmt.query([book_id.to_string()])?;
        let mut authors = Vec::new();
        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }
        Ok(authors)
    }

    fn books_of_author(&self, author_id: AuthorId) -> RepoResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(
            "SELECT b.id AS id, b.title AS title, b.isbn AS isbn
             FROM author_books ab
             INNER JOIN books b ON b.id = ab.book_id
             WHERE ab.author_id = ?1
             ORDER BY b.title ASC, b.id ASC;",
        )?;
        let mut rows = stmt.query([author_id.to_string()])?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }
        Ok(books)
    }
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "books.id")?;

    let book = Book {
        id,
        title: row.get("title")?,
        isbn: row.get("isbn")?,
    };
    // Rows that fail validation were corrupted outside the repository API.
    // Surface that as InvalidData so callers can tell storage damage apart
    // from their own bad input.
    book.validate().map_err(|err| {
        RepoError::InvalidData(format!("book row `{id_text}` failed validation: {err}"))
    })?;
    Ok(book)
}

fn book_exists_in_tx(tx: &Transaction<'_>, book_id: &str) -> RepoResult<bool> {
    let exists: i64 = tx.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM books
            WHERE id = ?1
        );",
        [book_id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
