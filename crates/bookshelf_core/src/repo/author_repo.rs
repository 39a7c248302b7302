//! Author repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over `authors` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Author::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Listing order is `name ASC, id ASC` for deterministic output.

use crate::model::author::{Author, AuthorId};
use crate::repo::{ensure_schema_version, ensure_table_shape, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const AUTHOR_SELECT_SQL: &str = "SELECT id, name, email FROM authors";

/// Repository interface for author CRUD operations.
pub trait AuthorRepository {
    /// Returns all authors ordered by name, then id.
    fn list_authors(&self) -> RepoResult<Vec<Author>>;
    /// Gets one author by stable id.
    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    /// Inserts one author and returns its stable id.
    fn insert_author(&self, author: &Author) -> RepoResult<AuthorId>;
    /// Updates an existing author by stable id.
    fn update_author(&self, author: &Author) -> RepoResult<()>;
    /// Deletes one author by stable id. Association rows cascade.
    fn delete_author(&self, id: AuthorId) -> RepoResult<()>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version does not match.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the `authors`
    ///   shape is incomplete.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_version(conn)?;
        ensure_table_shape(conn, "authors", &["id", "name", "email"])?;
        Ok(Self { conn })
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn list_authors(&self) -> RepoResult<Vec<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} ORDER BY name ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut authors = Vec::new();
        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }
        Ok(authors)
    }

    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_author_row(row)?));
        }
        Ok(None)
    }

    fn insert_author(&self, author: &Author) -> RepoResult<AuthorId> {
        author.validate()?;

        self.conn.execute(
            "INSERT INTO authors (id, name, email) VALUES (?1, ?2, ?3);",
            params![
                author.id.to_string(),
                author.name.as_str(),
                author.email.as_str(),
            ],
        )?;

        Ok(author.id)
    }

    fn update_author(&self, author: &Author) -> RepoResult<()> {
        author.validate()?;

        let changed = self.conn.execute(
            "UPDATE authors
             SET
                name = ?1,
                email = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?3;",
            params![
                author.name.as_str(),
                author.email.as_str(),
                author.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(author.id));
        }

        Ok(())
    }

    fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM authors WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

pub(crate) fn parse_author_row(row: &Row<'_>) -> RepoResult<Author> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "authors.id")?;

    let author = Author {
        id,
        name: row.get("name")?,
        email: row.get("email")?,
    };
    // Rows that fail validation were corrupted outside the repository API.
    // Surface that as InvalidData so callers can tell storage damage apart
    // from their own bad input.
    author.validate().map_err(|err| {
        RepoError::InvalidData(format!("author row `{id_text}` failed validation: {err}"))
    })?;
    Ok(author)
}
