//! Author use-case service.
//!
//! # Responsibility
//! - Provide stable author CRUD entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::author::{Author, AuthorId};
use crate::repo::author_repo::AuthorRepository;
use crate::repo::RepoResult;

/// Use-case service wrapper for author CRUD operations.
pub struct AuthorService<R: AuthorRepository> {
    repo: R,
}

impl<R: AuthorRepository> AuthorService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an author with a freshly generated id.
    ///
    /// # Contract
    /// - Returns the persisted author including its new stable id.
    pub fn create_author(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> RepoResult<Author> {
        let author = Author::new(name, email);
        self.repo.insert_author(&author)?;
        Ok(author)
    }

    /// Inserts an author whose id was assigned externally.
    ///
    /// Used by import paths; the id must not collide with existing rows.
    pub fn register_author(&self, author: &Author) -> RepoResult<AuthorId> {
        self.repo.insert_author(author)
    }

    /// Updates an existing author by stable id.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn update_author(&self, author: &Author) -> RepoResult<()> {
        self.repo.update_author(author)
    }

    /// Gets one author by id.
    pub fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        self.repo.get_author(id)
    }

    /// Lists all authors ordered by name.
    pub fn list_authors(&self) -> RepoResult<Vec<Author>> {
        self.repo.list_authors()
    }

    /// Deletes an author by id. Book links are removed with the row.
    pub fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        self.repo.delete_author(id)
    }
}
