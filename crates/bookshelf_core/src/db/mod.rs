//! SQLite-backed storage for the catalog.
//!
//! Everything that touches the database funnels through here: opening
//! connections, applying schema migrations, and the transport-level error
//! type shared by both. A connection is handed out only after its schema has
//! been brought fully up to date, so repositories can rely on the shape
//! described by the migration scripts.
//!
//! Schema versioning rides on SQLite's `PRAGMA user_version`; there is no
//! separate bookkeeping table.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{db_path_from_env, open_db, open_db_in_memory, DB_PATH_ENV};

pub type DbResult<T> = Result<T, DbError>;

/// Transport-level storage failure.
#[derive(Debug)]
pub enum DbError {
    /// Error bubbled up unchanged from the SQLite driver.
    Sqlite(rusqlite::Error),
    /// The file was last written by a newer build of the catalog.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "catalog database is at schema version {db_version}, but this build only \
                 understands versions up to {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
