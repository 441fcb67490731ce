//! SQLite bootstrap for the sheet backend.
//!
//! # Responsibility
//! - Open and configure SQLite connections used by `SqliteSheetStore`.
//! - Apply sheet schema migrations in deterministic order.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - No sheet row is read or written before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure to bring a sheet database into a usable state.
///
/// Row-level failures after bootstrap surface as `StoreError` from
/// `SqliteSheetStore`; this type covers opening the file and its schema.
#[derive(Debug)]
pub enum DbError {
    /// The directory meant to hold the sheet file could not be created.
    CreateDir { path: PathBuf, source: io::Error },
    /// SQLite refused to open the file, set the busy timeout, or run a migration.
    Sqlite(rusqlite::Error),
    /// The file was written by a newer client whose sheet layout is unknown here.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateDir { path, source } => write!(
                f,
                "failed to create sheet directory `{}`: {source}",
                path.display()
            ),
            Self::Sqlite(err) => write!(f, "sheet database error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "sheet schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
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
