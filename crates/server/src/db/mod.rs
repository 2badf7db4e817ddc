//! Database access for the jshop catalog.
//!
//! # Tables
//!
//! - `categories` - grouping labels, addressed by unique `code`
//! - `lots` - sellable items, addressed by unique `slug`
//! - `contact_channels` - seller contact methods, addressed by unique `code`
//! - `site_texts` / `site_metrics` - auxiliary content strings and counters,
//!   written by the seed procedure
//!
//! Migrations are embedded from `crates/server/migrations/` and run at
//! startup (and by the integration tests against in-memory databases).

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub mod categories;
pub mod contacts;
pub mod lots;

pub use categories::CategoryRepository;
pub use contacts::{ContactRepository, NewContact};
pub use lots::{LotFilter, LotRepository, NewLot};

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors returned by repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g. duplicate slug).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a SQLite connection pool with sensible defaults.
///
/// Foreign keys are enabled per connection; the database file is created
/// on first start when the URL points at a missing file.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be
/// established.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Map a sqlx error to [`RepositoryError::Conflict`] when it is a unique
/// constraint violation, passing everything else through as a database
/// error.
fn conflict_on_unique(err: sqlx::Error, message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(message.to_owned());
    }
    RepositoryError::Database(err)
}
