//! Moon Storage
//!
//! `SQLite` persistence for the Moon catalog: songs, users, playlists and the
//! playlist/song association.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each entity owns its own queries (`songs`, `users`, `playlists`)
//! - **Two-phase deletes**: link rows are removed before their parent, inside one
//!   transaction, so referential integrity never depends on `ON DELETE CASCADE`
//! - **Trait seam**: [`Database`] implements [`moon_core::Storage`] for the server
//!
//! # Example
//!
//! ```rust,no_run
//! use moon_core::Storage;
//! use moon_storage::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new("sqlite://moon.db").await?;
//! let songs = db.list_songs(0, 20).await?;
//! # Ok(())
//! # }
//! ```

mod database;

// Vertical slices
pub mod playlists;
pub mod songs;
pub mod users;

pub use database::Database;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// Foreign keys are enforced and a `REGEXP` function is registered on every
/// connection for title search. Missing parent directories of the database
/// file are created.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://moon.db>`)
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!("Creating SQLite pool for {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30))
        .with_regexp();

    // SQLite creates the file but not its directory
    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(sqlx::Error::Io)?;
        }
    }

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}
