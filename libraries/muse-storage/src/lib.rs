//! Muse Storage
//!
//! `SQLite` database layer for the Muse streaming server.
//!
//! This crate provides persistent storage for session users, their playlists
//! and the songs inside them.
//!
//! # Architecture
//!
//! - **Session Users**: one anonymous user row per browser session cookie
//! - **Vertical Slicing**: each entity owns its own queries and logic
//! - **Cascading Deletes**: removing a user or playlist removes dependents
//!
//! # Example
//!
//! ```rust,no_run
//! use muse_storage::{create_pool, run_migrations};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create database connection
//! let pool = create_pool("sqlite://muse.db").await?;
//! run_migrations(&pool).await?;
//!
//! // Resolve the user for a session token
//! let user = muse_storage::users::find_or_create(&pool, "some-session-token").await?;
//! let playlists = muse_storage::playlists::list_for_user(&pool, user.id).await?;
//! # Ok(())
//! # }
//! ```

mod error;

// Vertical slices
pub mod playlists;
pub mod songs;
pub mod users;

pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `sqlite://muse.db`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true) // Create database file if it doesn't exist
        .journal_mode(SqliteJournalMode::Wal) // Use WAL mode for better concurrency
        .foreign_keys(true) // Cascade deletes depend on this pragma
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}
