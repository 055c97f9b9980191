//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using REAL SQLite files (NOT in-memory)
//! to match production behavior and properly test migrations, constraints, and
//! cascading deletes.

use muse_core::types::NewSong;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = muse_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        muse_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Test fixture: Create a test user for a session token
pub async fn create_test_user(pool: &SqlitePool, session_id: &str) -> i64 {
    muse_storage::users::find_or_create(pool, session_id)
        .await
        .expect("Failed to create test user")
        .id
}

/// Test fixture: Create a test playlist
pub async fn create_test_playlist(pool: &SqlitePool, user_id: i64, name: &str) -> i64 {
    muse_storage::playlists::create(pool, user_id, name)
        .await
        .expect("Failed to create test playlist")
        .id
}

/// Test fixture: A song payload with a given video ID
pub fn song_fixture(youtube_id: &str, title: &str) -> NewSong {
    NewSong {
        youtube_id: youtube_id.to_string(),
        title: title.to_string(),
        duration: Some(240),
        thumbnail: Some(format!("https://i.ytimg.com/vi/{youtube_id}/hqdefault.jpg")),
        channel: Some("Test Channel".to_string()),
    }
}
