//! Session-user queries
//!
//! Users are anonymous: a row exists per browser session token and is
//! created lazily the first time that token shows up.

use crate::error::{Result, StorageError};
use chrono::{DateTime, Utc};
use muse_core::types::User;
use sqlx::{Row, SqlitePool};

fn timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

/// Look up a user by its opaque session token.
pub async fn find_by_session(pool: &SqlitePool, session_id: &str) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, session_id, created_at FROM users WHERE session_id = ?")
        .bind(session_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| User {
        id: row.get("id"),
        session_id: row.get("session_id"),
        created_at: timestamp(row.get("created_at")),
    }))
}

/// Resolve the user for a session token, creating the row when it does
/// not exist yet.
///
/// Safe against concurrent first requests from the same browser: the
/// insert ignores a losing race and the follow-up select wins either way.
pub async fn find_or_create(pool: &SqlitePool, session_id: &str) -> Result<User> {
    sqlx::query(
        "INSERT INTO users (session_id, created_at) VALUES (?, ?)
         ON CONFLICT(session_id) DO NOTHING",
    )
    .bind(session_id)
    .bind(Utc::now().timestamp())
    .execute(pool)
    .await?;

    find_by_session(pool, session_id)
        .await?
        .ok_or_else(|| StorageError::not_found("User", session_id))
}

/// Delete a user and, through cascades, all of their playlists and songs.
pub async fn delete(pool: &SqlitePool, user_id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("User", user_id));
    }

    Ok(())
}

/// Count all users.
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM users")
        .fetch_one(pool)
        .await?;
    Ok(row.get("n"))
}

/// Remove session users older than `days` that never created a playlist.
///
/// Every anonymous visitor leaves a row behind, so a deployment collects
/// abandoned sessions over time. Returns the number of rows removed.
pub async fn prune_stale(pool: &SqlitePool, days: u32) -> Result<u64> {
    let cutoff = Utc::now().timestamp() - i64::from(days) * 86_400;

    let result = sqlx::query(
        "DELETE FROM users
         WHERE created_at < ?
           AND id NOT IN (SELECT DISTINCT user_id FROM playlists)",
    )
    .bind(cutoff)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
