//! Playlist queries
//!
//! All lookups are scoped to the owning user; another session's playlist
//! behaves exactly like a missing one.

use crate::error::{Result, StorageError};
use chrono::{DateTime, Utc};
use muse_core::types::{Playlist, PlaylistSummary};
use sqlx::{Row, SqlitePool};

fn timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

fn playlist_from_row(row: &sqlx::sqlite::SqliteRow) -> Playlist {
    Playlist {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        created_at: timestamp(row.get("created_at")),
        songs: None,
    }
}

/// List a user's playlists with their song counts, newest first.
pub async fn list_for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<PlaylistSummary>> {
    let rows = sqlx::query(
        r#"
        SELECT p.id, p.name, p.created_at, COUNT(s.id) AS song_count
        FROM playlists p
        LEFT JOIN songs s ON s.playlist_id = p.id
        WHERE p.user_id = ?
        GROUP BY p.id
        ORDER BY p.created_at DESC, p.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| PlaylistSummary {
            id: row.get("id"),
            name: row.get("name"),
            song_count: row.get("song_count"),
            created_at: timestamp(row.get("created_at")),
        })
        .collect())
}

/// Get a playlist by ID, scoped to its owner.
pub async fn get_by_id(pool: &SqlitePool, id: i64, user_id: i64) -> Result<Option<Playlist>> {
    let row = sqlx::query(
        "SELECT id, user_id, name, created_at FROM playlists WHERE id = ? AND user_id = ?",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| playlist_from_row(&row)))
}

/// Get a playlist with its songs in position order.
pub async fn get_with_songs(pool: &SqlitePool, id: i64, user_id: i64) -> Result<Option<Playlist>> {
    let Some(mut playlist) = get_by_id(pool, id, user_id).await? else {
        return Ok(None);
    };

    let songs = crate::songs::list_for_playlist(pool, id).await?;
    playlist.songs = Some(songs);

    Ok(Some(playlist))
}

/// Create a new playlist for a user.
pub async fn create(pool: &SqlitePool, user_id: i64, name: &str) -> Result<Playlist> {
    let result = sqlx::query("INSERT INTO playlists (name, user_id, created_at) VALUES (?, ?, ?)")
        .bind(name)
        .bind(user_id)
        .bind(Utc::now().timestamp())
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();

    get_by_id(pool, id, user_id)
        .await?
        .ok_or_else(|| StorageError::not_found("Playlist", id))
}

/// Rename a playlist. Fails with `NotFound` when the playlist does not
/// exist or belongs to another user.
pub async fn rename(pool: &SqlitePool, id: i64, user_id: i64, name: &str) -> Result<Playlist> {
    let result = sqlx::query("UPDATE playlists SET name = ? WHERE id = ? AND user_id = ?")
        .bind(name)
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Playlist", id));
    }

    get_by_id(pool, id, user_id)
        .await?
        .ok_or_else(|| StorageError::not_found("Playlist", id))
}

/// Delete a playlist and, through cascades, its songs.
pub async fn delete(pool: &SqlitePool, id: i64, user_id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM playlists WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Playlist", id));
    }

    Ok(())
}

/// Count all playlists.
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM playlists")
        .fetch_one(pool)
        .await?;
    Ok(row.get("n"))
}
