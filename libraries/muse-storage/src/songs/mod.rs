//! Song queries
//!
//! Songs only exist inside a playlist. Positions form a dense 0..n run per
//! playlist: inserts append at MAX+1, removals compact the remainder.

use crate::error::{Result, StorageError};
use chrono::{DateTime, Utc};
use muse_core::types::{NewSong, Song};
use sqlx::{Row, SqlitePool};

fn timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

fn song_from_row(row: &sqlx::sqlite::SqliteRow) -> Song {
    Song {
        id: row.get("id"),
        youtube_id: row.get("youtube_id"),
        title: row.get("title"),
        duration: row.get("duration"),
        thumbnail: row.get("thumbnail"),
        channel: row.get("channel"),
        position: row.get("position"),
        added_at: timestamp(row.get("added_at")),
    }
}

/// List a playlist's songs in position order.
pub async fn list_for_playlist(pool: &SqlitePool, playlist_id: i64) -> Result<Vec<Song>> {
    let rows = sqlx::query(
        "SELECT id, youtube_id, title, duration, thumbnail, channel, position, added_at
         FROM songs WHERE playlist_id = ? ORDER BY position",
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(song_from_row).collect())
}

/// Append a song to a playlist at position MAX+1.
///
/// A `(youtube_id, playlist_id)` pair already present surfaces as
/// `Duplicate` rather than a raw constraint error.
pub async fn add(pool: &SqlitePool, playlist_id: i64, song: &NewSong) -> Result<Song> {
    let mut tx = pool.begin().await?;

    // Next position, scoped to the playlist
    let next_position: i64 = sqlx::query(
        "SELECT COALESCE(MAX(position) + 1, 0) AS next_pos FROM songs WHERE playlist_id = ?",
    )
    .bind(playlist_id)
    .fetch_one(&mut *tx)
    .await?
    .get("next_pos");

    let result = sqlx::query(
        r#"
        INSERT INTO songs (youtube_id, title, duration, thumbnail, channel, playlist_id, position, added_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&song.youtube_id)
    .bind(&song.title)
    .bind(song.duration)
    .bind(&song.thumbnail)
    .bind(&song.channel)
    .bind(playlist_id)
    .bind(next_position)
    .bind(Utc::now().timestamp())
    .execute(&mut *tx)
    .await;

    let result = match result {
        Ok(result) => result,
        Err(err) if StorageError::is_unique_violation(&err) => {
            return Err(StorageError::Duplicate(format!(
                "Song {} is already in playlist {}",
                song.youtube_id, playlist_id
            )));
        }
        Err(err) => return Err(err.into()),
    };

    let id = result.last_insert_rowid();
    tx.commit().await?;

    get_by_id(pool, playlist_id, id)
        .await?
        .ok_or_else(|| StorageError::not_found("Song", id))
}

/// Get a single song within a playlist.
pub async fn get_by_id(pool: &SqlitePool, playlist_id: i64, song_id: i64) -> Result<Option<Song>> {
    let row = sqlx::query(
        "SELECT id, youtube_id, title, duration, thumbnail, channel, position, added_at
         FROM songs WHERE id = ? AND playlist_id = ?",
    )
    .bind(song_id)
    .bind(playlist_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| song_from_row(&row)))
}

/// Remove a song and compact the remaining positions back to 0..n-1.
pub async fn remove(pool: &SqlitePool, playlist_id: i64, song_id: i64) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM songs WHERE id = ? AND playlist_id = ?")
        .bind(song_id)
        .bind(playlist_id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Song", song_id));
    }

    // Reorder positions to fill the gap
    sqlx::query(
        r#"
        UPDATE songs
        SET position = (
            SELECT COUNT(*)
            FROM songs s2
            WHERE s2.playlist_id = songs.playlist_id
              AND s2.position < songs.position
        )
        WHERE playlist_id = ?
        "#,
    )
    .bind(playlist_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(())
}

/// Count all songs.
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM songs")
        .fetch_one(pool)
        .await?;
    Ok(row.get("n"))
}
