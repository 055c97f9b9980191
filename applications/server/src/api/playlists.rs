/// Playlist management endpoints
///
/// Every operation here is scoped to the session user resolved by the
/// middleware; one user can never observe or mutate another's playlists.
use crate::{error::Result, error::ServerError, middleware::SessionUser, state::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use muse_core::{NewSong, Playlist, PlaylistSummary, Song};
use serde::Deserialize;
use serde_json::{json, Value};

const MAX_PLAYLIST_NAME_LEN: usize = 200;

#[derive(Debug, Deserialize)]
pub struct PlaylistBody {
    pub name: String,
}

fn validated_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ServerError::BadRequest(
            "Playlist name must not be empty".to_string(),
        ));
    }
    if name.len() > MAX_PLAYLIST_NAME_LEN {
        return Err(ServerError::BadRequest(format!(
            "Playlist name must be at most {MAX_PLAYLIST_NAME_LEN} characters"
        )));
    }
    Ok(name)
}

/// GET /api/playlists
pub async fn list_playlists(
    State(state): State<AppState>,
    user: SessionUser,
) -> Result<Json<Vec<PlaylistSummary>>> {
    let playlists = muse_storage::playlists::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(playlists))
}

/// POST /api/playlists
pub async fn create_playlist(
    State(state): State<AppState>,
    user: SessionUser,
    Json(body): Json<PlaylistBody>,
) -> Result<(StatusCode, Json<Playlist>)> {
    let name = validated_name(&body.name)?;

    let playlist = muse_storage::playlists::create(&state.pool, user.user_id, name).await?;
    tracing::info!(playlist_id = playlist.id, user_id = user.user_id, "created playlist");

    Ok((StatusCode::CREATED, Json(playlist)))
}

/// GET /api/playlists/:id
///
/// Returns the playlist with its songs in playback order.
pub async fn get_playlist(
    State(state): State<AppState>,
    user: SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<Playlist>> {
    let playlist = muse_storage::playlists::get_with_songs(&state.pool, id, user.user_id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Playlist {id}")))?;

    Ok(Json(playlist))
}

/// PUT /api/playlists/:id
pub async fn rename_playlist(
    State(state): State<AppState>,
    user: SessionUser,
    Path(id): Path<i64>,
    Json(body): Json<PlaylistBody>,
) -> Result<Json<Playlist>> {
    let name = validated_name(&body.name)?;

    let playlist = muse_storage::playlists::rename(&state.pool, id, user.user_id, name).await?;
    Ok(Json(playlist))
}

/// DELETE /api/playlists/:id
pub async fn delete_playlist(
    State(state): State<AppState>,
    user: SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    muse_storage::playlists::delete(&state.pool, id, user.user_id).await?;
    tracing::info!(playlist_id = id, user_id = user.user_id, "deleted playlist");

    Ok(Json(json!({ "deleted": id })))
}

/// POST /api/playlists/:id/songs
///
/// Appends a song at the end of the playlist. Adding a video that is
/// already in the playlist is rejected.
pub async fn add_song(
    State(state): State<AppState>,
    user: SessionUser,
    Path(id): Path<i64>,
    Json(song): Json<NewSong>,
) -> Result<(StatusCode, Json<Song>)> {
    song.validate()?;

    // Ownership check before touching the songs table.
    muse_storage::playlists::get_by_id(&state.pool, id, user.user_id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Playlist {id}")))?;

    let song = muse_storage::songs::add(&state.pool, id, &song).await?;
    tracing::info!(
        playlist_id = id,
        song_id = song.id,
        youtube_id = %song.youtube_id,
        "added song"
    );

    Ok((StatusCode::CREATED, Json(song)))
}

/// DELETE /api/playlists/:id/songs/:song_id
///
/// Removes the song and closes the gap so positions stay dense.
pub async fn remove_song(
    State(state): State<AppState>,
    user: SessionUser,
    Path((id, song_id)): Path<(i64, i64)>,
) -> Result<Json<Value>> {
    muse_storage::playlists::get_by_id(&state.pool, id, user.user_id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Playlist {id}")))?;

    muse_storage::songs::remove(&state.pool, id, song_id).await?;
    tracing::info!(playlist_id = id, song_id, "removed song");

    Ok(Json(json!({ "deleted": song_id })))
}
