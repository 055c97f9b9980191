/// Stream URL resolution endpoint
use crate::{error::Result, error::ServerError, state::AppState};
use axum::{
    extract::{Query, State},
    Json,
};
use muse_core::StreamSource;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct StreamParams {
    pub video_id: Option<String>,
}

/// GET /api/get_stream_url?video_id=...
///
/// Resolves a video id to a direct, playable audio URL. The URL is
/// short-lived upstream, so it is resolved on demand rather than stored.
pub async fn get_stream_url(
    State(state): State<AppState>,
    Query(params): Query<StreamParams>,
) -> Result<Json<StreamSource>> {
    let video_id = params
        .video_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            ServerError::BadRequest("Missing query parameter 'video_id'".to_string())
        })?;

    tracing::info!(provider = state.provider.name(), video_id, "resolving stream");

    let source = state.provider.resolve(video_id).await?;

    Ok(Json(source))
}
