/// Playback queue endpoints
///
/// The queue is ephemeral per-browser state. It never touches the
/// database: the whole queue travels as a base64-encoded JSON cookie, so
/// closing the browser or clearing cookies resets it.
use crate::{
    error::Result,
    error::ServerError,
    middleware::{build_cookie, expire_cookie},
    state::AppState,
};
use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use muse_core::QueueEntry;
use serde_json::json;

/// Cookies have a practical 4 KiB ceiling, so the queue is capped well
/// below the point where browsers start dropping the header.
const MAX_QUEUE_ENTRIES: usize = 200;

fn decode_queue(raw: &str) -> Option<Vec<QueueEntry>> {
    let bytes = BASE64.decode(raw).ok()?;
    serde_json::from_slice(&bytes).ok()
}

fn encode_queue(entries: &[QueueEntry]) -> Result<String> {
    let bytes = serde_json::to_vec(entries)
        .map_err(|e| ServerError::Internal(format!("queue serialization failed: {e}")))?;
    Ok(BASE64.encode(bytes))
}

/// GET /api/queue
///
/// A missing or unreadable cookie is an empty queue, not an error.
pub async fn get_queue(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<QueueEntry>>> {
    let entries = crate::middleware::cookie_value(&headers, &state.config.session.queue_cookie_name)
        .and_then(|raw| decode_queue(&raw))
        .unwrap_or_default();

    Ok(Json(entries))
}

/// PUT /api/queue
///
/// Replaces the whole queue with the submitted entries.
pub async fn put_queue(
    State(state): State<AppState>,
    Json(entries): Json<Vec<QueueEntry>>,
) -> Result<Response> {
    if entries.len() > MAX_QUEUE_ENTRIES {
        return Err(ServerError::BadRequest(format!(
            "Queue must contain at most {MAX_QUEUE_ENTRIES} entries"
        )));
    }

    let cookie = build_cookie(
        &state.config.session.queue_cookie_name,
        &encode_queue(&entries)?,
        i64::from(state.config.session.max_age_days) * 86_400,
    )?;

    let mut response = Json(json!({ "saved": entries.len() })).into_response();
    response.headers_mut().append(SET_COOKIE, cookie);
    Ok(response)
}

/// DELETE /api/queue
pub async fn clear_queue(State(state): State<AppState>) -> Result<Response> {
    let cookie = expire_cookie(&state.config.session.queue_cookie_name)?;

    let mut response = Json(json!({ "cleared": true })).into_response();
    response.headers_mut().append(SET_COOKIE, cookie);
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> QueueEntry {
        QueueEntry {
            id: id.to_string(),
            title: format!("Track {id}"),
            thumbnail: None,
            channel: None,
            duration: None,
        }
    }

    #[test]
    fn queue_survives_cookie_round_trip() {
        let entries = vec![entry("a"), entry("b")];
        let encoded = encode_queue(&entries).unwrap();
        let decoded = decode_queue(&encoded).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].id, "a");
        assert_eq!(decoded[1].title, "Track b");
    }

    #[test]
    fn garbage_cookie_decodes_to_none() {
        assert!(decode_queue("not base64 at all!!!").is_none());
        assert!(decode_queue(&BASE64.encode(b"not json")).is_none());
    }
}
