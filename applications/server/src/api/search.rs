/// Video search endpoint
use crate::{error::Result, error::ServerError, state::AppState};
use axum::{
    extract::{Query, State},
    Json,
};
use muse_core::SearchResult;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// GET /api/search?q=...
///
/// Delegates to the configured provider; results are metadata only, no
/// stream URLs are resolved at search time.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchResult>>> {
    let query = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ServerError::BadRequest("Missing query parameter 'q'".to_string()))?;

    tracing::info!(provider = state.provider.name(), query, "search request");

    let results = state
        .provider
        .search(query, state.config.extractor.search_limit)
        .await?;

    Ok(Json(results))
}
