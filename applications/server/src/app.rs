/// Application router setup
use crate::{api, middleware::session_middleware, state::AppState};
use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    // Everything except the health probe runs behind the session layer.
    let session_routes = Router::new()
        .route("/search", get(api::search::search))
        .route("/get_stream_url", get(api::stream::get_stream_url))
        .route(
            "/playlists",
            get(api::playlists::list_playlists).post(api::playlists::create_playlist),
        )
        .route(
            "/playlists/:id",
            get(api::playlists::get_playlist)
                .put(api::playlists::rename_playlist)
                .delete(api::playlists::delete_playlist),
        )
        .route("/playlists/:id/songs", post(api::playlists::add_song))
        .route(
            "/playlists/:id/songs/:song_id",
            delete(api::playlists::remove_song),
        )
        .route(
            "/queue",
            get(api::queue::get_queue)
                .put(api::queue::put_queue)
                .delete(api::queue::clear_queue),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    let api_routes = Router::new()
        .route("/health", get(api::health::health_check))
        .merge(session_routes);

    let static_dir = state.config.web.static_dir.clone();

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
