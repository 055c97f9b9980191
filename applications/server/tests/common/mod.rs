/// Shared test utilities for server integration tests
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use muse_core::{SearchResult, StreamSource};
use muse_extractor::{ExtractError, VideoProvider};
use muse_server::{config::ServerConfig, create_router, state::AppState};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// Provider double with canned answers; "missing" is the one id that
/// does not resolve.
pub struct StubProvider;

#[async_trait]
impl VideoProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> muse_extractor::Result<Vec<SearchResult>> {
        let results = (0..limit.min(3))
            .map(|i| SearchResult {
                id: format!("video{i}"),
                title: format!("{query} result {i}"),
                channel: Some("Stub Channel".to_string()),
                duration: Some(180 + i as i64),
                thumbnail: None,
            })
            .collect();
        Ok(results)
    }

    async fn resolve(&self, video_id: &str) -> muse_extractor::Result<StreamSource> {
        if video_id == "missing" {
            return Err(ExtractError::NotFound(video_id.to_string()));
        }
        Ok(StreamSource {
            url: format!("https://stream.example/{video_id}.m4a"),
            mime_type: Some("audio/mp4".to_string()),
            bitrate: Some(128_000.0),
        })
    }
}

/// A router wired to a throwaway database and the stub provider.
pub struct TestApp {
    pub router: Router,
    // Held so the database file outlives the test
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let database_url = format!("sqlite://{}", db_path.display());

        let pool = muse_storage::create_pool(&database_url).await.unwrap();
        muse_storage::run_migrations(&pool).await.unwrap();

        let config = ServerConfig::default();
        let state = AppState::new(pool, Arc::new(StubProvider), Arc::new(config));

        Self {
            router: create_router(state),
            _temp_dir: temp_dir,
        }
    }

    /// Send a request through the router without binding a socket.
    pub async fn request(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.request(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        cookie: Option<&str>,
        body: serde_json::Value,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.request(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("DELETE").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.request(builder.body(Body::empty()).unwrap()).await
    }

    /// Hit any session route and return a `name=value` cookie pair usable
    /// in subsequent requests.
    pub async fn establish_session(&self) -> String {
        let response = self.get("/api/playlists", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        session_cookie(&response).expect("expected a session cookie")
    }
}

/// Extract the session cookie pair from a response's `Set-Cookie` headers.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("muse_session="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

/// Extract the queue cookie pair from a response's `Set-Cookie` headers.
pub fn queue_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("muse_queue="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
