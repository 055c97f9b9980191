/// End-to-end API tests driving the router directly.
mod common;

use axum::http::StatusCode;
use common::{json_body, queue_cookie, session_cookie, TestApp};
use serde_json::json;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::new().await;

    let response = app.get("/api/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn first_request_issues_session_cookie() {
    let app = TestApp::new().await;

    let response = app.get("/api/playlists", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = session_cookie(&response).expect("new browser should get a cookie");
    assert!(cookie.starts_with("muse_session="));

    // Returning with the cookie: same session, no new cookie.
    let response = app.get("/api/playlists", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_none());
}

#[tokio::test]
async fn sessions_are_isolated() {
    let app = TestApp::new().await;
    let alice = app.establish_session().await;
    let bob = app.establish_session().await;

    let response = app
        .send_json("POST", "/api/playlists", Some(&alice), json!({"name": "Mine"}))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let playlist = json_body(response).await;
    let playlist_id = playlist["id"].as_i64().unwrap();

    // Bob sees an empty list and cannot fetch Alice's playlist by id.
    let body = json_body(app.get("/api/playlists", Some(&bob)).await).await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    let response = app
        .get(&format!("/api/playlists/{playlist_id}"), Some(&bob))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn playlist_crud_round_trip() {
    let app = TestApp::new().await;
    let cookie = app.establish_session().await;

    // Create
    let response = app
        .send_json(
            "POST",
            "/api/playlists",
            Some(&cookie),
            json!({"name": "Road Trip"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let playlist = json_body(response).await;
    let id = playlist["id"].as_i64().unwrap();
    assert_eq!(playlist["name"], "Road Trip");

    // List shows it with a zero song count
    let body = json_body(app.get("/api/playlists", Some(&cookie)).await).await;
    assert_eq!(body[0]["name"], "Road Trip");
    assert_eq!(body[0]["song_count"], 0);

    // Rename
    let response = app
        .send_json(
            "PUT",
            &format!("/api/playlists/{id}"),
            Some(&cookie),
            json!({"name": "Long Road Trip"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["name"], "Long Road Trip");

    // Delete
    let response = app
        .delete(&format!("/api/playlists/{id}"), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .get(&format!("/api/playlists/{id}"), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_playlist_name_rejected() {
    let app = TestApp::new().await;
    let cookie = app.establish_session().await;

    let response = app
        .send_json("POST", "/api/playlists", Some(&cookie), json!({"name": "   "}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn search_requires_query() {
    let app = TestApp::new().await;
    let cookie = app.establish_session().await;

    let response = app.get("/api/search", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.get("/api/search?q=lofi+beats", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let results = body.as_array().unwrap();
    assert!(!results.is_empty());
    assert_eq!(results[0]["title"], "lofi beats result 0");
}

#[tokio::test]
async fn stream_url_resolution() {
    let app = TestApp::new().await;
    let cookie = app.establish_session().await;

    // Missing parameter
    let response = app.get("/api/get_stream_url", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Known video
    let response = app
        .get("/api/get_stream_url?video_id=abc123", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["url"], "https://stream.example/abc123.m4a");
    assert_eq!(body["mime_type"], "audio/mp4");

    // Unresolvable video
    let response = app
        .get("/api/get_stream_url?video_id=missing", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn songs_keep_dense_positions() {
    let app = TestApp::new().await;
    let cookie = app.establish_session().await;

    let playlist = json_body(
        app.send_json("POST", "/api/playlists", Some(&cookie), json!({"name": "Mix"}))
            .await,
    )
    .await;
    let id = playlist["id"].as_i64().unwrap();
    let songs_uri = format!("/api/playlists/{id}/songs");

    let mut song_ids = Vec::new();
    for n in 0..3 {
        let response = app
            .send_json(
                "POST",
                &songs_uri,
                Some(&cookie),
                json!({"youtube_id": format!("vid{n}"), "title": format!("Song {n}")}),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let song = json_body(response).await;
        assert_eq!(song["position"], n);
        song_ids.push(song["id"].as_i64().unwrap());
    }

    // Duplicate video in the same playlist is rejected
    let response = app
        .send_json(
            "POST",
            &songs_uri,
            Some(&cookie),
            json!({"youtube_id": "vid0", "title": "Song 0 again"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Remove the middle song; the gap closes
    let response = app
        .delete(&format!("{songs_uri}/{}", song_ids[1]), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let playlist = json_body(
        app.get(&format!("/api/playlists/{id}"), Some(&cookie))
            .await,
    )
    .await;
    let songs = playlist["songs"].as_array().unwrap();
    assert_eq!(songs.len(), 2);
    assert_eq!(songs[0]["youtube_id"], "vid0");
    assert_eq!(songs[0]["position"], 0);
    assert_eq!(songs[1]["youtube_id"], "vid2");
    assert_eq!(songs[1]["position"], 1);
}

#[tokio::test]
async fn song_without_title_rejected() {
    let app = TestApp::new().await;
    let cookie = app.establish_session().await;

    let playlist = json_body(
        app.send_json("POST", "/api/playlists", Some(&cookie), json!({"name": "Mix"}))
            .await,
    )
    .await;
    let id = playlist["id"].as_i64().unwrap();

    let response = app
        .send_json(
            "POST",
            &format!("/api/playlists/{id}/songs"),
            Some(&cookie),
            json!({"youtube_id": "vid1", "title": ""}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn queue_round_trip_via_cookie() {
    let app = TestApp::new().await;
    let session = app.establish_session().await;

    // Empty until something is saved
    let body = json_body(app.get("/api/queue", Some(&session)).await).await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    // Save a queue; the server answers with a queue cookie
    let response = app
        .send_json(
            "PUT",
            "/api/queue",
            Some(&session),
            json!([
                {"id": "vid1", "title": "First"},
                {"id": "vid2", "title": "Second", "duration": 200}
            ]),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let queue = queue_cookie(&response).expect("queue cookie expected");

    // Read it back by presenting both cookies
    let combined = format!("{session}; {queue}");
    let body = json_body(app.get("/api/queue", Some(&combined)).await).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["id"], "vid1");
    assert_eq!(entries[1]["duration"], 200);

    // Clearing expires the cookie
    let response = app.delete("/api/queue", Some(&combined)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cleared = queue_cookie(&response).expect("expiring cookie expected");
    assert_eq!(cleared, "muse_queue=");
}

#[tokio::test]
async fn oversized_queue_rejected() {
    let app = TestApp::new().await;
    let session = app.establish_session().await;

    let entries: Vec<_> = (0..201)
        .map(|i| json!({"id": format!("vid{i}"), "title": format!("Song {i}")}))
        .collect();

    let response = app
        .send_json("PUT", "/api/queue", Some(&session), json!(entries))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
