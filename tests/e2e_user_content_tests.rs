//! End-to-end tests for favourites and playlists.

mod common;

use common::{TestClient, TestServer};
use reqwest::StatusCode;

// =============================================================================
// Favourites
// =============================================================================

#[tokio::test]
async fn star_is_idempotent_across_requests() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());
    let track_id = server.fixture.track_opening;

    client.get_ok(&format!("/rest/star?id={}", track_id)).await;
    client.get_ok(&format!("/rest/star?id={}", track_id)).await;

    let envelope = client.get_ok("/rest/getStarred2").await;
    let songs = envelope["starred2"]["song"].as_array().unwrap();
    assert_eq!(songs.len(), 1);
    assert!(songs[0]["starred"].is_string());

    client.get_ok(&format!("/rest/unstar?id={}", track_id)).await;
    client.get_ok(&format!("/rest/unstar?id={}", track_id)).await;

    let envelope = client.get_ok("/rest/getStarred2").await;
    assert!(envelope["starred2"]["song"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn star_covers_all_four_entity_kinds() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let envelope = client
        .get_ok("/rest/createPlaylist?name=favourites-source")
        .await;
    let playlist_id = envelope["playlist"]["id"].as_i64().unwrap();

    client
        .get_ok(&format!(
            "/rest/star?id={}&albumId={}&artistId={}&playlistId={}",
            server.fixture.track_opening,
            server.fixture.album_2003,
            server.fixture.artist_alpha,
            playlist_id
        ))
        .await;

    let envelope = client.get_ok("/rest/getStarred2").await;
    let starred = &envelope["starred2"];
    assert_eq!(starred["song"].as_array().unwrap().len(), 1);
    assert_eq!(starred["album"].as_array().unwrap().len(), 1);
    assert_eq!(starred["artist"].as_array().unwrap().len(), 1);
    assert_eq!(starred["playlist"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn star_unknown_id_returns_404() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.get("/rest/star?albumId=424242").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn starred_sets_are_scoped_to_the_acting_user() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());
    let track_id = server.fixture.track_opening;

    // `u` of an unknown login falls back to the default user
    client.get_ok(&format!("/rest/star?id={}", track_id)).await;

    let envelope = client.get_ok("/rest/getStarred2").await;
    assert_eq!(envelope["starred2"]["song"].as_array().unwrap().len(), 1);
}

// =============================================================================
// Playlists
// =============================================================================

#[tokio::test]
async fn playlist_crud_roundtrip() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());
    let tracks = &server.fixture.all_track_ids;

    let envelope = client
        .get_ok(&format!(
            "/rest/createPlaylist?name=roadtrip&songId={}&songId={}",
            tracks[0], tracks[1]
        ))
        .await;
    let playlist = &envelope["playlist"];
    let playlist_id = playlist["id"].as_i64().unwrap();
    assert_eq!(playlist["name"], "roadtrip");
    assert_eq!(playlist["owner"], "admin");
    assert_eq!(playlist["songCount"], 2);
    assert_eq!(playlist["duration"], 150);
    assert_eq!(playlist["entry"].as_array().unwrap().len(), 2);

    let envelope = client
        .get_ok(&format!(
            "/rest/updatePlaylist?playlistId={}&name=roadtrip-2&songIdToAdd={}&songIdToRemove={}",
            playlist_id, tracks[2], tracks[0]
        ))
        .await;
    let playlist = &envelope["playlist"];
    assert_eq!(playlist["name"], "roadtrip-2");
    assert_eq!(playlist["songCount"], 2);
    assert_eq!(playlist["duration"], 210);

    let envelope = client
        .get_ok(&format!("/rest/getPlaylist?id={}", playlist_id))
        .await;
    assert_eq!(envelope["playlist"]["songCount"], 2);

    let envelope = client.get_ok("/rest/getPlaylists").await;
    assert_eq!(
        envelope["playlists"]["playlist"].as_array().unwrap().len(),
        1
    );

    client
        .get_ok(&format!("/rest/deletePlaylist?id={}", playlist_id))
        .await;
    let response = client
        .get(&format!("/rest/getPlaylist?id={}", playlist_id))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_playlist_requires_a_name() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.get("/rest/createPlaylist").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Invalid arguments");
}

#[tokio::test]
async fn update_unknown_playlist_returns_404() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client
        .get("/rest/updatePlaylist?playlistId=424242&name=ghost")
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
