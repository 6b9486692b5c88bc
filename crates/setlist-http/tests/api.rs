//! Typed operations against a mock backend.

mod common;

use serde_json::json;
use setlist_core::{
    Error, LoginRequest, NewPlaylist, PlaylistUpdate, RecommendationSeeds, RegisterRequest, Song,
    SongDuration, SongUpdate, TokenSlot,
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{client_for, mock_api_url, seeded_store, slot};

fn playlist_json(id: &str, name: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "name": name,
        "description": "",
        "user": "u1",
        "isPublic": false,
        "songs": [],
        "createdAt": "2024-05-01T10:00:00.000Z",
        "updatedAt": "2024-05-01T10:00:00.000Z"
    })
}

fn sample_song() -> Song {
    Song {
        id: None,
        spotify_id: "4uLU6hMCjMI75M1A2tKUQC".to_string(),
        name: "Never Gonna Give You Up".to_string(),
        artist: "Rick Astley".to_string(),
        artists: Vec::new(),
        album: "Whenever You Need Somebody".to_string(),
        album_id: None,
        duration: Some(SongDuration::Millis(213_000)),
        album_art: None,
        uri: Some("spotify:track:4uLU6hMCjMI75M1A2tKUQC".to_string()),
        preview_url: None,
    }
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn login_stores_both_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "ana@example.com", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "a1",
            "refreshToken": "r1",
            "user": {"_id": "u1", "username": "ana", "email": "ana@example.com"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = seeded_store(None, None).await;
    let client = client_for(mock_api_url(&server), store.clone());

    let response = client
        .login(&LoginRequest::new("ana@example.com", "hunter2"))
        .await
        .unwrap();

    assert_eq!(response.user.unwrap().username, "ana");
    assert_eq!(slot(&store, TokenSlot::Access).await.as_deref(), Some("a1"));
    assert_eq!(slot(&store, TokenSlot::Refresh).await.as_deref(), Some("r1"));
    assert!(client.is_authenticated().await.unwrap());
}

#[tokio::test]
async fn login_sends_no_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "a2"})))
        .mount(&server)
        .await;

    let store = seeded_store(Some("stale"), Some("r1")).await;
    let client = client_for(mock_api_url(&server), store.clone());

    client
        .login(&LoginRequest::new("ana@example.com", "hunter2"))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key("authorization"));
    assert_eq!(slot(&store, TokenSlot::Access).await.as_deref(), Some("a2"));
}

#[tokio::test]
async fn rejected_login_is_a_request_error_without_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "new"})))
        .expect(0)
        .mount(&server)
        .await;

    let store = seeded_store(None, Some("r1")).await;
    let client = client_for(mock_api_url(&server), store.clone());

    let err = client
        .login(&LoginRequest::new("ana@example.com", "wrong"))
        .await
        .unwrap_err();

    match err {
        Error::Request(request) => {
            assert_eq!(request.status, 401);
            assert_eq!(request.message.as_deref(), Some("Invalid credentials"));
        }
        other => panic!("expected request error, got {other:?}"),
    }
    assert_eq!(slot(&store, TokenSlot::Refresh).await.as_deref(), Some("r1"));
}

#[tokio::test]
async fn register_posts_account_and_stores_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(json!({
            "username": "ana",
            "email": "ana@example.com",
            "password": "hunter2",
            "name": "Ana"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "token": "a1",
            "user": {"id": "u1", "username": "ana", "email": "ana@example.com"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = seeded_store(None, None).await;
    let client = client_for(mock_api_url(&server), store.clone());

    client
        .register(&RegisterRequest::new("ana", "ana@example.com", "hunter2").with_name("Ana"))
        .await
        .unwrap();

    assert_eq!(slot(&store, TokenSlot::Access).await.as_deref(), Some("a1"));
    assert_eq!(slot(&store, TokenSlot::Refresh).await, None);
}

#[tokio::test]
async fn logout_clears_without_network() {
    let server = MockServer::start().await;
    let store = seeded_store(Some("a1"), Some("r1")).await;
    let client = client_for(mock_api_url(&server), store.clone());

    client.logout().await.unwrap();

    assert!(!client.is_authenticated().await.unwrap());
    assert_eq!(slot(&store, TokenSlot::Refresh).await, None);
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Playlists
// ============================================================================

#[tokio::test]
async fn list_and_get_playlists() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/playlists"))
        .and(header("authorization", "Bearer a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            playlist_json("p1", "Road trip"),
            playlist_json("p2", "Focus"),
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/playlists/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(playlist_json("p1", "Road trip")))
        .mount(&server)
        .await;

    let store = seeded_store(Some("a1"), Some("r1")).await;
    let client = client_for(mock_api_url(&server), store);

    let playlists = client.list_playlists().await.unwrap();
    assert_eq!(playlists.len(), 2);
    assert_eq!(playlists[1].name, "Focus");

    let playlist = client.get_playlist("p1").await.unwrap();
    assert_eq!(playlist.id, "p1");
    assert!(playlist.created_at.is_some());
}

#[tokio::test]
async fn create_update_and_delete_playlist() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/playlists"))
        .and(body_json(json!({
            "name": "Road trip",
            "description": "Long drives",
            "isPublic": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(playlist_json("p1", "Road trip")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/playlists/p1"))
        .and(body_json(json!({"name": "Night drive"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(playlist_json("p1", "Night drive")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/playlists/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "deleted"})))
        .expect(1)
        .mount(&server)
        .await;

    let store = seeded_store(Some("a1"), Some("r1")).await;
    let client = client_for(mock_api_url(&server), store);

    let created = client
        .create_playlist(
            &NewPlaylist::new("Road trip")
                .description("Long drives")
                .public(true),
        )
        .await
        .unwrap();
    assert_eq!(created.id, "p1");

    let update = PlaylistUpdate {
        name: Some("Night drive".to_string()),
        ..Default::default()
    };
    let updated = client.update_playlist("p1", &update).await.unwrap();
    assert_eq!(updated.name, "Night drive");

    client.delete_playlist("p1").await.unwrap();
}

#[tokio::test]
async fn empty_playlist_id_is_rejected_locally() {
    let server = MockServer::start().await;
    let store = seeded_store(Some("a1"), Some("r1")).await;
    let client = client_for(mock_api_url(&server), store);

    let err = client.get_playlist("  ").await.unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Songs
// ============================================================================

#[tokio::test]
async fn song_operations_return_updated_playlist() {
    let server = MockServer::start().await;
    let song = sample_song();

    let mut with_song = playlist_json("p1", "Road trip");
    with_song["songs"] = json!([{
        "_id": "s1",
        "spotifyId": song.spotify_id,
        "name": song.name,
        "artist": song.artist,
        "album": song.album,
        "duration": 213000
    }]);

    Mock::given(method("POST"))
        .and(path("/api/playlists/p1/songs"))
        .and(body_json(json!({"song": serde_json::to_value(&song).unwrap()})))
        .respond_with(ResponseTemplate::new(200).set_body_json(with_song.clone()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/playlists/p1/songs/s1"))
        .and(body_json(json!({"name": "Never Gonna Give You Up (Remastered)"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(with_song))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/playlists/p1/songs/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(playlist_json("p1", "Road trip")))
        .expect(1)
        .mount(&server)
        .await;

    let store = seeded_store(Some("a1"), Some("r1")).await;
    let client = client_for(mock_api_url(&server), store);

    let playlist = client.add_song("p1", &song).await.unwrap();
    assert_eq!(playlist.songs.len(), 1);
    assert_eq!(playlist.songs[0].entry_id(), "s1");
    assert_eq!(
        playlist.songs[0].duration.as_ref().map(ToString::to_string).as_deref(),
        Some("3:33")
    );

    let update = SongUpdate {
        name: Some("Never Gonna Give You Up (Remastered)".to_string()),
        ..Default::default()
    };
    client.update_song("p1", "s1", &update).await.unwrap();

    let playlist = client.remove_song("p1", "s1").await.unwrap();
    assert!(playlist.songs.is_empty());
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn search_sends_query_and_decodes_tracks() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/spotify/search"))
        .and(query_param("q", "rick astley"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": [{
                "spotifyId": "4uLU6hMCjMI75M1A2tKUQC",
                "name": "Never Gonna Give You Up",
                "artist": "Rick Astley",
                "album": "Whenever You Need Somebody",
                "duration": "3:33",
                "uri": "spotify:track:4uLU6hMCjMI75M1A2tKUQC"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = seeded_store(Some("a1"), Some("r1")).await;
    let client = client_for(mock_api_url(&server), store);

    let results = client.search_tracks("  rick astley ").await.unwrap();

    assert_eq!(results.tracks.len(), 1);
    assert_eq!(
        results.tracks[0].duration,
        Some(SongDuration::Text("3:33".to_string()))
    );
}

#[tokio::test]
async fn blank_search_makes_no_request() {
    let server = MockServer::start().await;
    let store = seeded_store(Some("a1"), Some("r1")).await;
    let client = client_for(mock_api_url(&server), store);

    let err = client.search_tracks("   ").await.unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn recommendations_send_seed_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/spotify/recommendations"))
        .and(query_param("seed_tracks", "t1,t2"))
        .and(query_param("seed_genres", "synthpop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tracks": []})))
        .expect(1)
        .mount(&server)
        .await;

    let store = seeded_store(Some("a1"), Some("r1")).await;
    let client = client_for(mock_api_url(&server), store);

    let seeds = RecommendationSeeds {
        tracks: vec!["t1".to_string(), "t2".to_string()],
        genres: vec!["synthpop".to_string()],
        ..Default::default()
    };
    let recommendations = client.recommendations(&seeds).await.unwrap();
    assert!(recommendations.tracks.is_empty());

    let err = client
        .recommendations(&RecommendationSeeds::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
async fn catalog_playlists_accept_list_and_paged_shapes() {
    let entry = json!({
        "id": "cp1",
        "name": "Discover Weekly",
        "images": [{"url": "https://img.example/cp1.jpg"}],
        "tracks": {"total": 30}
    });

    for body in [json!([entry.clone()]), json!({"items": [entry.clone()], "total": 1})] {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/spotify/playlists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;

        let store = seeded_store(Some("a1"), Some("r1")).await;
        let client = client_for(mock_api_url(&server), store);

        let playlists = client.catalog_playlists().await.unwrap();
        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].tracks.total, 30);
    }
}

#[tokio::test]
async fn add_track_to_catalog_playlist() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/spotify/playlists/cp1/tracks"))
        .and(body_json(json!({"uri": "spotify:track:abc"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"snapshot_id": "x"})))
        .expect(1)
        .mount(&server)
        .await;

    let store = seeded_store(Some("a1"), Some("r1")).await;
    let client = client_for(mock_api_url(&server), store);

    client
        .add_to_catalog_playlist("cp1", "spotify:track:abc")
        .await
        .unwrap();
}

// ============================================================================
// Decoding
// ============================================================================

#[tokio::test]
async fn unexpected_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/playlists"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let store = seeded_store(Some("a1"), Some("r1")).await;
    let client = client_for(mock_api_url(&server), store);

    let err = client.list_playlists().await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}
