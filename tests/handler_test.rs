use axum::Router;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::{TestResponse, TestServer};
use riff::adapter::memory::InMemorySessionStore;
use riff::app::AppState;
use riff::app::router::api_router;
use riff::domain::Song;
use riff::test_support::MockCatalog;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

fn sample_songs() -> Vec<Song> {
    vec![
        Song::new(1, "A", "Artist A")
            .with_genres(["rock", "pop"])
            .with_arrangements(["Lead", "Bass"]),
        Song::new(2, "B", "Artist B").with_genres(["Rock"]),
        Song::new(3, "C", "Artist C").with_genres(["pop"]),
        Song::new(4, "D", "Artist D").with_genres(["jazz"]),
    ]
}

fn rock_songs(n: i64) -> Vec<Song> {
    (1..=n)
        .map(|i| Song::new(i, format!("Song {i:03}"), "Band").with_genres(["rock"]))
        .collect()
}

fn create_test_app(catalog: Arc<MockCatalog>) -> Router {
    let store = Arc::new(InMemorySessionStore::new(Duration::from_secs(1800)));
    api_router(AppState::new(catalog, store, 20, 500))
}

fn server_with(songs: Vec<Song>) -> (TestServer, Arc<MockCatalog>) {
    let catalog = Arc::new(MockCatalog::with_songs(songs));
    let server = TestServer::new(create_test_app(catalog.clone())).unwrap();
    (server, catalog)
}

fn session_cookie(response: &TestResponse) -> HeaderValue {
    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("session cookie issued")
        .to_str()
        .unwrap()
        .to_string();
    let pair = set_cookie.split(';').next().unwrap().to_string();
    HeaderValue::from_str(&pair).unwrap()
}

fn titles(body: &Value) -> Vec<String> {
    body["songs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_endpoint_returns_healthy() {
    let (server, _) = server_with(Vec::new());

    let response = server.get("/api/health").await;

    response.assert_status_ok();
    response.assert_text("Healthy");
}

#[tokio::test]
async fn test_weighted_search_ranks_by_score() {
    let (server, catalog) = server_with(sample_songs());

    let response = server
        .post("/api/songs_weighted")
        .json(&json!({
            "genres": [
                {"genre": "rock", "weight": 2.0},
                {"genre": "pop", "weight": 1.0}
            ]
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(titles(&body), vec!["A", "B", "C"]);
    assert_eq!(body["total"], 3);
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["totalPages"], 1);
    assert_eq!(body["hasMore"], false);
    assert_eq!(body["songs"][0]["score"], 3.0);
    assert_eq!(
        body["songs"][0]["arrangementIcons"],
        json!(["iconLead.png", "iconBass.png"])
    );
    assert_eq!(catalog.query_count(), 1);
}

#[tokio::test]
async fn test_new_session_gets_cookie() {
    let (server, _) = server_with(sample_songs());

    let response = server
        .post("/api/songs_weighted")
        .json(&json!({"genres": [{"genre": "rock", "weight": 1}]}))
        .await;

    response.assert_status_ok();
    let set_cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.starts_with("riff_session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("SameSite=Lax"));
}

#[tokio::test]
async fn test_later_pages_served_from_session_cache() {
    let (server, catalog) = server_with(rock_songs(45));
    let search = json!({"genres": [{"genre": "rock", "weight": 1}]});

    let first = server.post("/api/songs_weighted").json(&search).await;
    first.assert_status_ok();
    let cookie = session_cookie(&first);
    let first_body: Value = first.json();
    assert_eq!(first_body["total"], 45);
    assert_eq!(first_body["totalPages"], 3);
    assert_eq!(first_body["hasMore"], true);

    let mut seen = titles(&first_body);
    for page in 2..=3 {
        let response = server
            .post("/api/songs_weighted")
            .add_header(COOKIE, cookie.clone())
            .json(&json!({"genres": [{"genre": "rock", "weight": 1}], "page": page}))
            .await;
        response.assert_status_ok();
        assert!(response.headers().get(SET_COOKIE).is_none());

        let body: Value = response.json();
        assert_eq!(body["currentPage"], page);
        assert_eq!(body["hasMore"], page < 3);
        seen.extend(titles(&body));
    }

    assert_eq!(seen.len(), 45);
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 45);
    assert_eq!(catalog.query_count(), 1);
}

#[tokio::test]
async fn test_page_past_end_is_empty() {
    let (server, _) = server_with(sample_songs());

    let response = server
        .post("/api/songs_weighted")
        .json(&json!({"genres": [{"genre": "rock", "weight": 1}], "page": 7}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["songs"], json!([]));
    assert_eq!(body["total"], 2);
    assert_eq!(body["hasMore"], false);
}

#[tokio::test]
async fn test_total_requested_bounds_results() {
    let (server, _) = server_with(rock_songs(30));

    let response = server
        .post("/api/songs_weighted")
        .json(&json!({"genres": [{"genre": "rock", "weight": 1}], "totalRequested": 5}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total"], 5);
    assert_eq!(body["totalPages"], 1);
}

#[tokio::test]
async fn test_band_search_weights_genres_equally() {
    let (server, _) = server_with(sample_songs());

    let response = server
        .post("/api/songs_bands")
        .json(&json!({
            "genres": [
                {"name": "Band One", "genres": ["Rock"]},
                {"name": "Band Two", "genres": ["pop", null, "rock"]}
            ]
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(titles(&body), vec!["A", "B", "C"]);
    assert_eq!(body["songs"][0]["score"], 2.0);
    assert_eq!(body["songs"][1]["score"], 1.0);
}

#[tokio::test]
async fn test_empty_genres_rejected_without_query() {
    let (server, catalog) = server_with(sample_songs());

    let response = server
        .post("/api/songs_weighted")
        .json(&json!({"genres": []}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "no genres provided");
    assert_eq!(catalog.query_count(), 0);
}

#[tokio::test]
async fn test_bands_without_genres_rejected() {
    let (server, _) = server_with(sample_songs());

    let response = server
        .post("/api/songs_bands")
        .json(&json!({"genres": [{"name": "Silent Band", "genres": []}]}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_weight_rejected() {
    let (server, _) = server_with(sample_songs());

    let response = server
        .post("/api/songs_weighted")
        .json(&json!({"genres": [{"genre": "rock", "weight": "heavy"}]}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("rock"));
}

#[tokio::test]
async fn test_invalid_page_rejected() {
    let (server, _) = server_with(sample_songs());

    let response = server
        .post("/api/songs_weighted")
        .json(&json!({"genres": [{"genre": "rock", "weight": 1}], "page": 0}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let (server, catalog) = server_with(sample_songs());

    let response = server
        .post("/api/songs_weighted")
        .content_type("application/json")
        .bytes("{\"genres\": [".into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());
    assert_eq!(catalog.query_count(), 0);
}

#[tokio::test]
async fn test_catalog_failure_returns_500() {
    let (server, catalog) = server_with(sample_songs());
    catalog.set_should_fail(true);

    let response = server
        .post("/api/songs_weighted")
        .json(&json!({"genres": [{"genre": "rock", "weight": 1}]}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("song catalog unavailable")
    );
}

#[tokio::test]
async fn test_clear_session_forces_recompute() {
    let (server, catalog) = server_with(sample_songs());
    let search = json!({"genres": [{"genre": "rock", "weight": 1}]});

    let first = server.post("/api/songs_weighted").json(&search).await;
    let cookie = session_cookie(&first);

    let cleared = server
        .delete("/api/session")
        .add_header(COOKIE, cookie.clone())
        .await;
    cleared.assert_status(StatusCode::NO_CONTENT);

    server
        .post("/api/songs_weighted")
        .add_header(COOKIE, cookie)
        .json(&search)
        .await
        .assert_status_ok();

    assert_eq!(catalog.query_count(), 2);
}

#[tokio::test]
async fn test_clear_session_without_cookie_is_no_content() {
    let (server, _) = server_with(Vec::new());

    let response = server
        .delete("/api/session")
        .add_header(
            HeaderName::from_static("cookie"),
            HeaderValue::from_static("riff_session=not-a-uuid"),
        )
        .await;

    response.assert_status(StatusCode::NO_CONTENT);
}
