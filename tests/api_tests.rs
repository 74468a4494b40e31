use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use movie_favorites::{
    api::{create_router, handlers::FavoriteStatus, AppState},
    db::{KeyValueStore, MemoryStore},
    error::{AppError, AppResult},
    models::Movie,
    services::{FavoritesStore, MovieCatalog},
};

const FAVORITES_KEY: &str = "favoriteMovies";

/// Catalog double returning fixed results
struct StubCatalog {
    movies: Vec<Movie>,
}

#[async_trait::async_trait]
impl MovieCatalog for StubCatalog {
    async fn trending(&self) -> AppResult<Vec<Movie>> {
        Ok(self.movies.clone())
    }

    async fn search(&self, query: &str) -> AppResult<Vec<Movie>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }
        let needle = query.to_lowercase();
        Ok(self
            .movies
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Catalog double that always fails upstream
struct FailingCatalog;

#[async_trait::async_trait]
impl MovieCatalog for FailingCatalog {
    async fn trending(&self) -> AppResult<Vec<Movie>> {
        Err(AppError::ExternalApi("API returned status 503".to_string()))
    }

    async fn search(&self, _query: &str) -> AppResult<Vec<Movie>> {
        Err(AppError::ExternalApi("API returned status 503".to_string()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Storage double whose every call fails
struct UnavailableStore;

#[async_trait::async_trait]
impl KeyValueStore for UnavailableStore {
    async fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Err(AppError::StorageUnavailable("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> AppResult<()> {
        Err(AppError::StorageUnavailable("connection refused".to_string()))
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }
}

fn movie_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "original_title": title,
        "overview": format!("Overview of {}", title),
        "adult": false,
        "backdrop_path": format!("/backdrop{}.jpg", id),
        "poster_path": format!("/poster{}.jpg", id),
        "popularity": 12.5,
        "release_date": "2024-03-01",
        "vote_average": 7.8,
        "vote_count": 1200
    })
}

fn movie(id: i64, title: &str) -> Movie {
    serde_json::from_value(movie_json(id, title)).unwrap()
}

fn server_with(storage: Arc<dyn KeyValueStore>, catalog: Arc<dyn MovieCatalog>) -> TestServer {
    let state = AppState::new(FavoritesStore::new(storage, FAVORITES_KEY), catalog);
    TestServer::new(create_router(state)).unwrap()
}

fn create_test_server() -> (TestServer, Arc<MemoryStore>) {
    let storage = Arc::new(MemoryStore::new());
    let catalog = Arc::new(StubCatalog {
        movies: vec![movie(1, "The Matrix"), movie(2, "Dune: Part Two")],
    });
    (server_with(storage.clone(), catalog), storage)
}

#[tokio::test]
async fn test_health_check() {
    let (server, _) = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_trending() {
    let (server, _) = create_test_server();

    let response = server.get("/api/v1/movies/trending").await;
    response.assert_status_ok();

    let movies: Vec<Movie> = response.json();
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].title, "The Matrix");
}

#[tokio::test]
async fn test_search() {
    let (server, _) = create_test_server();

    let response = server.get("/api/v1/movies/search?query=dune").await;
    response.assert_status_ok();

    let movies: Vec<Movie> = response.json();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].id, 2);
}

#[tokio::test]
async fn test_search_without_query_is_bad_request() {
    let (server, _) = create_test_server();

    let response = server.get("/api/v1/movies/search").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"], "Search query cannot be empty");
}

#[tokio::test]
async fn test_catalog_failure_is_bad_gateway() {
    let server = server_with(Arc::new(MemoryStore::new()), Arc::new(FailingCatalog));

    let response = server.get("/api/v1/movies/trending").await;
    response.assert_status(StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_favorites_start_empty() {
    let (server, _) = create_test_server();

    let response = server.get("/api/v1/favorites").await;
    response.assert_status_ok();

    let movies: Vec<Movie> = response.json();
    assert!(movies.is_empty());
}

#[tokio::test]
async fn test_add_and_list_favorites() {
    let (server, _) = create_test_server();

    let response = server
        .post("/api/v1/favorites")
        .json(&movie_json(1, "The Matrix"))
        .await;
    response.assert_status(StatusCode::CREATED);
    let status: FavoriteStatus = response.json();
    assert_eq!(
        status,
        FavoriteStatus {
            id: 1,
            favorite: true,
            changed: Some(true)
        }
    );

    let movies: Vec<Movie> = server.get("/api/v1/favorites").await.json();
    assert_eq!(movies, vec![movie(1, "The Matrix")]);
}

#[tokio::test]
async fn test_duplicate_add_keeps_original() {
    let (server, _) = create_test_server();

    server
        .post("/api/v1/favorites")
        .json(&movie_json(1, "The Matrix"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/v1/favorites")
        .json(&movie_json(1, "The Matrix Reloaded"))
        .await;
    response.assert_status_ok();
    let status: FavoriteStatus = response.json();
    assert_eq!(status.changed, Some(false));

    let movies: Vec<Movie> = server.get("/api/v1/favorites").await.json();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].title, "The Matrix");
}

#[tokio::test]
async fn test_add_without_id_is_bad_request() {
    let (server, storage) = create_test_server();

    let response = server
        .post("/api/v1/favorites")
        .json(&json!({ "title": "no id" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("id"));
    assert_eq!(storage.get(FAVORITES_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn test_unparseable_body_is_bad_request() {
    let (server, _) = create_test_server();

    let response = server
        .post("/api/v1/favorites/toggle")
        .text("{not json")
        .content_type("application/json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_remove_favorite() {
    let (server, _) = create_test_server();

    server
        .post("/api/v1/favorites")
        .json(&movie_json(1, "The Matrix"))
        .await;
    server
        .post("/api/v1/favorites")
        .json(&movie_json(2, "Dune: Part Two"))
        .await;

    let response = server.delete("/api/v1/favorites/1").await;
    response.assert_status_ok();
    let status: FavoriteStatus = response.json();
    assert_eq!(status.changed, Some(true));

    let movies: Vec<Movie> = server.get("/api/v1/favorites").await.json();
    assert_eq!(movies, vec![movie(2, "Dune: Part Two")]);
}

#[tokio::test]
async fn test_remove_absent_favorite_is_ok() {
    let (server, _) = create_test_server();

    let response = server.delete("/api/v1/favorites/99").await;
    response.assert_status_ok();
    let status: FavoriteStatus = response.json();
    assert_eq!(status.changed, Some(false));

    let movies: Vec<Movie> = server.get("/api/v1/favorites").await.json();
    assert!(movies.is_empty());
}

#[tokio::test]
async fn test_toggle_and_status() {
    let (server, _) = create_test_server();

    let status: FavoriteStatus = server.get("/api/v1/favorites/7").await.json();
    assert!(!status.favorite);
    assert_eq!(status.changed, None);

    let status: FavoriteStatus = server
        .post("/api/v1/favorites/toggle")
        .json(&movie_json(7, "Heat"))
        .await
        .json();
    assert!(status.favorite);

    let status: FavoriteStatus = server.get("/api/v1/favorites/7").await.json();
    assert!(status.favorite);

    let status: FavoriteStatus = server
        .post("/api/v1/favorites/toggle")
        .json(&movie_json(7, "Heat"))
        .await
        .json();
    assert!(!status.favorite);
}

#[tokio::test]
async fn test_favorites_persist_as_json_array() {
    let (server, storage) = create_test_server();

    server
        .post("/api/v1/favorites")
        .json(&movie_json(1, "The Matrix"))
        .await;
    server
        .post("/api/v1/favorites")
        .json(&movie_json(2, "Dune: Part Two"))
        .await;

    let raw = storage.get(FAVORITES_KEY).await.unwrap().unwrap();
    let persisted: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted[0]["id"], 1);
    assert_eq!(persisted[1]["title"], "Dune: Part Two");
    assert_eq!(persisted[1]["adult"], false);
}

#[tokio::test]
async fn test_malformed_state_is_server_error() {
    let (server, storage) = create_test_server();
    storage.set(FAVORITES_KEY, "not json").await.unwrap();

    server
        .get("/api/v1/favorites")
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    server
        .post("/api/v1/favorites")
        .json(&movie_json(1, "The Matrix"))
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(
        storage.get(FAVORITES_KEY).await.unwrap().as_deref(),
        Some("not json")
    );
}

#[tokio::test]
async fn test_storage_unavailable_is_service_unavailable() {
    let catalog = Arc::new(StubCatalog { movies: vec![] });
    let server = server_with(Arc::new(UnavailableStore), catalog);

    server
        .get("/api/v1/favorites")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
    server
        .post("/api/v1/favorites")
        .json(&movie_json(1, "The Matrix"))
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_request_id_generated() {
    let (server, _) = create_test_server();

    let response = server.get("/health").await;
    let header = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(header.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_request_id_propagated() {
    let (server, _) = create_test_server();
    let id = "5f0c6d2e-8a41-4a53-9c2b-0d4c3e2f1a77";

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static(id),
        )
        .await;

    assert_eq!(response.header("x-request-id"), id);
}
